//! Fixed-size proposal labels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;

/// A 32-byte opaque proposal label.
///
/// Text labels are stored left-aligned and right-padded with zero bytes, so a
/// label round-trips through [`ProposalLabel::from_text`] and
/// [`ProposalLabel::to_text`] as long as the text has no trailing NULs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalLabel([u8; 32]);

impl ProposalLabel {
    pub const LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Encode UTF-8 text into a zero-padded label.
    pub fn from_text(text: &str) -> Result<Self, TypesError> {
        let raw = text.as_bytes();
        if raw.len() > Self::LEN {
            return Err(TypesError::LabelTooLong {
                len: raw.len(),
                max: Self::LEN,
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    /// Decode the label as text, dropping the zero padding.
    pub fn to_text(&self) -> Result<String, TypesError> {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |i| i + 1);
        std::str::from_utf8(&self.0[..end])
            .map(str::to_owned)
            .map_err(|_| TypesError::InvalidLabel)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ProposalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalLabel({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ProposalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => write!(f, "{text}"),
            Err(_) => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}
