//! Errors raised while constructing or decoding ballot value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("proposal label is {len} bytes, at most {max} allowed")]
    LabelTooLong { len: usize, max: usize },

    #[error("proposal label is not valid UTF-8 text")]
    InvalidLabel,
}
