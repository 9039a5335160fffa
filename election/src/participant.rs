//! Per-identity voting record.

use ballot_types::Identity;
use serde::{Deserialize, Serialize};

/// Voting record for one identity known to the election.
///
/// Unknown identities behave exactly like `Participant::default()`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Votes this participant's ballot is worth. Zero means no right to vote.
    pub weight: u64,
    /// Set once the participant has voted or delegated.
    pub voted: bool,
    /// Immediate delegation target, if the participant delegated.
    pub delegate: Option<Identity>,
    /// Proposal index chosen by a direct vote.
    pub vote: Option<usize>,
}

/// Lifecycle position of a participant, derived from its record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantStatus {
    /// Never granted a right to vote.
    Unregistered,
    /// Holds weight, has neither voted nor delegated.
    Eligible,
    /// Handed its weight to the given identity.
    Delegated(Identity),
    /// Voted directly for the given proposal.
    Voted(usize),
}

impl Participant {
    pub fn status(&self) -> ParticipantStatus {
        match (&self.delegate, self.vote) {
            (Some(to), _) => ParticipantStatus::Delegated(to.clone()),
            (None, Some(index)) => ParticipantStatus::Voted(index),
            (None, None) if self.weight == 0 => ParticipantStatus::Unregistered,
            (None, None) => ParticipantStatus::Eligible,
        }
    }

    /// Whether this participant may still vote or delegate.
    pub fn can_vote(&self) -> bool {
        self.weight > 0 && !self.voted
    }
}
