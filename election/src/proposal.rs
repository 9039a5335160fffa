//! Ballot proposals.

use ballot_types::ProposalLabel;
use serde::{Deserialize, Serialize};

/// A proposal registered when the election is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Display name.
    pub label: ProposalLabel,
    /// Accumulated weight of the votes cast for this proposal.
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(label: ProposalLabel) -> Self {
        Self {
            label,
            vote_count: 0,
        }
    }
}
