use ballot_types::Identity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("an election needs at least one proposal")]
    NoProposals,

    #[error("only the chairperson can give right to vote, {0} is not the chairperson")]
    Unauthorized(Identity),

    #[error("{0} already has the right to vote")]
    AlreadyGranted(Identity),

    #[error("{0} has already voted")]
    AlreadyVoted(Identity),

    #[error("{0} has no right to vote")]
    NoVotingRight(Identity),

    #[error("self-delegation is disallowed")]
    SelfDelegation,

    #[error("found loop in delegation starting at {0}")]
    DelegationLoop(Identity),

    #[error("cannot delegate to {0}, who has no right to vote")]
    TargetIneligible(Identity),

    #[error("proposal {index} does not exist ({count} proposals)")]
    InvalidProposal { index: usize, count: usize },

    #[error("weight or tally overflow")]
    Overflow,
}
