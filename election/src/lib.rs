//! Delegated voting for a single election.
//!
//! A chairperson registers a fixed list of proposals and grants voting rights
//! to participants one at a time. An eligible participant either votes for a
//! proposal directly or hands its whole weight to another participant, who may
//! in turn pass it on (A→B→C means A's weight ends up with C).
//!
//! Invariants maintained by [`Election`]:
//! - delegation links never form a cycle;
//! - delegated weight is neither lost nor counted twice;
//! - a participant votes or delegates at most once;
//! - every failed call leaves the election untouched.

pub mod election;
pub mod error;
pub mod participant;
pub mod proposal;

pub use election::Election;
pub use error::ElectionError;
pub use participant::{Participant, ParticipantStatus};
pub use proposal::Proposal;
