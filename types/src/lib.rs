//! Fundamental types for delegated ballots.
//!
//! This crate defines the value types shared across the workspace: the opaque
//! identity a caller acts as, and the fixed-size label attached to a proposal.

pub mod error;
pub mod identity;
pub mod label;

pub use error::TypesError;
pub use identity::Identity;
pub use label::ProposalLabel;
