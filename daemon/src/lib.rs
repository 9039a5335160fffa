//! Host for running a single delegated-voting election from a script.
//!
//! The election core knows nothing about files, authentication or output.
//! This crate supplies those: a TOML script names the chairperson, the
//! proposals and an ordered list of calls made by already-identified callers;
//! replaying it yields a [`Report`] with tallies, winners and rejected calls.

pub mod config;
pub mod error;
pub mod replay;
pub mod script;

pub use config::DaemonConfig;
pub use error::DaemonError;
pub use replay::{replay, Outcome, Report};
pub use script::{Action, Script};
