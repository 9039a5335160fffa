//! Election scripts: who chairs, which proposals, and the calls to replay.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use ballot_election::Election;
use ballot_types::{Identity, ProposalLabel};

use crate::DaemonError;

/// A complete election described in TOML.
///
/// ```toml
/// chairperson = "chair"
/// proposals = ["Matthew Yang", "Kennith Linford"]
///
/// [[actions]]
/// kind = "grant"
/// targets = ["alice", "bob"]
///
/// [[actions]]
/// kind = "delegate"
/// caller = "bob"
/// to = "alice"
///
/// [[actions]]
/// kind = "vote"
/// caller = "alice"
/// proposal = 0
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub chairperson: String,
    pub proposals: Vec<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One call against the election, made by an already-identified caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Give rights to every target at once. The caller defaults to the chairperson.
    Grant {
        #[serde(default)]
        caller: Option<String>,
        targets: Vec<String>,
    },
    Delegate {
        caller: String,
        to: String,
    },
    Vote {
        caller: String,
        proposal: usize,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grant { caller, targets } => write!(
                f,
                "{} grants [{}]",
                caller.as_deref().unwrap_or("chairperson"),
                targets.join(", ")
            ),
            Self::Delegate { caller, to } => write!(f, "{caller} delegates to {to}"),
            Self::Vote { caller, proposal } => write!(f, "{caller} votes {proposal}"),
        }
    }
}

impl Script {
    pub fn from_toml_file(path: &Path) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, DaemonError> {
        toml::from_str(s).map_err(|e| DaemonError::Script(e.to_string()))
    }

    pub fn chairperson(&self) -> Result<Identity, DaemonError> {
        Ok(self.chairperson.parse()?)
    }

    /// Encode every proposal name as a label.
    pub fn labels(&self) -> Result<Vec<ProposalLabel>, DaemonError> {
        self.proposals
            .iter()
            .map(|name| ProposalLabel::from_text(name).map_err(DaemonError::from))
            .collect()
    }

    /// Create the election this script runs against.
    pub fn build_election(&self) -> Result<Election, DaemonError> {
        Ok(Election::new(self.chairperson()?, self.labels()?)?)
    }

    /// Check everything that can be checked without replaying: the election
    /// can be built and every identity in every action parses.
    ///
    /// Proposal indices are left to the election, which rejects them per call.
    pub fn validate(&self) -> Result<(), DaemonError> {
        self.build_election()?;
        for (index, action) in self.actions.iter().enumerate() {
            action
                .identities()
                .try_for_each(|raw| raw.parse::<Identity>().map(|_| ()))
                .map_err(|e| DaemonError::Script(format!("action {index} ({action}): {e}")))?;
        }
        Ok(())
    }
}

impl Action {
    /// Every identity string this action mentions.
    fn identities(&self) -> impl Iterator<Item = &str> {
        let names: Vec<&str> = match self {
            Self::Grant { caller, targets } => caller
                .as_deref()
                .into_iter()
                .chain(targets.iter().map(String::as_str))
                .collect(),
            Self::Delegate { caller, to } => vec![caller.as_str(), to.as_str()],
            Self::Vote { caller, .. } => vec![caller.as_str()],
        };
        names.into_iter()
    }
}
