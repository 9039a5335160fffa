//! Replay a script against a fresh election and summarise the result.

use serde::Serialize;
use std::fmt;

use ballot_election::{Election, ElectionError};
use ballot_types::Identity;

use crate::script::{Action, Script};
use crate::DaemonError;

/// What happened to one scripted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub index: usize,
    pub action: String,
    /// `None` when the call was applied.
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProposalTally {
    pub index: usize,
    pub label: String,
    pub votes: u64,
}

/// Final state of a replayed election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub chairperson: String,
    pub tallies: Vec<ProposalTally>,
    pub winners: Vec<usize>,
    pub winner_labels: Vec<String>,
    pub total_votes: u64,
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn from_election(election: &Election, outcomes: Vec<Outcome>) -> Self {
        let tallies = election
            .proposals()
            .iter()
            .enumerate()
            .map(|(index, p)| ProposalTally {
                index,
                label: p.label.to_string(),
                votes: p.vote_count,
            })
            .collect();
        Self {
            chairperson: election.chairperson().to_string(),
            tallies,
            winners: election.winning_proposals(),
            winner_labels: election
                .winner_labels()
                .iter()
                .map(ToString::to_string)
                .collect(),
            total_votes: election.total_votes(),
            outcomes,
        }
    }

    pub fn rejected(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.error.is_some())
    }

    pub fn to_json(&self) -> Result<String, DaemonError> {
        serde_json::to_string_pretty(self).map_err(|e| DaemonError::Script(e.to_string()))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "chairperson: {}", self.chairperson)?;
        writeln!(f, "tallies:")?;
        for tally in &self.tallies {
            writeln!(f, "  [{}] {:<32} {}", tally.index, tally.label, tally.votes)?;
        }
        writeln!(f, "total votes: {}", self.total_votes)?;
        writeln!(f, "winners: {}", self.winner_labels.join(", "))?;
        let rejected: Vec<&Outcome> = self.rejected().collect();
        if !rejected.is_empty() {
            writeln!(f, "rejected actions:")?;
            for outcome in rejected {
                writeln!(
                    f,
                    "  #{} {}: {}",
                    outcome.index,
                    outcome.action,
                    outcome.error.as_deref().unwrap_or_default()
                )?;
            }
        }
        Ok(())
    }
}

/// Apply one action. Identities were not necessarily validated up front, so
/// parse errors surface here as script errors.
fn apply(election: &mut Election, action: &Action) -> Result<Result<(), ElectionError>, DaemonError> {
    let result = match action {
        Action::Grant { caller, targets } => {
            let caller = match caller {
                Some(raw) => raw.parse::<Identity>()?,
                None => election.chairperson().clone(),
            };
            let targets = targets
                .iter()
                .map(|raw| raw.parse::<Identity>())
                .collect::<Result<Vec<_>, _>>()?;
            election.give_right_to_vote_batch(&caller, &targets)
        }
        Action::Delegate { caller, to } => {
            election.delegate(&caller.parse::<Identity>()?, &to.parse::<Identity>()?)
        }
        Action::Vote { caller, proposal } => {
            election.vote(&caller.parse::<Identity>()?, *proposal)
        }
    };
    Ok(result)
}

/// Build the script's election and run every action in order.
///
/// Rejected calls are recorded and the replay continues, unless `strict` is
/// set, in which case the first rejection is returned as an error.
pub fn replay(script: &Script, strict: bool) -> Result<(Election, Report), DaemonError> {
    let mut election = script.build_election()?;
    tracing::info!(
        chairperson = %election.chairperson(),
        proposals = election.proposal_count(),
        actions = script.actions.len(),
        "replaying election script"
    );

    let mut outcomes = Vec::with_capacity(script.actions.len());
    for (index, action) in script.actions.iter().enumerate() {
        match apply(&mut election, action)? {
            Ok(()) => {
                tracing::debug!(index, %action, "applied");
                outcomes.push(Outcome {
                    index,
                    action: action.to_string(),
                    error: None,
                });
            }
            Err(source) if strict => {
                return Err(DaemonError::Rejected {
                    index,
                    action: action.to_string(),
                    source,
                });
            }
            Err(e) => {
                tracing::warn!(index, %action, error = %e, "action rejected");
                outcomes.push(Outcome {
                    index,
                    action: action.to_string(),
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let report = Report::from_election(&election, outcomes);
    tracing::info!(
        total_votes = report.total_votes,
        winners = ?report.winners,
        rejected = report.rejected().count(),
        "replay finished"
    );
    Ok((election, report))
}
