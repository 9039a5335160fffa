//! The election state machine.
//!
//! Every mutating method checks all of its preconditions before touching any
//! state, so a returned error always means "nothing changed".

use std::collections::{HashMap, HashSet};

use ballot_types::{Identity, ProposalLabel};
use serde::{Deserialize, Serialize};

use crate::error::ElectionError;
use crate::participant::{Participant, ParticipantStatus};
use crate::proposal::Proposal;

/// Record seen for identities the election has never touched.
static UNREGISTERED: Participant = Participant {
    weight: 0,
    voted: false,
    delegate: None,
    vote: None,
};

/// A single delegated-voting election.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Election {
    chairperson: Identity,
    proposals: Vec<Proposal>,
    participants: HashMap<Identity, Participant>,
}

impl Election {
    /// Create an election owned by `chairperson` over the given proposals.
    ///
    /// The chairperson starts out like everyone else: without a right to vote.
    pub fn new(
        chairperson: Identity,
        labels: impl IntoIterator<Item = ProposalLabel>,
    ) -> Result<Self, ElectionError> {
        let proposals: Vec<Proposal> = labels.into_iter().map(Proposal::new).collect();
        if proposals.is_empty() {
            return Err(ElectionError::NoProposals);
        }
        tracing::debug!(chairperson = %chairperson, proposals = proposals.len(), "election created");
        Ok(Self {
            chairperson,
            proposals,
            participants: HashMap::new(),
        })
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Give `voter` the right to vote (weight 1). Chairperson only.
    pub fn give_right_to_vote(
        &mut self,
        caller: &Identity,
        voter: &Identity,
    ) -> Result<(), ElectionError> {
        self.give_right_to_vote_batch(caller, std::slice::from_ref(voter))
    }

    /// Give every voter in `voters` the right to vote, or none of them.
    ///
    /// Voters are checked in order. Listing the same identity twice fails with
    /// [`ElectionError::AlreadyGranted`] on the second occurrence.
    pub fn give_right_to_vote_batch(
        &mut self,
        caller: &Identity,
        voters: &[Identity],
    ) -> Result<(), ElectionError> {
        if caller != &self.chairperson {
            return Err(ElectionError::Unauthorized(caller.clone()));
        }

        let mut seen = HashSet::with_capacity(voters.len());
        for voter in voters {
            let record = self.record(voter);
            if record.voted {
                return Err(ElectionError::AlreadyVoted(voter.clone()));
            }
            if record.weight != 0 || !seen.insert(voter) {
                return Err(ElectionError::AlreadyGranted(voter.clone()));
            }
        }

        for voter in voters {
            self.participants.entry(voter.clone()).or_default().weight = 1;
            tracing::debug!(voter = %voter, "right to vote granted");
        }
        Ok(())
    }

    /// Hand the caller's whole weight to `to`.
    ///
    /// The chain starting at `to` is resolved now, against current weights.
    /// If it ends at someone who already voted, the weight goes straight onto
    /// that proposal; otherwise it is added to the chain end's weight. Only
    /// the immediate link `caller → to` is stored.
    pub fn delegate(&mut self, caller: &Identity, to: &Identity) -> Result<(), ElectionError> {
        if caller == to {
            return Err(ElectionError::SelfDelegation);
        }
        let sender = self.record(caller);
        if sender.weight == 0 {
            return Err(ElectionError::NoVotingRight(caller.clone()));
        }
        if sender.voted {
            return Err(ElectionError::AlreadyVoted(caller.clone()));
        }
        let weight = sender.weight;

        let end = self.resolve_chain(caller, to)?;
        let target = self.record(&end);
        if target.weight == 0 {
            return Err(ElectionError::TargetIneligible(end));
        }

        match target.vote.filter(|_| target.voted) {
            Some(index) => {
                let count = self.checked_tally_add(index, weight)?;
                self.mark_delegated(caller, to);
                self.proposals[index].vote_count = count;
                tracing::debug!(
                    caller = %caller, to = %to, end = %end, weight, proposal = index,
                    "delegated to a cast vote"
                );
            }
            None => {
                let new_weight = target
                    .weight
                    .checked_add(weight)
                    .ok_or(ElectionError::Overflow)?;
                self.mark_delegated(caller, to);
                self.participants.entry(end.clone()).or_default().weight = new_weight;
                tracing::debug!(
                    caller = %caller, to = %to, end = %end, weight = new_weight,
                    "delegated"
                );
            }
        }
        Ok(())
    }

    /// Cast the caller's full weight for `proposal`.
    pub fn vote(&mut self, caller: &Identity, proposal: usize) -> Result<(), ElectionError> {
        let voter = self.record(caller);
        if voter.weight == 0 {
            return Err(ElectionError::NoVotingRight(caller.clone()));
        }
        if voter.voted {
            return Err(ElectionError::AlreadyVoted(caller.clone()));
        }
        let weight = voter.weight;
        let count = self.checked_tally_add(proposal, weight)?;

        let record = self.participants.entry(caller.clone()).or_default();
        record.voted = true;
        record.vote = Some(proposal);
        self.proposals[proposal].vote_count = count;
        tracing::debug!(caller = %caller, proposal, weight, "vote cast");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Votes accumulated by `proposal`.
    pub fn tally(&self, proposal: usize) -> Result<u64, ElectionError> {
        self.proposals
            .get(proposal)
            .map(|p| p.vote_count)
            .ok_or(ElectionError::InvalidProposal {
                index: proposal,
                count: self.proposals.len(),
            })
    }

    /// Indices of every proposal holding the highest tally, ascending.
    ///
    /// Ties are not broken. If nobody has voted, every proposal is returned.
    pub fn winning_proposals(&self) -> Vec<usize> {
        let mut winning_count = 0u64;
        let mut winners = Vec::new();
        for (index, proposal) in self.proposals.iter().enumerate() {
            if proposal.vote_count > winning_count {
                winning_count = proposal.vote_count;
                winners.clear();
                winners.push(index);
            } else if proposal.vote_count == winning_count {
                winners.push(index);
            }
        }
        winners
    }

    /// Labels of [`Election::winning_proposals`], in the same order.
    pub fn winner_labels(&self) -> Vec<ProposalLabel> {
        self.winning_proposals()
            .into_iter()
            .map(|index| self.proposals[index].label)
            .collect()
    }

    /// Sum of all tallies.
    pub fn total_votes(&self) -> u64 {
        self.proposals.iter().map(|p| p.vote_count).sum()
    }

    pub fn chairperson(&self) -> &Identity {
        &self.chairperson
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// Number of identities with a stored record.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Current record for `id` (defaults for unknown identities).
    pub fn participant(&self, id: &Identity) -> Participant {
        self.record(id).clone()
    }

    pub fn status(&self, id: &Identity) -> ParticipantStatus {
        self.record(id).status()
    }

    /// Current weight of `id`.
    pub fn weight(&self, id: &Identity) -> u64 {
        self.record(id).weight
    }

    /// Whether `id` still holds an unused right to vote.
    pub fn can_vote(&self, id: &Identity) -> bool {
        self.record(id).can_vote()
    }

    /// Whether `from` delegated directly to `to`.
    pub fn has_delegated_to(&self, from: &Identity, to: &Identity) -> bool {
        self.record(from).delegate.as_ref() == Some(to)
    }

    /// Follow `id`'s delegation links to the participant that ends the chain.
    ///
    /// Returns `id` itself if it never delegated, and `None` if the links
    /// loop (which an election built through [`Election::delegate`] never does).
    pub fn resolve_delegate(&self, id: &Identity) -> Option<Identity> {
        let mut current = id;
        let mut visited = HashSet::new();
        while let Some(next) = self.record(current).delegate.as_ref() {
            if !visited.insert(current) {
                return None;
            }
            current = next;
        }
        Some(current.clone())
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn record(&self, id: &Identity) -> &Participant {
        self.participants.get(id).unwrap_or(&UNREGISTERED)
    }

    /// Walk the chain from `to` to its end, failing if it reaches `caller`.
    fn resolve_chain(&self, caller: &Identity, to: &Identity) -> Result<Identity, ElectionError> {
        let mut current = to;
        let mut visited = HashSet::new();
        while let Some(next) = self.record(current).delegate.as_ref() {
            if next == caller || !visited.insert(current) {
                return Err(ElectionError::DelegationLoop(caller.clone()));
            }
            tracing::trace!(from = %current, to = %next, "following delegation");
            current = next;
        }
        Ok(current.clone())
    }

    fn checked_tally_add(&self, proposal: usize, weight: u64) -> Result<u64, ElectionError> {
        self.tally(proposal)?
            .checked_add(weight)
            .ok_or(ElectionError::Overflow)
    }

    fn mark_delegated(&mut self, caller: &Identity, to: &Identity) {
        let record = self.participants.entry(caller.clone()).or_default();
        record.voted = true;
        record.delegate = Some(to.clone());
    }
}
