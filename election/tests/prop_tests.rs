use proptest::prelude::*;

use ballot_election::{Election, ElectionError, Participant, ParticipantStatus};
use ballot_types::{Identity, ProposalLabel};

const POOL: usize = 6;
const PROPOSALS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Grant { caller: usize, voter: usize },
    GrantBatch { voters: Vec<usize> },
    Delegate { caller: usize, to: usize },
    Vote { caller: usize, proposal: usize },
}

/// Index `POOL` stands for the chairperson.
fn identity(index: usize) -> Identity {
    if index == POOL {
        Identity::from("chair")
    } else {
        Identity::new(format!("voter-{index}"))
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..=POOL, 0..=POOL).prop_map(|(caller, voter)| Op::Grant { caller, voter }),
        prop::collection::vec(0..=POOL, 0..4).prop_map(|voters| Op::GrantBatch { voters }),
        (0..=POOL, 0..=POOL).prop_map(|(caller, to)| Op::Delegate { caller, to }),
        (0..=POOL, 0..=PROPOSALS).prop_map(|(caller, proposal)| Op::Vote { caller, proposal }),
    ]
}

fn new_election() -> Election {
    let labels = (0..PROPOSALS).map(|i| ProposalLabel::from_text(&format!("p{i}")).unwrap());
    Election::new(identity(POOL), labels).unwrap()
}

fn observe(e: &Election) -> (Vec<u64>, Vec<Participant>) {
    let tallies = (0..PROPOSALS).map(|i| e.tally(i).unwrap()).collect();
    let people = (0..=POOL).map(|i| e.participant(&identity(i))).collect();
    (tallies, people)
}

/// Apply `op`, returning how many rights it granted.
fn apply(e: &mut Election, op: &Op) -> Result<u64, ElectionError> {
    let chair = identity(POOL);
    match op {
        Op::Grant { caller, voter } => e
            .give_right_to_vote(&identity(*caller), &identity(*voter))
            .map(|_| 1),
        Op::GrantBatch { voters } => {
            let voters: Vec<Identity> = voters.iter().map(|v| identity(*v)).collect();
            e.give_right_to_vote_batch(&chair, &voters)
                .map(|_| voters.len() as u64)
        }
        Op::Delegate { caller, to } => e
            .delegate(&identity(*caller), &identity(*to))
            .map(|_| 0),
        Op::Vote { caller, proposal } => e.vote(&identity(*caller), *proposal).map(|_| 0),
    }
}

proptest! {
    /// A failed call never changes anything observable.
    #[test]
    fn failures_leave_state_unchanged(ops in prop::collection::vec(op(), 1..40)) {
        let mut e = new_election();
        for op in &ops {
            let before = observe(&e);
            if apply(&mut e, op).is_err() {
                prop_assert_eq!(observe(&e), before, "state changed by failing {:?}", op);
            }
        }
    }

    /// Every granted vote is either still held by a chain end or counted
    /// in a tally, never both and never twice.
    #[test]
    fn weight_is_conserved(ops in prop::collection::vec(op(), 1..60)) {
        let mut e = new_election();
        let mut granted = 0u64;
        for op in &ops {
            if let Ok(n) = apply(&mut e, op) {
                granted += n;
            }
            let held: u64 = (0..=POOL)
                .map(|i| e.participant(&identity(i)))
                .filter(|p| p.can_vote())
                .map(|p| p.weight)
                .sum();
            prop_assert_eq!(held + e.total_votes(), granted);
        }
    }

    /// Delegation links never loop, and every chain ends at a participant
    /// who has not delegated.
    #[test]
    fn delegation_stays_acyclic(ops in prop::collection::vec(op(), 1..60)) {
        let mut e = new_election();
        for op in &ops {
            let _ = apply(&mut e, op);
        }
        for i in 0..=POOL {
            let id = identity(i);
            let end = e.resolve_delegate(&id);
            prop_assert!(end.is_some(), "loop reachable from {}", id);
            let end = end.unwrap();
            prop_assert!(!matches!(e.status(&end), ParticipantStatus::Delegated(_)));
        }
    }

    /// Winners are exactly the proposals at the maximum, ascending.
    #[test]
    fn winners_hold_the_maximum(ops in prop::collection::vec(op(), 1..60)) {
        let mut e = new_election();
        for op in &ops {
            let _ = apply(&mut e, op);
        }
        let tallies: Vec<u64> = (0..PROPOSALS).map(|i| e.tally(i).unwrap()).collect();
        let max = *tallies.iter().max().unwrap();
        let expected: Vec<usize> = (0..PROPOSALS).filter(|i| tallies[*i] == max).collect();
        prop_assert!(!expected.is_empty());
        prop_assert_eq!(e.winning_proposals(), expected);
    }

    /// Weight only ever grows, and rights are never granted twice.
    #[test]
    fn weights_never_decrease(ops in prop::collection::vec(op(), 1..60)) {
        let mut e = new_election();
        for op in &ops {
            let before: Vec<u64> = (0..=POOL).map(|i| e.weight(&identity(i))).collect();
            let result = apply(&mut e, op);
            let after: Vec<u64> = (0..=POOL).map(|i| e.weight(&identity(i))).collect();
            for (b, a) in before.iter().zip(&after) {
                prop_assert!(a >= b);
            }
            if let (Op::Grant { caller, voter }, Ok(_)) = (op, &result) {
                prop_assert_eq!(*caller, POOL);
                prop_assert_eq!(before[*voter], 0);
                prop_assert_eq!(after[*voter], 1);
            }
        }
    }
}
