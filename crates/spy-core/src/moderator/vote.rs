//! Vote tallying and tie resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result of one voting sub-round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "players", rename_all = "snake_case")]
pub enum VoteOutcome {
    /// Several players share the top tally and patience remains.
    Tied(Vec<String>),
    /// These players were eliminated.
    Resolved(Vec<String>),
}

impl VoteOutcome {
    /// Players named by the outcome, tied or eliminated.
    pub fn players(&self) -> &[String] {
        match self {
            Self::Tied(p) | Self::Resolved(p) => p,
        }
    }
}

/// Structured record of a voting sub-round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSummary {
    /// Voter name to resolved target, for counted votes.
    pub votes: BTreeMap<String, String>,
    /// Candidate name to vote count, in speak order.
    pub tally: Vec<(String, u32)>,
    /// Candidates counted this sub-round, when restricted to a tied set.
    pub focused: Option<Vec<String>>,
    /// Tied set or eliminated players.
    pub outcome: VoteOutcome,
}

/// Tally resolved ballots and decide the outcome.
///
/// `ballots` are `(voter, target)` pairs already filtered to living voters.
/// `candidates` are the alive names in speak order. With `focused`, tallies
/// of anyone outside the set are zeroed. The top-tally set ties when it has
/// more than one member and `patience > 0`; otherwise all of it is eliminated.
pub fn tally_votes(
    ballots: &[(String, String)],
    candidates: &[String],
    patience: u32,
    focused: Option<&[String]>,
) -> (Vec<(String, u32)>, VoteOutcome) {
    let counted = |name: &str| focused.is_none_or(|f| f.iter().any(|n| n == name));

    let tally: Vec<(String, u32)> = candidates
        .iter()
        .map(|name| {
            let count = if counted(name) {
                ballots.iter().filter(|(_, t)| t == name).count() as u32
            } else {
                0
            };
            (name.clone(), count)
        })
        .collect();

    let eligible: Vec<&(String, u32)> = tally.iter().filter(|(n, _)| counted(n)).collect();
    let Some(max) = eligible.iter().map(|(_, c)| *c).max() else {
        return (tally, VoteOutcome::Resolved(Vec::new()));
    };
    let top: Vec<String> = eligible
        .iter()
        .filter(|(_, c)| *c == max)
        .map(|(n, _)| n.clone())
        .collect();

    let outcome = if top.len() > 1 && patience > 0 {
        VoteOutcome::Tied(top)
    } else {
        VoteOutcome::Resolved(top)
    };
    (tally, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn ballots(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(v, t)| (v.to_string(), t.to_string()))
            .collect()
    }

    /// A:2, B:2, C:1
    fn split_ballots() -> Vec<(String, String)> {
        ballots(&[("C", "A"), ("D", "A"), ("A", "B"), ("E", "B"), ("B", "C")])
    }

    #[test]
    fn tie_with_patience_eliminates_nobody() {
        let cands = names(&["A", "B", "C", "D", "E"]);
        let (tally, outcome) = tally_votes(&split_ballots(), &cands, 2, None);
        assert_eq!(outcome, VoteOutcome::Tied(names(&["A", "B"])));
        assert_eq!(tally[0], ("A".to_string(), 2));
        assert_eq!(tally[2], ("C".to_string(), 1));
    }

    #[test]
    fn tie_without_patience_eliminates_whole_set() {
        let cands = names(&["A", "B", "C", "D", "E"]);
        let (_, outcome) = tally_votes(&split_ballots(), &cands, 0, None);
        assert_eq!(outcome, VoteOutcome::Resolved(names(&["A", "B"])));
    }

    #[test]
    fn single_leader_resolves_even_with_patience() {
        let cands = names(&["A", "B", "C"]);
        let b = ballots(&[("A", "C"), ("B", "C"), ("C", "A")]);
        let (_, outcome) = tally_votes(&b, &cands, 3, None);
        assert_eq!(outcome, VoteOutcome::Resolved(names(&["C"])));
    }

    #[test]
    fn focused_set_zeroes_outsiders() {
        let cands = names(&["A", "B", "C", "D"]);
        let b = ballots(&[("A", "C"), ("B", "C"), ("C", "A"), ("D", "B")]);
        let focus = names(&["A", "B"]);
        let (tally, outcome) = tally_votes(&b, &cands, 2, Some(&focus));
        assert_eq!(tally[2], ("C".to_string(), 0));
        assert_eq!(outcome, VoteOutcome::Tied(names(&["A", "B"])));
    }

    #[test]
    fn no_ballots_ties_every_candidate() {
        let cands = names(&["A", "B", "C"]);
        let (_, outcome) = tally_votes(&[], &cands, 1, None);
        assert_eq!(outcome, VoteOutcome::Tied(cands.clone()));
    }

    #[test]
    fn no_candidates_resolves_empty() {
        let (_, outcome) = tally_votes(&[], &[], 1, None);
        assert_eq!(outcome, VoteOutcome::Resolved(Vec::new()));
    }
}
