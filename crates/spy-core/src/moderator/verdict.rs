//! Win-condition evaluation.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Rosters larger than this end on three alive players instead of two.
const LARGE_ROSTER: usize = 6;

/// Alive counts by role at the moment of evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AliveCounts {
    /// Alive Civilians.
    pub civilian: usize,
    /// Alive Spies.
    pub spy: usize,
    /// Alive Blanks.
    pub blank: usize,
}

impl AliveCounts {
    /// All alive players.
    pub fn total(&self) -> usize {
        self.civilian + self.spy + self.blank
    }
}

/// Decide the winning side, if any.
///
/// Checked in order: Civilians win once every alive player is a Civilian.
/// Spies win while at least one is alive and the alive count has dropped to
/// 3 (rosters above 6) or 2. Blanks win when blanks are enabled, no Spy is
/// alive, and not everyone alive is a Civilian.
pub fn decide_winner(roster_size: usize, has_blank: bool, alive: AliveCounts) -> Option<Role> {
    let total = alive.total();
    if alive.civilian == total {
        return Some(Role::Civilian);
    }
    let threshold = if roster_size > LARGE_ROSTER { 3 } else { 2 };
    if alive.spy > 0 && total <= threshold {
        return Some(Role::Spy);
    }
    if has_blank && alive.spy == 0 && alive.civilian != total {
        return Some(Role::Blank);
    }
    None
}

/// Structured result of a game-over check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    /// Whether some side has won.
    pub is_game_over: bool,
    /// The winning role, if the game is over.
    pub winner: Option<Role>,
    /// Alive players of the winning role.
    pub winners: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive(civilian: usize, spy: usize, blank: usize) -> AliveCounts {
        AliveCounts {
            civilian,
            spy,
            blank,
        }
    }

    #[test]
    fn one_spy_three_civilians_continues() {
        assert_eq!(decide_winner(4, false, alive(3, 1, 0)), None);
        assert_eq!(decide_winner(8, false, alive(3, 1, 0)), None);
    }

    #[test]
    fn civilians_win_when_only_civilians_remain() {
        assert_eq!(decide_winner(4, false, alive(3, 0, 0)), Some(Role::Civilian));
        assert_eq!(decide_winner(9, true, alive(2, 0, 0)), Some(Role::Civilian));
    }

    #[test]
    fn spy_threshold_depends_on_roster() {
        assert_eq!(decide_winner(6, false, alive(2, 1, 0)), None);
        assert_eq!(decide_winner(6, false, alive(1, 1, 0)), Some(Role::Spy));
        assert_eq!(decide_winner(7, false, alive(2, 1, 0)), Some(Role::Spy));
        assert_eq!(decide_winner(7, false, alive(3, 1, 0)), None);
    }

    #[test]
    fn blank_wins_after_spies_are_gone() {
        assert_eq!(decide_winner(8, true, alive(3, 0, 1)), Some(Role::Blank));
        assert_eq!(decide_winner(8, false, alive(3, 0, 1)), None);
    }

    #[test]
    fn spy_beats_blank_at_threshold() {
        assert_eq!(decide_winner(5, true, alive(0, 1, 1)), Some(Role::Spy));
    }
}
