//! Hidden roles and the roster-size role table.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{SpyError, SpyResult};

/// Smallest supported roster.
pub const MIN_PLAYERS: usize = 4;
/// Largest supported roster.
pub const MAX_PLAYERS: usize = 9;

/// The hidden role a player holds for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Holds the correct key.
    Civilian,
    /// Holds a similar but different key.
    Spy,
    /// Holds no key.
    Blank,
}

impl Role {
    /// All roles in table order.
    pub const ALL: [Role; 3] = [Role::Civilian, Role::Spy, Role::Blank];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Civilian => write!(f, "civilian"),
            Self::Spy => write!(f, "spy"),
            Self::Blank => write!(f, "blank"),
        }
    }
}

/// Number of players per role for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    /// Civilian players.
    pub civilian: usize,
    /// Spy players.
    pub spy: usize,
    /// Blank players.
    pub blank: usize,
}

impl RoleCounts {
    /// Count for a single role.
    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::Civilian => self.civilian,
            Role::Spy => self.spy,
            Role::Blank => self.blank,
        }
    }

    /// Total players across roles.
    pub fn total(&self) -> usize {
        self.civilian + self.spy + self.blank
    }

    /// Expand into a flat list of role tokens in table order.
    pub fn tokens(&self) -> Vec<Role> {
        Role::ALL
            .iter()
            .flat_map(|&role| std::iter::repeat_n(role, self.get(role)))
            .collect()
    }
}

/// Look up the role counts for a roster size.
///
/// | players | civilian | spy | blank |
/// |---------|----------|-----|-------|
/// | 4       | 3        | 1   | 0     |
/// | 5       | 3 / 4    | 1   | 1 / 0 |
/// | 6       | 4 / 5    | 1   | 1 / 0 |
/// | 7       | 4 / 5    | 2   | 1 / 0 |
/// | 8       | 5 / 6    | 2   | 1 / 0 |
/// | 9       | 6 / 7    | 2   | 1 / 0 |
///
/// The left value of each pair applies when blanks are enabled.
pub fn role_counts(roster_size: usize, has_blank: bool) -> SpyResult<RoleCounts> {
    let (with_blank, spy) = match roster_size {
        4 => {
            return Ok(RoleCounts {
                civilian: 3,
                spy: 1,
                blank: 0,
            });
        }
        5 => (3, 1),
        6 => (4, 1),
        7 => (4, 2),
        8 => (5, 2),
        9 => (6, 2),
        other => return Err(SpyError::UnsupportedRosterSize(other)),
    };
    Ok(if has_blank {
        RoleCounts {
            civilian: with_blank,
            spy,
            blank: 1,
        }
    } else {
        RoleCounts {
            civilian: with_blank + 1,
            spy,
            blank: 0,
        }
    })
}

/// Draw a uniformly shuffled role for each seat of the roster.
///
/// The returned vector is aligned with the roster's speak order.
pub fn draw_roles<R: Rng + ?Sized>(
    roster_size: usize,
    has_blank: bool,
    rng: &mut R,
) -> SpyResult<Vec<Role>> {
    let mut roles = role_counts(roster_size, has_blank)?.tokens();
    roles.shuffle(rng);
    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn four_players_never_have_blank() {
        let expected = RoleCounts {
            civilian: 3,
            spy: 1,
            blank: 0,
        };
        assert_eq!(role_counts(4, false).unwrap(), expected);
        assert_eq!(role_counts(4, true).unwrap(), expected);
    }

    #[test]
    fn nine_players_with_blank() {
        let counts = role_counts(9, true).unwrap();
        assert_eq!(counts.civilian, 6);
        assert_eq!(counts.spy, 2);
        assert_eq!(counts.blank, 1);
    }

    #[test]
    fn nine_players_without_blank() {
        let counts = role_counts(9, false).unwrap();
        assert_eq!(counts.civilian, 7);
        assert_eq!(counts.spy, 2);
        assert_eq!(counts.blank, 0);
    }

    #[test]
    fn sizes_outside_table_fail() {
        for size in [0, 1, 3, 10, 20] {
            assert!(matches!(
                role_counts(size, true),
                Err(SpyError::UnsupportedRosterSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn tokens_follow_table_order() {
        let counts = role_counts(5, true).unwrap();
        assert_eq!(
            counts.tokens(),
            vec![
                Role::Civilian,
                Role::Civilian,
                Role::Civilian,
                Role::Spy,
                Role::Blank
            ]
        );
    }

    #[test]
    fn draw_is_reproducible_with_seed() {
        let a = draw_roles(8, true, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = draw_roles(8, true, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn counts_sum_to_roster(size in MIN_PLAYERS..=MAX_PLAYERS, has_blank: bool) {
            let counts = role_counts(size, has_blank).unwrap();
            prop_assert_eq!(counts.total(), size);
            prop_assert!(counts.spy >= 1);
            if !has_blank {
                prop_assert_eq!(counts.blank, 0);
            }
        }

        #[test]
        fn drawn_roles_match_counts(size in MIN_PLAYERS..=MAX_PLAYERS, has_blank: bool, seed: u64) {
            let mut rng = StdRng::seed_from_u64(seed);
            let roles = draw_roles(size, has_blank, &mut rng).unwrap();
            let counts = role_counts(size, has_blank).unwrap();
            prop_assert_eq!(roles.len(), size);
            for role in Role::ALL {
                prop_assert_eq!(roles.iter().filter(|&&r| r == role).count(), counts.get(role));
            }
        }
    }
}
