//! Per-game outcome reports returned by the scene.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spy_core::{Key, Role};
use uuid::Uuid;

/// Outcome of one finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    /// Id shared with the game's log entries.
    pub game_id: Uuid,
    /// Rounds played.
    pub rounds: u32,
    /// Winning role, `None` only if the game was cut short.
    pub winner: Option<Role>,
    /// Alive players of the winning role.
    pub winners: Vec<String>,
    /// Eliminated players in elimination order.
    pub eliminated: Vec<String>,
    /// Role of every player.
    pub roles: BTreeMap<String, Role>,
    /// Key dealt to Civilians.
    pub civilian_key: Key,
    /// Key dealt to Spies.
    pub spy_key: Key,
}

impl GameReport {
    /// Names holding `role`, sorted.
    pub fn players_with(&self, role: Role) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_with_filters_by_role() {
        let roles = [
            ("Cy", Role::Civilian),
            ("Ann", Role::Spy),
            ("Bo", Role::Civilian),
            ("Di", Role::Blank),
        ]
        .into_iter()
        .map(|(n, r)| (n.to_string(), r))
        .collect();
        let report = GameReport {
            game_id: Uuid::nil(),
            rounds: 2,
            winner: Some(Role::Civilian),
            winners: vec!["Bo".into(), "Cy".into()],
            eliminated: vec!["Ann".into(), "Di".into()],
            roles,
            civilian_key: Key::text("apple"),
            spy_key: Key::text("pear"),
        };
        assert_eq!(report.players_with(Role::Civilian), vec!["Bo", "Cy"]);
        assert_eq!(report.players_with(Role::Spy), vec!["Ann"]);
        assert_eq!(report.players_with(Role::Blank), vec!["Di"]);
    }
}
