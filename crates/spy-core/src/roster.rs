//! Player identities and their alive/eliminated status.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{SpyError, SpyResult};

/// Unique identifier for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Immutable identity of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Profile {
    /// Stable identifier.
    pub id: PlayerId,
    /// Display name, unique within a game.
    pub name: String,
}

impl Profile {
    /// Create a profile with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
        }
    }
}

/// Whether a player is still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Still playing.
    Alive,
    /// Voted out. Never reverts within a game.
    Eliminated,
}

/// Ordered set of players with per-game status.
///
/// Order is the registration order, which is the speak order of the game.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Profile>,
    status: HashMap<PlayerId, PlayerStatus>,
}

impl Roster {
    /// Build a roster with every player alive.
    pub fn new(players: Vec<Profile>) -> SpyResult<Self> {
        let mut seen: Vec<String> = Vec::with_capacity(players.len());
        for p in &players {
            let lower = p.name.trim().to_lowercase();
            if seen.contains(&lower) {
                return Err(SpyError::DuplicatePlayerName(p.name.clone()));
            }
            seen.push(lower);
        }
        let status = players
            .iter()
            .map(|p| (p.id, PlayerStatus::Alive))
            .collect();
        Ok(Self { players, status })
    }

    /// Number of players, alive or not.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All players in speak order.
    pub fn players(&self) -> &[Profile] {
        &self.players
    }

    /// Look up a player by id.
    pub fn get(&self, id: PlayerId) -> Option<&Profile> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Look up a player by exact (trimmed, case-insensitive) name.
    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        let lower = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.trim().to_lowercase() == lower)
    }

    /// Status of a player, `None` if unknown.
    pub fn status(&self, id: PlayerId) -> Option<PlayerStatus> {
        self.status.get(&id).copied()
    }

    /// True if the player is on the roster and alive.
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.status(id) == Some(PlayerStatus::Alive)
    }

    /// Alive players in speak order.
    pub fn alive(&self) -> impl Iterator<Item = &Profile> {
        self.players.iter().filter(|p| self.is_alive(p.id))
    }

    /// Number of alive players.
    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// Names of alive players in speak order.
    pub fn alive_names(&self) -> Vec<String> {
        self.alive().map(|p| p.name.clone()).collect()
    }

    /// Put players in the given order. Ids not listed keep their relative order at the end.
    pub fn reorder(&mut self, order: &[PlayerId]) -> SpyResult<()> {
        if let Some(missing) = order.iter().find(|id| !self.status.contains_key(*id)) {
            return Err(SpyError::UnknownPlayer(*missing));
        }
        self.players.sort_by_key(|p| {
            order
                .iter()
                .position(|id| *id == p.id)
                .unwrap_or(order.len())
        });
        Ok(())
    }

    /// Mark a player eliminated. Returns `true` if the status changed.
    pub fn eliminate(&mut self, id: PlayerId) -> SpyResult<bool> {
        let status = self
            .status
            .get_mut(&id)
            .ok_or(SpyError::UnknownPlayer(id))?;
        let changed = *status == PlayerStatus::Alive;
        *status = PlayerStatus::Eliminated;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(vec![
            Profile::new("Alice"),
            Profile::new("Bob"),
            Profile::new("Carol"),
        ])
        .unwrap()
    }

    #[test]
    fn everyone_starts_alive() {
        let r = roster();
        assert_eq!(r.len(), 3);
        assert_eq!(r.alive_count(), 3);
        assert!(r.players().iter().all(|p| r.is_alive(p.id)));
    }

    #[test]
    fn elimination_is_monotonic() {
        let mut r = roster();
        let bob = r.find_by_name("bob").unwrap().id;
        assert!(r.eliminate(bob).unwrap());
        assert!(!r.eliminate(bob).unwrap());
        assert_eq!(r.status(bob), Some(PlayerStatus::Eliminated));
        assert_eq!(r.alive_names(), vec!["Alice", "Carol"]);
    }

    #[test]
    fn unknown_player_rejected() {
        let mut r = roster();
        assert!(matches!(
            r.eliminate(PlayerId::new()),
            Err(SpyError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = Roster::new(vec![Profile::new("Dana"), Profile::new(" dana ")]);
        assert!(matches!(result, Err(SpyError::DuplicatePlayerName(_))));
    }

    #[test]
    fn reorder_follows_given_ids() {
        let mut r = roster();
        let ids: Vec<PlayerId> = r.players().iter().rev().map(|p| p.id).collect();
        r.reorder(&ids).unwrap();
        assert_eq!(r.alive_names(), vec!["Carol", "Bob", "Alice"]);
        assert!(matches!(
            r.reorder(&[PlayerId::new()]),
            Err(SpyError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn id_display_is_short() {
        assert_eq!(PlayerId::new().to_string().len(), 8);
    }
}
