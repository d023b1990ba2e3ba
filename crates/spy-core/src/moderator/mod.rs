//! The moderator: sole owner of per-game state.
//!
//! The moderator does not track which phase is active. It holds roles, keys,
//! and player status, and exposes one operation per phase step. Each returns
//! the message to broadcast; aggregation steps also return a structured
//! summary.

pub mod predict;
pub mod verdict;
pub mod vote;

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{SpyError, SpyResult};
use crate::key::{Key, KeyPair, KeySource};
use crate::locale::{Locale, fill, name_list};
use crate::message::{Message, MessageBody, Participant};
use crate::parse::{PredictionParser, ResponseParser, VoteParser};
use crate::role::{Role, draw_roles, role_counts};
use crate::roster::{PlayerId, Profile, Roster};

pub use predict::PredictionSummary;
pub use verdict::{AliveCounts, GameOverSummary, decide_winner};
pub use vote::{VoteOutcome, VoteSummary, tally_votes};

/// Role assignment and keys, visible to the moderator only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitSummary {
    /// Player names per role, in speak order.
    pub roles: BTreeMap<Role, Vec<String>>,
    /// Key dealt to Civilians.
    pub civilian_key: Key,
    /// Key dealt to Spies.
    pub spy_key: Key,
}

/// Mutable content of one game.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    roster: Roster,
    roles: HashMap<PlayerId, Role>,
    by_role: BTreeMap<Role, Vec<PlayerId>>,
    keys: Option<KeyPair>,
    round: u32,
}

/// Holds game state and performs every phase transition on it.
pub struct Moderator {
    config: GameConfig,
    key_source: KeySource,
    state: GameState,
    rng: StdRng,
}

impl Moderator {
    /// A moderator with an empty game, seeded from `config.seed`.
    pub fn new(config: GameConfig, key_source: KeySource) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            key_source,
            state: GameState::default(),
            rng,
        }
    }

    /// The game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The configured locale.
    pub fn locale(&self) -> &Locale {
        &self.config.locale
    }

    /// The current roster.
    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    /// Current round number, 0 before the first round.
    pub fn round(&self) -> u32 {
        self.state.round
    }

    /// Role of a player, once roles are drawn.
    pub fn role_of(&self, id: PlayerId) -> Option<Role> {
        self.state.roles.get(&id).copied()
    }

    /// Players holding `role`, in speak order.
    pub fn players_with(&self, role: Role) -> &[PlayerId] {
        self.state
            .by_role
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The key a player holds, `None` for Blanks or before `init_game`.
    pub fn key_of(&self, id: PlayerId) -> Option<&Key> {
        let pair = self.state.keys.as_ref()?;
        match self.role_of(id)? {
            Role::Civilian => Some(&pair.civilian),
            Role::Spy => Some(&pair.spy),
            Role::Blank => None,
        }
    }

    /// Roles by player name, for reports.
    pub fn roles_by_name(&self) -> BTreeMap<String, Role> {
        self.state
            .roster
            .players()
            .iter()
            .filter_map(|p| self.role_of(p.id).map(|r| (p.name.clone(), r)))
            .collect()
    }

    fn alive_receivers(&self) -> Vec<Participant> {
        self.state
            .roster
            .alive()
            .map(|p| Participant::Player(p.id))
            .collect()
    }

    fn all_receivers(&self) -> Vec<Participant> {
        self.state
            .roster
            .players()
            .iter()
            .map(|p| Participant::Player(p.id))
            .collect()
    }

    fn profile(&self, id: PlayerId) -> SpyResult<&Profile> {
        self.state.roster.get(id).ok_or(SpyError::UnknownPlayer(id))
    }

    /// Seed the roster for a new game. Everyone starts alive.
    pub fn register_players(&mut self, players: Vec<Profile>) -> SpyResult<()> {
        if !self.state.roles.is_empty() {
            return Err(SpyError::AlreadyRegistered);
        }
        self.state.roster = Roster::new(players)?;
        tracing::debug!(players = self.state.roster.len(), "players registered");
        Ok(())
    }

    /// Change the speak order after roles are drawn. Roles stay with their players.
    pub fn set_speak_order(&mut self, order: &[PlayerId]) -> SpyResult<()> {
        self.state.roster.reorder(order)?;
        let roster = &self.state.roster;
        for ids in self.state.by_role.values_mut() {
            ids.sort_by_key(|id| roster.players().iter().position(|p| p.id == *id));
        }
        Ok(())
    }

    /// Draw roles and keys for the registered roster.
    pub fn init_game(&mut self) -> SpyResult<(InitSummary, Message)> {
        let size = self.state.roster.len();
        let roles = draw_roles(size, self.config.has_blank, &mut self.rng)?;
        let pair = self
            .key_source
            .draw(self.config.key_modality, &mut self.rng)?;

        self.state.roles.clear();
        self.state.by_role.clear();
        for (profile, role) in self.state.roster.players().iter().zip(roles) {
            self.state.roles.insert(profile.id, role);
            self.state.by_role.entry(role).or_default().push(profile.id);
        }
        self.state.keys = Some(pair.clone());

        let mut by_name: BTreeMap<Role, Vec<String>> = BTreeMap::new();
        for profile in self.state.roster.players() {
            if let Some(role) = self.role_of(profile.id) {
                by_name.entry(role).or_default().push(profile.name.clone());
            }
        }

        let locale = &self.config.locale;
        let mut text = vec![locale.init_heading.clone(), locale.roles_heading.clone()];
        for (role, names) in &by_name {
            text.push(format!("- {}: {}", locale.role_name(*role), name_list(names)));
        }
        text.push(locale.keys_heading.clone());
        text.push(format!("- {}: {}", locale.civilian, pair.civilian));
        text.push(format!("- {}: {}", locale.spy, pair.spy));

        let summary = InitSummary {
            roles: by_name,
            civilian_key: pair.civilian,
            spy_key: pair.spy,
        };
        tracing::info!(players = size, has_blank = self.config.has_blank, "game initialized");
        let message = Message::from_moderator(
            vec![Participant::Moderator],
            text.join("\n"),
            MessageBody::InitSummary(summary.clone()),
        );
        Ok((summary, message))
    }

    /// Rules announcement for every player.
    pub fn introduce_rules(&self) -> Message {
        Message::from_moderator(
            self.all_receivers(),
            self.config.locale.rules(self.config.has_blank).to_string(),
            MessageBody::Rules,
        )
    }

    /// Announce the player count and role counts.
    pub fn announce_start(&self) -> SpyResult<Message> {
        let counts = role_counts(self.state.roster.len(), self.config.has_blank)?;
        let locale = &self.config.locale;
        let n = |c: usize| c.to_string();
        let mut parts = vec![
            fill(&locale.civilian_count, &[("n", &n(counts.civilian))]),
            fill(&locale.spy_count, &[("n", &n(counts.spy))]),
        ];
        if counts.blank > 0 {
            parts.push(fill(&locale.blank_count, &[("n", &n(counts.blank))]));
        }
        let text = fill(
            &locale.game_start,
            &[
                ("count", &n(self.state.roster.len())),
                ("roles", &parts.join(", ")),
            ],
        );
        Ok(Message::from_moderator(
            self.all_receivers(),
            text,
            MessageBody::Start,
        ))
    }

    /// Private key message for one player. The text holds only the placeholder.
    pub fn assign_key(&self, id: PlayerId) -> SpyResult<Message> {
        if self.state.keys.is_none() {
            return Err(SpyError::GameNotInitialized);
        }
        let profile = self.profile(id)?;
        let role = self.role_of(id).ok_or(SpyError::GameNotInitialized)?;
        let locale = &self.config.locale;
        let key = self.key_of(id).cloned();
        let text = match role {
            Role::Blank => fill(&locale.key_blank, &[("name", &profile.name)]),
            _ => fill(
                &locale.key_assigned,
                &[("name", &profile.name), ("key", &locale.key_placeholder)],
            ),
        };
        Ok(Message::from_moderator(
            vec![Participant::Player(id)],
            text,
            MessageBody::KeyAssignment { key },
        ))
    }

    /// Ask the given players to describe their key.
    pub fn ask_for_description(&self, ids: &[PlayerId]) -> Message {
        Message::from_moderator(
            ids.iter().map(|id| Participant::Player(*id)).collect(),
            self.config.locale.ask_description.clone(),
            MessageBody::AskForDescription,
        )
    }

    /// A warning to the author if their description contains their key.
    ///
    /// Blanks and image keys are never warned.
    pub fn validate_description(
        &self,
        author: PlayerId,
        description: &str,
    ) -> SpyResult<Option<Message>> {
        let role = self.role_of(author).ok_or(SpyError::GameNotInitialized)?;
        if role == Role::Blank {
            return Ok(None);
        }
        let Some(literal) = self.key_of(author).and_then(Key::leak_text) else {
            return Ok(None);
        };
        let leaked = !literal.trim().is_empty()
            && description
                .to_lowercase()
                .contains(&literal.trim().to_lowercase());
        if !leaked {
            return Ok(None);
        }
        tracing::debug!(player = %author, "description leaked key");
        Ok(Some(Message::from_moderator(
            vec![Participant::Player(author)],
            self.config.locale.description_warning.clone(),
            MessageBody::Warning,
        )))
    }

    /// Ask alive players to name the Spies (and Blanks).
    pub fn ask_for_prediction(&self) -> Message {
        let locale = &self.config.locale;
        let template = if self.config.has_blank {
            &locale.ask_prediction_with_blank
        } else {
            &locale.ask_prediction_without_blank
        };
        let names = name_list(&self.state.roster.alive_names());
        Message::from_moderator(
            self.alive_receivers(),
            fill(template, &[("names", &names)]),
            MessageBody::AskForPrediction,
        )
    }

    /// Parse predictions against the alive roster and pair them with the truth.
    pub fn summarize_predictions(
        &self,
        predictions: &[(PlayerId, String)],
    ) -> SpyResult<(PredictionSummary, Message)> {
        let parser = PredictionParser::new(&self.config.locale, self.config.has_blank);
        let alive = self.state.roster.alive_names();

        let mut parsed = Vec::with_capacity(predictions.len());
        for (id, text) in predictions {
            let name = self.profile(*id)?.name.clone();
            parsed.push((name, parser.parse(text, &alive)));
        }

        let alive_with = |role: Role| -> BTreeSet<String> {
            self.players_with(role)
                .iter()
                .filter(|id| self.state.roster.is_alive(**id))
                .filter_map(|id| self.state.roster.get(*id).map(|p| p.name.clone()))
                .collect()
        };
        let true_spies = alive_with(Role::Spy);
        let true_blanks = if self.config.has_blank {
            alive_with(Role::Blank)
        } else {
            BTreeSet::new()
        };

        let locale = &self.config.locale;
        let mut text = Vec::new();
        for (name, p) in &parsed {
            text.push(fill(&locale.prediction_heading, &[("name", name)]));
            text.push(format!("- {}: {}", locale.spy, set_list(&p.spies)));
            if self.config.has_blank {
                text.push(format!("- {}: {}", locale.blank, set_list(&p.blanks)));
            }
        }
        text.push(locale.correct_answer.clone());
        text.push(format!("- {}: {}", locale.spy, set_list(&true_spies)));
        if self.config.has_blank {
            text.push(format!("- {}: {}", locale.blank, set_list(&true_blanks)));
        }

        let summary = PredictionSummary {
            predictions: parsed,
            true_spies,
            true_blanks,
        };
        let message = Message::from_moderator(
            vec![Participant::Moderator],
            text.join("\n"),
            MessageBody::PredictionSummary(summary.clone()),
        );
        Ok((summary, message))
    }

    /// Ask alive players to vote among `targets`.
    pub fn ask_for_vote(&self, targets: &[String]) -> Message {
        let locale = &self.config.locale;
        let template = if self.config.has_blank {
            &locale.ask_vote_with_blank
        } else {
            &locale.ask_vote_without_blank
        };
        Message::from_moderator(
            self.alive_receivers(),
            fill(template, &[("names", &name_list(targets))]),
            MessageBody::AskForVote {
                targets: targets.to_vec(),
            },
        )
    }

    /// Tally one voting sub-round and eliminate on resolution.
    ///
    /// Only the first vote of each living voter counts. Unparsed votes are
    /// ignored. With `focused`, only votes for those players count.
    pub fn summarize_votes(
        &mut self,
        votes: &[(PlayerId, String)],
        patience: u32,
        focused: Option<&[String]>,
    ) -> SpyResult<(VoteSummary, Message)> {
        let parser = VoteParser::new(&self.config.locale);
        let alive = self.state.roster.alive_names();

        let mut seen = HashSet::new();
        let mut ballots = Vec::new();
        for (voter, text) in votes {
            let profile = self.profile(*voter)?;
            if !self.state.roster.is_alive(*voter) || !seen.insert(*voter) {
                continue;
            }
            if let Some(target) = parser.parse(text, &alive) {
                ballots.push((profile.name.clone(), target));
            }
        }

        let (tally, outcome) = tally_votes(&ballots, &alive, patience, focused);

        if let VoteOutcome::Resolved(out) = &outcome {
            for name in out {
                if let Some(id) = self.state.roster.find_by_name(name).map(|p| p.id) {
                    self.state.roster.eliminate(id)?;
                }
            }
            tracing::info!(eliminated = ?out, "vote resolved");
        } else {
            tracing::info!(tied = ?outcome.players(), patience, "vote tied");
        }

        let locale = &self.config.locale;
        let mut text: Vec<String> = ballots
            .iter()
            .map(|(v, t)| fill(&locale.vote_line, &[("voter", v), ("target", t)]))
            .collect();
        if let Some(f) = focused {
            text.push(fill(&locale.revote_note, &[("names", &name_list(f))]));
        }
        let names = name_list(outcome.players());
        text.push(match &outcome {
            VoteOutcome::Tied(_) => fill(&locale.tied, &[("names", &names)]),
            VoteOutcome::Resolved(_) => fill(&locale.eliminated, &[("names", &names)]),
        });

        let summary = VoteSummary {
            votes: ballots.into_iter().collect(),
            tally,
            focused: focused.map(<[String]>::to_vec),
            outcome,
        };
        let mut receivers = vec![Participant::Moderator];
        receivers.extend(self.all_receivers());
        let message = Message::from_moderator(
            receivers,
            text.join("\n"),
            MessageBody::VoteSummary(summary.clone()),
        );
        Ok((summary, message))
    }

    /// Alive counts by role.
    pub fn alive_counts(&self) -> AliveCounts {
        let count = |role: Role| {
            self.players_with(role)
                .iter()
                .filter(|id| self.state.roster.is_alive(**id))
                .count()
        };
        AliveCounts {
            civilian: count(Role::Civilian),
            spy: count(Role::Spy),
            blank: count(Role::Blank),
        }
    }

    /// Evaluate win conditions. Reads state only, so repeated calls agree.
    pub fn check_game_over(&self) -> SpyResult<(GameOverSummary, Message)> {
        if self.state.roles.is_empty() {
            return Err(SpyError::GameNotInitialized);
        }
        let winner = decide_winner(
            self.state.roster.len(),
            self.config.has_blank,
            self.alive_counts(),
        );
        let winners: Vec<String> = winner
            .map(|role| {
                self.players_with(role)
                    .iter()
                    .filter(|id| self.state.roster.is_alive(**id))
                    .filter_map(|id| self.state.roster.get(*id).map(|p| p.name.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let locale = &self.config.locale;
        let text = match winner {
            Some(role) => fill(
                &locale.game_over,
                &[("role", locale.role_name(role)), ("names", &name_list(&winners))],
            ),
            None => locale.game_continues.clone(),
        };
        let summary = GameOverSummary {
            is_game_over: winner.is_some(),
            winner,
            winners,
        };
        let mut receivers = vec![Participant::Moderator];
        receivers.extend(self.all_receivers());
        let message =
            Message::from_moderator(receivers, text, MessageBody::GameOver(summary.clone()));
        Ok((summary, message))
    }

    /// Advance the round counter and return the new round number.
    pub fn start_round(&mut self) -> u32 {
        self.state.round += 1;
        self.state.round
    }

    /// Clear all game state before the next game.
    pub fn reset(&mut self) {
        self.state = GameState::default();
    }

    /// Random source shared with speak-order arrangement.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

fn set_list(set: &BTreeSet<String>) -> String {
    let names: Vec<&String> = set.iter().collect();
    name_list(&names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyModality;

    fn profiles(names: &[&str]) -> Vec<Profile> {
        names.iter().map(|n| Profile::new(*n)).collect()
    }

    fn moderator(names: &[&str], has_blank: bool) -> Moderator {
        let config = GameConfig::default().with_seed(11).with_blank(has_blank);
        let mut m = Moderator::new(config, KeySource::builtin());
        m.register_players(profiles(names)).unwrap();
        m.init_game().unwrap();
        m
    }

    fn id(m: &Moderator, name: &str) -> PlayerId {
        m.roster().find_by_name(name).unwrap().id
    }

    /// Assign roles by hand so tests control who is who.
    fn force_roles(m: &mut Moderator, roles: &[(&str, Role)]) {
        m.state.roles.clear();
        m.state.by_role.clear();
        for (name, role) in roles {
            let pid = id(m, name);
            m.state.roles.insert(pid, *role);
            m.state.by_role.entry(*role).or_default().push(pid);
        }
    }

    #[test]
    fn four_players_three_civilians_one_spy() {
        let m = moderator(&["A", "B", "C", "D"], false);
        assert_eq!(m.players_with(Role::Civilian).len(), 3);
        assert_eq!(m.players_with(Role::Spy).len(), 1);
        assert!(m.players_with(Role::Blank).is_empty());
    }

    #[test]
    fn nine_players_with_blank() {
        let m = moderator(&["A", "B", "C", "D", "E", "F", "G", "H", "I"], true);
        assert_eq!(m.players_with(Role::Civilian).len(), 6);
        assert_eq!(m.players_with(Role::Spy).len(), 2);
        assert_eq!(m.players_with(Role::Blank).len(), 1);
    }

    #[test]
    fn unsupported_roster_is_configuration_error() {
        let mut m = Moderator::new(GameConfig::default(), KeySource::builtin());
        m.register_players(profiles(&["A", "B", "C"])).unwrap();
        assert!(matches!(
            m.init_game(),
            Err(SpyError::UnsupportedRosterSize(3))
        ));
    }

    #[test]
    fn register_after_init_is_rejected() {
        let mut m = moderator(&["A", "B", "C", "D"], false);
        assert!(matches!(
            m.register_players(profiles(&["E", "F", "G", "H"])),
            Err(SpyError::AlreadyRegistered)
        ));
        m.reset();
        assert!(m.register_players(profiles(&["E", "F", "G", "H"])).is_ok());
    }

    #[test]
    fn civilian_and_spy_keys_differ() {
        let m = moderator(&["A", "B", "C", "D", "E"], false);
        let civ = m.players_with(Role::Civilian)[0];
        let spy = m.players_with(Role::Spy)[0];
        assert_ne!(m.key_of(civ), m.key_of(spy));
    }

    #[test]
    fn image_game_without_image_keys_fails() {
        let config = GameConfig::default().with_modality(KeyModality::Image);
        let mut m = Moderator::new(config, KeySource::builtin());
        m.register_players(profiles(&["A", "B", "C", "D"])).unwrap();
        assert!(matches!(m.init_game(), Err(SpyError::EmptyKeyPool(_))));
    }

    #[test]
    fn key_assignment_hides_key_in_text() {
        let m = moderator(&["A", "B", "C", "D"], false);
        let pid = m.players_with(Role::Civilian)[0];
        let msg = m.assign_key(pid).unwrap();
        let key = m.key_of(pid).unwrap().clone();
        assert!(msg.text.contains("<KEY>"));
        assert_eq!(msg.assigned_key(), Some(&key));
        assert_eq!(msg.receivers, vec![Participant::Player(pid)]);
    }

    #[test]
    fn blank_assignment_carries_no_key() {
        let m = moderator(&["A", "B", "C", "D", "E"], true);
        let blank = m.players_with(Role::Blank)[0];
        let msg = m.assign_key(blank).unwrap();
        assert!(msg.assigned_key().is_none());
        assert!(!msg.text.contains("<KEY>"));
    }

    #[test]
    fn assign_before_init_fails() {
        let mut m = Moderator::new(GameConfig::default(), KeySource::builtin());
        let players = profiles(&["A", "B", "C", "D"]);
        let first = players[0].id;
        m.register_players(players).unwrap();
        assert!(matches!(
            m.assign_key(first),
            Err(SpyError::GameNotInitialized)
        ));
    }

    #[test]
    fn leaking_description_is_warned() {
        let m = moderator(&["A", "B", "C", "D"], false);
        let pid = m.players_with(Role::Civilian)[0];
        let key = m.key_of(pid).and_then(Key::leak_text).unwrap().to_uppercase();
        let warn = m
            .validate_description(pid, &format!("It is like {key} really"))
            .unwrap();
        assert!(matches!(warn.map(|w| w.body), Some(MessageBody::Warning)));
        assert!(
            m.validate_description(pid, "something vague")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn blank_is_never_warned() {
        let m = moderator(&["A", "B", "C", "D", "E"], true);
        let blank = m.players_with(Role::Blank)[0];
        let civ = m.players_with(Role::Civilian)[0];
        let key = m.key_of(civ).and_then(Key::leak_text).unwrap().to_string();
        assert!(m.validate_description(blank, &key).unwrap().is_none());
    }

    #[test]
    fn tied_vote_with_patience_eliminates_nobody() {
        let mut m = moderator(&["A", "B", "C", "D", "E"], false);
        let votes: Vec<(PlayerId, String)> = [
            ("C", "vote: A"),
            ("D", "vote: A"),
            ("A", "vote: B"),
            ("E", "vote: B"),
            ("B", "vote: C"),
        ]
        .iter()
        .map(|(v, t)| (id(&m, v), t.to_string()))
        .collect();

        let (summary, _) = m.summarize_votes(&votes, 2, None).unwrap();
        assert_eq!(
            summary.outcome,
            VoteOutcome::Tied(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(m.roster().alive_count(), 5);

        let (summary, msg) = m.summarize_votes(&votes, 0, None).unwrap();
        assert_eq!(
            summary.outcome,
            VoteOutcome::Resolved(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(m.roster().alive_names(), vec!["C", "D", "E"]);
        assert!(msg.receivers.contains(&Participant::Moderator));
    }

    #[test]
    fn dead_and_duplicate_voters_are_ignored() {
        let mut m = moderator(&["A", "B", "C", "D", "E"], false);
        let a = id(&m, "A");
        m.state.roster.eliminate(a).unwrap();
        let votes = vec![
            (a, "vote: B".to_string()),
            (id(&m, "C"), "vote: D".to_string()),
            (id(&m, "C"), "vote: B".to_string()),
            (id(&m, "E"), "I refuse".to_string()),
        ];
        let (summary, _) = m.summarize_votes(&votes, 3, None).unwrap();
        assert_eq!(summary.votes.len(), 1);
        assert_eq!(summary.votes.get("C").map(String::as_str), Some("D"));
        assert_eq!(
            summary.outcome,
            VoteOutcome::Resolved(vec!["D".to_string()])
        );
    }

    #[test]
    fn elimination_is_monotonic_until_reset() {
        let mut m = moderator(&["A", "B", "C", "D"], false);
        let votes = vec![
            (id(&m, "A"), "vote: B".to_string()),
            (id(&m, "C"), "vote: B".to_string()),
        ];
        m.summarize_votes(&votes, 3, None).unwrap();
        let b = id(&m, "B");
        assert!(!m.roster().is_alive(b));

        let revive = vec![(id(&m, "A"), "vote: C".to_string())];
        m.summarize_votes(&revive, 3, None).unwrap();
        assert!(!m.roster().is_alive(b));

        m.reset();
        let fresh = profiles(&["A", "B", "C", "D"]);
        m.register_players(fresh).unwrap();
        assert_eq!(m.roster().alive_count(), 4);
    }

    #[test]
    fn one_spy_three_civilians_is_not_over() {
        let mut m = moderator(&["A", "B", "C", "D"], false);
        force_roles(
            &mut m,
            &[
                ("A", Role::Spy),
                ("B", Role::Civilian),
                ("C", Role::Civilian),
                ("D", Role::Civilian),
            ],
        );
        let (summary, msg) = m.check_game_over().unwrap();
        assert!(!summary.is_game_over);
        assert_eq!(msg.text, m.locale().game_continues);

        let spy = id(&m, "A");
        m.state.roster.eliminate(spy).unwrap();
        let (summary, _) = m.check_game_over().unwrap();
        assert_eq!(summary.winner, Some(Role::Civilian));
        assert_eq!(summary.winners, vec!["B", "C", "D"]);
    }

    #[test]
    fn check_game_over_is_idempotent() {
        let mut m = moderator(&["A", "B", "C", "D", "E", "F"], true);
        let victim = m.players_with(Role::Civilian)[0];
        m.state.roster.eliminate(victim).unwrap();
        let (first, _) = m.check_game_over().unwrap();
        let (second, _) = m.check_game_over().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn predictions_compared_with_alive_truth() {
        let mut m = moderator(&["A", "B", "C", "D"], false);
        force_roles(
            &mut m,
            &[
                ("A", Role::Civilian),
                ("B", Role::Spy),
                ("C", Role::Civilian),
                ("D", Role::Civilian),
            ],
        );
        let preds = vec![
            (id(&m, "A"), "spy: [B]<EOS>".to_string()),
            (id(&m, "C"), "I don't know".to_string()),
        ];
        let (summary, msg) = m.summarize_predictions(&preds).unwrap();
        assert_eq!(summary.true_spies, BTreeSet::from(["B".to_string()]));
        assert_eq!(summary.spy_hits("A"), 1);
        assert!(summary.predictions[1].1.is_empty());
        assert_eq!(m.roster().alive_count(), 4);
        assert_eq!(msg.receivers, vec![Participant::Moderator]);
    }

    #[test]
    fn round_counter_resets() {
        let mut m = moderator(&["A", "B", "C", "D"], false);
        assert_eq!(m.start_round(), 1);
        assert_eq!(m.start_round(), 2);
        m.reset();
        assert_eq!(m.round(), 0);
    }
}
