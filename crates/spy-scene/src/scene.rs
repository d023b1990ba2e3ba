//! The round orchestrator.
//!
//! Drives games phase by phase: setup, describe, predict, vote (with tied
//! re-votes), then the game-over check. Player actions fan out concurrently
//! and are gathered before the moderator touches game state, so the
//! moderator is the only writer.

use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use rand::seq::SliceRandom;
use spy_core::{
    KeySource, Locale, MODERATOR_NAME, Message, MessageBody, Moderator, Participant, PlayerId,
    Profile, Role, Roster, VoteOutcome, role_counts,
};
use uuid::Uuid;

use crate::agent::{ActionKind, Agent, Turn, with_timeout};
use crate::config::{DescribeOrder, SceneConfig, SpeakOrder};
use crate::error::{AgentResult, SceneError, SceneResult};
use crate::log::{LogEntry, LogSink, Transcript};
use crate::order::place_blanks_late;
use crate::pool::MessagePool;
use crate::report::GameReport;

/// An agent and the identity it plays under.
struct Seat {
    profile: Profile,
    agent: Box<dyn Agent>,
}

/// Turn a failed action into a default, or into an error in debug mode.
fn settle<T>(
    debug: bool,
    player: &str,
    action: ActionKind,
    result: AgentResult<T>,
    default: impl FnOnce() -> T,
) -> SceneResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(source) if debug => Err(SceneError::Agent {
            player: player.to_string(),
            action,
            source,
        }),
        Err(source) => {
            tracing::warn!(player, %action, error = %source, "agent action failed, using default");
            Ok(default())
        }
    }
}

/// Shared, read-only inputs for soliciting descriptions.
struct DescribeCtx<'a> {
    moderator: &'a Moderator,
    locale: &'a Locale,
    candidates: &'a [String],
    attempts: u32,
    limit: Option<Duration>,
    debug: bool,
}

/// Drafts rejected for leaking the key, their warnings, and the accepted description.
struct Described {
    retries: Vec<Message>,
    accepted: Message,
}

/// Ask one player for a description until it no longer leaks or attempts run out.
async fn solicit_description(
    seat: &mut Seat,
    ctx: &DescribeCtx<'_>,
    mut history: Vec<Message>,
) -> SceneResult<Described> {
    let mut retries = Vec::new();
    let mut attempt = 0;
    loop {
        attempt += 1;
        let turn = Turn {
            me: &seat.profile,
            history: &history,
            candidates: ctx.candidates,
            locale: ctx.locale,
        };
        let result = with_timeout(ctx.limit, seat.agent.describe_key(turn)).await;
        let text = settle(
            ctx.debug,
            &seat.profile.name,
            ActionKind::Describe,
            result.map(Some),
            || None,
        )?
        .unwrap_or_else(|| ctx.locale.nothing_to_say.clone());

        let draft = Message::from_player(
            &seat.profile,
            vec![Participant::Moderator],
            text,
            MessageBody::Description,
        );
        match ctx.moderator.validate_description(seat.profile.id, &draft.text)? {
            Some(warning) if attempt < ctx.attempts => {
                history.push(draft.clone());
                history.push(warning.clone());
                retries.push(draft);
                retries.push(warning);
            }
            Some(_) => {
                tracing::warn!(player = %seat.profile.name, attempt, "accepting leaked description");
                return Ok(Described {
                    retries,
                    accepted: draft,
                });
            }
            None => {
                return Ok(Described {
                    retries,
                    accepted: draft,
                });
            }
        }
    }
}

/// Runs games between a fixed set of agents.
pub struct Scene<S: LogSink = Transcript> {
    config: SceneConfig,
    moderator: Moderator,
    seats: Vec<Seat>,
    pool: MessagePool,
    sink: S,
    game_id: Uuid,
}

impl Scene<Transcript> {
    /// A scene logging into an in-memory [`Transcript`].
    pub fn new(
        config: SceneConfig,
        key_source: KeySource,
        agents: Vec<Box<dyn Agent>>,
    ) -> SceneResult<Self> {
        Self::with_sink(config, key_source, agents, Transcript::new())
    }
}

impl<S: LogSink> Scene<S> {
    /// Fails early if the roster size has no role table entry or names repeat.
    pub fn with_sink(
        config: SceneConfig,
        key_source: KeySource,
        agents: Vec<Box<dyn Agent>>,
        sink: S,
    ) -> SceneResult<Self> {
        role_counts(agents.len(), config.game.has_blank)?;
        let seats: Vec<Seat> = agents
            .into_iter()
            .map(|agent| Seat {
                profile: Profile::new(agent.name()),
                agent,
            })
            .collect();
        Roster::new(seats.iter().map(|s| s.profile.clone()).collect())?;

        let moderator = Moderator::new(config.game.clone(), key_source);
        Ok(Self {
            config,
            moderator,
            seats,
            pool: MessagePool::new(),
            sink,
            game_id: Uuid::nil(),
        })
    }

    /// The scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The moderator, holding the current or last game.
    pub fn moderator(&self) -> &Moderator {
        &self.moderator
    }

    /// Messages of the current or most recent game.
    pub fn pool(&self) -> &MessagePool {
        &self.pool
    }

    /// The log sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play every configured game.
    pub async fn run(&mut self) -> SceneResult<Vec<GameReport>> {
        let total = self.config.num_games;
        let mut reports = Vec::with_capacity(total as usize);
        for game in 1..=total {
            tracing::info!(game, total, "game starting");
            let report = self.play_game().await?;
            tracing::info!(
                game,
                rounds = report.rounds,
                winner = ?report.winner,
                winners = ?report.winners,
                "game over"
            );
            reports.push(report);
        }
        Ok(reports)
    }

    async fn play_game(&mut self) -> SceneResult<GameReport> {
        self.game_id = Uuid::new_v4();
        self.pool.clear();
        self.moderator.reset();
        join_all(self.seats.iter_mut().map(|s| s.agent.reset())).await;

        self.seats.shuffle(self.moderator.rng());
        let profiles = self.seats.iter().map(|s| s.profile.clone()).collect();
        self.moderator.register_players(profiles)?;
        let (init, init_msg) = self.moderator.init_game()?;
        self.record(init_msg, "init game", None);

        if self.config.speak_order == SpeakOrder::BlanksLate {
            self.arrange_blanks_late()?;
        }

        let rules = self.moderator.introduce_rules();
        self.record(rules, "introduce rules", None);
        let start = self.moderator.announce_start()?;
        self.record(start, "announce start", None);
        self.deliver_keys().await?;

        let mut eliminated = Vec::new();
        let verdict = loop {
            let round = self.moderator.start_round();
            tracing::info!(round, alive = self.moderator.roster().alive_count(), "round started");

            let alive = self.alive_ids();
            self.describe(&alive).await?;
            self.predict().await?;
            eliminated.extend(self.vote().await?);

            let (summary, message) = self.moderator.check_game_over()?;
            self.record(message, "check game over", None);
            if summary.is_game_over {
                break summary;
            }
        };

        Ok(GameReport {
            game_id: self.game_id,
            rounds: self.moderator.round(),
            winner: verdict.winner,
            winners: verdict.winners,
            eliminated,
            roles: self.moderator.roles_by_name(),
            civilian_key: init.civilian_key,
            spy_key: init.spy_key,
        })
    }

    fn arrange_blanks_late(&mut self) -> SceneResult<()> {
        let roles: Vec<(PlayerId, Role)> = self
            .seats
            .iter()
            .filter_map(|s| {
                self.moderator
                    .role_of(s.profile.id)
                    .map(|r| (s.profile.id, r))
            })
            .collect();
        let order = place_blanks_late(&roles, self.moderator.rng());
        self.moderator.set_speak_order(&order)?;
        self.seats
            .sort_by_key(|s| order.iter().position(|id| *id == s.profile.id));
        Ok(())
    }

    fn alive_ids(&self) -> Vec<PlayerId> {
        self.moderator.roster().alive().map(|p| p.id).collect()
    }

    fn alive_participants(&self) -> Vec<Participant> {
        self.alive_ids()
            .into_iter()
            .map(Participant::Player)
            .collect()
    }

    fn participant_name(&self, who: Participant) -> String {
        match who {
            Participant::Moderator => MODERATOR_NAME.to_string(),
            Participant::Player(id) => self
                .seats
                .iter()
                .find(|s| s.profile.id == id)
                .map(|s| s.profile.name.clone())
                .unwrap_or_else(|| id.to_string()),
        }
    }

    fn profile(&self, id: PlayerId) -> Option<Profile> {
        self.seats
            .iter()
            .find(|s| s.profile.id == id)
            .map(|s| s.profile.clone())
    }

    /// Add a message to the pool and the log sink.
    fn record(&mut self, message: Message, log_msg: &str, chain: Option<String>) {
        let references = match message.sender {
            Participant::Moderator => None,
            who @ Participant::Player(_) => Some(self.pool.visible_ids(who)),
        };
        let receivers = message
            .receivers
            .iter()
            .map(|r| self.participant_name(*r))
            .collect();
        let entry = LogEntry {
            game_id: self.game_id,
            round_id: self.moderator.round(),
            references,
            response: message.clone(),
            receivers,
            log_msg: log_msg.to_string(),
            action_chain: chain,
            timestamp: Utc::now(),
        };
        self.pool.push(message);
        self.sink.append(entry);
    }

    async fn deliver_keys(&mut self) -> SceneResult<()> {
        let mut assignments = Vec::with_capacity(self.seats.len());
        for seat in &self.seats {
            assignments.push(self.moderator.assign_key(seat.profile.id)?);
        }
        for message in &assignments {
            self.record(message.clone(), "assign key", None);
        }

        let locale = self.moderator.locale();
        let limit = self.config.timeouts.get(ActionKind::ReceiveKey);
        let debug = self.config.debug_mode;
        let results = join_all(self.seats.iter_mut().zip(&assignments).map(
            |(seat, message)| async move {
                let result = with_timeout(limit, seat.agent.receive_key(message, locale)).await;
                settle(debug, &seat.profile.name, ActionKind::ReceiveKey, result, || ())
            },
        ))
        .await;
        results.into_iter().collect::<SceneResult<Vec<()>>>()?;
        Ok(())
    }

    /// Describe phase for `ids`: all alive players, or the tied set before a re-vote.
    async fn describe(&mut self, ids: &[PlayerId]) -> SceneResult<()> {
        let ask = self.moderator.ask_for_description(ids);
        self.record(ask, "ask for description", None);
        let candidates = self.moderator.roster().alive_names();

        match self.config.describe_order {
            DescribeOrder::Concurrent => {
                let ctx = DescribeCtx {
                    moderator: &self.moderator,
                    locale: self.moderator.locale(),
                    candidates: &candidates,
                    attempts: self.config.description_attempts,
                    limit: self.config.timeouts.get(ActionKind::Describe),
                    debug: self.config.debug_mode,
                };
                let pool = &self.pool;
                let ctx = &ctx;
                let results = join_all(
                    self.seats
                        .iter_mut()
                        .filter(|s| ids.contains(&s.profile.id))
                        .map(|seat| {
                            let history = pool.visible_to(Participant::Player(seat.profile.id));
                            solicit_description(seat, ctx, history)
                        }),
                )
                .await;
                for described in results {
                    self.publish_description(described?);
                }
            }
            DescribeOrder::Sequential => {
                for id in ids {
                    let described = {
                        let Some(seat) = self.seats.iter_mut().find(|s| s.profile.id == *id)
                        else {
                            continue;
                        };
                        let ctx = DescribeCtx {
                            moderator: &self.moderator,
                            locale: self.moderator.locale(),
                            candidates: &candidates,
                            attempts: self.config.description_attempts,
                            limit: self.config.timeouts.get(ActionKind::Describe),
                            debug: self.config.debug_mode,
                        };
                        let history = self.pool.visible_to(Participant::Player(*id));
                        solicit_description(seat, &ctx, history).await?
                    };
                    self.publish_description(described);
                }
            }
        }
        Ok(())
    }

    /// Log retries, then send the accepted description to the moderator and every alive player.
    fn publish_description(&mut self, described: Described) {
        let chain = Some(format!("describe-{}", described.accepted.id));
        for message in described.retries {
            let log_msg = match message.body {
                MessageBody::Warning => "warn leaked description",
                _ => "leaked description",
            };
            self.record(message, log_msg, chain.clone());
        }
        let public = described.accepted.republish(self.alive_participants());
        self.record(described.accepted, "description", chain.clone());
        self.record(public, "publish description", chain);
    }

    async fn predict(&mut self) -> SceneResult<()> {
        let ask = self.moderator.ask_for_prediction();
        self.record(ask, "ask for prediction", None);

        let alive = self.alive_ids();
        let candidates = self.moderator.roster().alive_names();
        let predictions = {
            let pool = &self.pool;
            let locale = self.moderator.locale();
            let candidates = &candidates;
            let limit = self.config.timeouts.get(ActionKind::Predict);
            let debug = self.config.debug_mode;
            let results = join_all(
                self.seats
                    .iter_mut()
                    .filter(|s| alive.contains(&s.profile.id))
                    .map(|seat| {
                        let history = pool.visible_to(Participant::Player(seat.profile.id));
                        async move {
                            let turn = Turn {
                                me: &seat.profile,
                                history: &history,
                                candidates,
                                locale,
                            };
                            let result = with_timeout(limit, seat.agent.predict_role(turn)).await;
                            settle(
                                debug,
                                &seat.profile.name,
                                ActionKind::Predict,
                                result,
                                String::new,
                            )
                            .map(|text| (seat.profile.id, text))
                        }
                    }),
            )
            .await;
            results.into_iter().collect::<SceneResult<Vec<_>>>()?
        };

        self.record_responses(&predictions, MessageBody::Prediction, "prediction");
        let (_, message) = self.moderator.summarize_predictions(&predictions)?;
        self.record(message, "summarize predictions", None);
        Ok(())
    }

    /// Voting sub-rounds until the vote resolves. Returns the eliminated names.
    async fn vote(&mut self) -> SceneResult<Vec<String>> {
        let mut patience = self.config.vote_patience;
        let mut focused: Option<Vec<String>> = None;
        loop {
            patience = patience.saturating_sub(1);
            let targets = focused
                .clone()
                .unwrap_or_else(|| self.moderator.roster().alive_names());
            let ask = self.moderator.ask_for_vote(&targets);
            self.record(ask, "ask for vote", None);

            let votes = self.collect_votes(&targets).await?;
            self.record_responses(&votes, MessageBody::Vote, "vote");
            let (summary, message) =
                self.moderator
                    .summarize_votes(&votes, patience, focused.as_deref())?;
            self.record(message, "summarize votes", None);

            match summary.outcome {
                VoteOutcome::Resolved(out) => return Ok(out),
                VoteOutcome::Tied(tied) => {
                    let ids: Vec<PlayerId> = tied
                        .iter()
                        .filter_map(|name| self.moderator.roster().find_by_name(name))
                        .map(|p| p.id)
                        .collect();
                    self.describe(&ids).await?;
                    focused = Some(tied);
                }
            }
        }
    }

    async fn collect_votes(&mut self, targets: &[String]) -> SceneResult<Vec<(PlayerId, String)>> {
        let alive = self.alive_ids();
        let pool = &self.pool;
        let locale = self.moderator.locale();
        let limit = self.config.timeouts.get(ActionKind::Vote);
        let debug = self.config.debug_mode;
        let results = join_all(
            self.seats
                .iter_mut()
                .filter(|s| alive.contains(&s.profile.id))
                .map(|seat| {
                    let history = pool.visible_to(Participant::Player(seat.profile.id));
                    async move {
                        let turn = Turn {
                            me: &seat.profile,
                            history: &history,
                            candidates: targets,
                            locale,
                        };
                        let result = with_timeout(limit, seat.agent.vote(turn)).await;
                        settle(debug, &seat.profile.name, ActionKind::Vote, result, String::new)
                            .map(|text| (seat.profile.id, text))
                    }
                }),
        )
        .await;
        results.into_iter().collect()
    }

    /// Log player responses addressed to the moderator.
    fn record_responses(&mut self, responses: &[(PlayerId, String)], body: MessageBody, log_msg: &str) {
        for (id, text) in responses {
            let Some(profile) = self.profile(*id) else {
                continue;
            };
            let message = Message::from_player(
                &profile,
                vec![Participant::Moderator],
                text.clone(),
                body.clone(),
            );
            self.record(message, log_msg, None);
        }
    }
}
