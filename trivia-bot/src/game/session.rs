//! The trivia game: one [`GameSession`] per connection owner.
//!
//! Rounds cycle question, three clues, reveal. All inputs (chat lines, joins,
//! timer deadlines) come in through `&mut self` methods; all output goes to
//! the session's [`Outbox`]. The session never sleeps or spawns.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use anyhow::Result;

use super::commands::{CommandKind, CommandRegistry, ParsedCommand, parse_command, strip_formatting};
use super::schedule::{Schedule, Timer};
use super::vote::{VoteOutcome, VoteState};
use crate::announce::{Announcement, Announcements};
use crate::answer::AnswerTracker;
use crate::config::GameConfig;
use crate::output::{MessageSink, Outbound, Outbox};
use crate::questions::{self, Question, QuestionSource};
use crate::ranking::{RewardState, Scoreboard, Streaks, Tier, rank_reward, streak_reward};
use crate::scoring;
use crate::store::ScoreStore;
use crate::strings::{Text, fill};

/// Clue number once the last clue is on the table.
const LAST_CLUE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game running.
    Idle,
    /// Question and fully masked clue shown.
    Presenting,
    /// At least one clue revealed.
    Clueing,
    /// Narrator has the question; clues start after the audio delay.
    Narrating,
    /// Won, exhausted or skipped. The next tick starts a new round.
    Resolved,
}

/// Requests for the connection owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    /// Reload configuration and scores, then reconnect.
    Restart,
    /// Run the update script, then exit.
    Update,
}

pub struct GameSession {
    config: GameConfig,
    text: Text,
    registry: CommandRegistry,
    nick: String,
    tracker: AnswerTracker,
    question: Option<Question>,
    clue_number: u8,
    scores: Scoreboard,
    streaks: Streaks,
    frozen: BTreeSet<String>,
    votes: VoteState,
    rewards: RewardState,
    phase: Phase,
    running: bool,
    resume_on_sign_on: bool,
    locutor: Option<String>,
    block_rank: bool,
    round: u64,
    started_at: Option<Instant>,
    schedule: Schedule,
    announcements: Announcements,
    outbox: Outbox,
    questions: Box<dyn QuestionSource>,
    store: Box<dyn ScoreStore>,
    control: Option<Control>,
}

impl GameSession {
    /// Build a session, loading scores and the freeze list from `store`.
    pub fn new(
        config: GameConfig,
        questions: Box<dyn QuestionSource>,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self> {
        let scores: Scoreboard = store.load_scores()?.into_iter().collect();
        let frozen = store.load_frozen()?;
        tracing::info!(players = scores.len(), frozen = frozen.len(), "Scores loaded");

        Ok(Self {
            text: Text::for_lang(&config.game.lang),
            registry: CommandRegistry::new(),
            nick: config.irc.nick.clone(),
            tracker: AnswerTracker::new(),
            question: None,
            clue_number: 0,
            scores,
            streaks: Streaks::default(),
            frozen,
            votes: VoteState::default(),
            rewards: RewardState::default(),
            phase: Phase::Idle,
            running: false,
            resume_on_sign_on: false,
            locutor: None,
            block_rank: false,
            round: 0,
            started_at: None,
            schedule: Schedule::default(),
            announcements: Announcements::new(
                config.announcements.file.clone(),
                config.announcements.ranking,
            ),
            outbox: Outbox::new(&config.irc.channel, &config.game.color_code),
            questions,
            store,
            control: None,
            config,
        })
    }

    // ── accessors ──

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn clue_number(&self) -> u8 {
        self.clue_number
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn score(&self, player: &str) -> Option<i64> {
        self.scores.get(player)
    }

    pub fn streak(&self, player: &str) -> u32 {
        self.streaks.get(player)
    }

    pub fn granted_tier(&self, player: &str) -> Option<Tier> {
        self.rewards.get(player)
    }

    pub fn is_frozen(&self, player: &str) -> bool {
        self.frozen.contains(player)
    }

    pub fn vote_count(&self) -> usize {
        self.votes.count()
    }

    pub fn locutor(&self) -> Option<&str> {
        self.locutor.as_deref()
    }

    pub fn rank_blocked(&self) -> bool {
        self.block_rank
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.next_deadline()
    }

    pub fn pending(&self) -> &[Outbound] {
        self.outbox.pending()
    }

    pub fn drain_outbox(&mut self) -> Vec<Outbound> {
        self.outbox.drain()
    }

    pub fn take_control(&mut self) -> Option<Control> {
        self.control.take()
    }

    // ── connection events ──

    /// Registered with the server: join, identify, greet, maybe start.
    pub fn signed_on(&mut self, nick: &str, now: Instant) {
        self.nick = nick.to_string();
        let channel = self.config.irc.channel.clone();
        self.outbox.push(Outbound::Join(channel.clone()));
        if let Some(password) = self.config.irc.identify.clone() {
            self.outbox
                .send_private("NickServ", &format!("identify {password}"));
        }
        tracing::info!(nick = %self.nick, channel = %channel, "Signed on");

        let t = &self.text;
        let lines = [
            fill(t.welcome, &[&channel]),
            t.have_an_admin.to_string(),
            t.have_help.to_string(),
            fill(t.help, &[&self.nick]),
        ];
        for line in lines {
            self.say(&line);
        }

        if self.config.game.autostart || self.resume_on_sign_on {
            self.start(now);
        }
        self.resume_on_sign_on = false;
    }

    /// Connection lost: save and go quiet until the next sign-on.
    pub fn suspend(&mut self) {
        if self.running {
            self.save_scores();
            self.resume_on_sign_on = true;
        }
        self.schedule.clear();
        self.running = false;
        self.phase = Phase::Idle;
        self.clue_number = 0;
        self.question = None;
        self.votes.reset();
        // Anything queued can no longer be delivered
        self.outbox.drain();
    }

    pub fn nick_changed(&mut self, old_nick: &str, new_nick: &str) {
        if old_nick == self.nick {
            self.nick = new_nick.to_string();
        }
    }

    pub fn user_joined(&mut self, channel: &str, nick: &str) {
        if nick == self.nick {
            tracing::info!(channel, "Joined");
            return;
        }
        // Channel modes are gone after a part or quit
        self.rewards.forget(nick);
        if channel != self.config.irc.channel {
            return;
        }

        if self.config.admin.auto_op && self.config.is_admin(nick) {
            self.outbox.set_mode(channel, true, Tier::Op, nick);
            self.rewards.grant(nick, Tier::Op);
            return;
        }

        if self.frozen.contains(nick) {
            return;
        }
        if let Some(info) = self.scores.rank(nick) {
            self.check_rank_reward(nick, info.rank);
        }
    }

    /// A PRIVMSG to the channel or to us.
    pub fn handle_message(&mut self, from: &str, target: &str, text: &str, now: Instant) {
        if from == self.nick || from.is_empty() {
            return;
        }
        let text = strip_formatting(text);
        let in_channel = is_channel(target);
        let reply_to = if in_channel { target } else { from };

        if let Some(cmd) = parse_command(&text, &self.nick) {
            self.dispatch(cmd, from, reply_to, now);
            return;
        }

        let guessing = matches!(self.phase, Phase::Presenting | Phase::Clueing);
        if !self.running || !guessing || !self.tracker.matches(&text) {
            return;
        }
        if target != self.config.irc.channel {
            self.outbox.send_private(from, self.text.respond_on_channel);
            return;
        }
        self.winner(from, now);
    }

    /// Fire every timer due at `now`.
    pub fn fire_due(&mut self, now: Instant) {
        while let Some(timer) = self.schedule.take_due(now) {
            match timer {
                Timer::Tick => self.on_tick(now),
                Timer::DelayedStart(round) => self.delayed_start(round, now),
                Timer::Announcement => self.announce(now),
            }
        }
    }

    // ── commands ──

    fn dispatch(&mut self, cmd: ParsedCommand, user: &str, reply_to: &str, now: Instant) {
        let Some(kind) = self.registry.lookup(&cmd.name) else {
            let text = fill(self.text.looks_oddly, &[&self.config.game.color_code, &user]);
            self.outbox.send_action(reply_to, &text);
            return;
        };
        if kind.privileged() && !self.config.is_admin(user) {
            tracing::info!(user, command = %cmd.name, "Refused admin command");
            let text = fill(self.text.not_allowed, &[&user]);
            self.reply(reply_to, &text);
            return;
        }
        tracing::debug!(user, command = ?kind, args = ?cmd.args, "Command");

        let args = &cmd.args;
        match kind {
            CommandKind::Score => self.cmd_score(user),
            CommandKind::Help => self.cmd_help(user),
            CommandKind::Source => {
                let text = if self.config.game.source_url.is_empty() {
                    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
                } else {
                    fill(self.text.source, &[&self.config.game.source_url])
                };
                self.outbox.send_private(user, &text);
            }
            CommandKind::Standings => {
                let limit = args
                    .first()
                    .and_then(|a| a.parse::<usize>().ok())
                    .unwrap_or(self.config.game.standings_limit);
                self.show_standings(Some(user), limit);
            }
            CommandKind::Repeat => self.repeat(reply_to),
            CommandKind::Next => self.vote(user, now),
            CommandKind::Die => self.shutdown(Control::Quit, self.text.signing_off),
            CommandKind::Restart => self.shutdown(Control::Restart, self.text.restarting),
            CommandKind::Update => self.shutdown(Control::Update, self.text.updating),
            CommandKind::Set => self.set_score(args, user),
            CommandKind::Start => self.start(now),
            CommandKind::Stop => self.stop(),
            CommandKind::Save => {
                self.save_scores();
                self.outbox.send_private(user, self.text.saved);
            }
            CommandKind::RankOn => {
                self.block_rank = false;
                self.outbox.send_private(user, self.text.rank_on);
            }
            CommandKind::RankOff => {
                self.block_rank = true;
                self.outbox.send_private(user, self.text.rank_off);
            }
            CommandKind::Skip => self.skip(now),
            CommandKind::Audio => self.audio(user, now),
            CommandKind::Text => self.text_mode(now),
            CommandKind::Freeze => self.freeze(args, user),
            CommandKind::Unfreeze => self.unfreeze(args, user),
            CommandKind::Frostlist => {
                let list = self.frozen.iter().cloned().collect::<Vec<_>>().join(", ");
                let text = fill(self.text.frostlist, &[&list]);
                self.outbox.send_private(user, &text);
            }
        }
    }

    fn cmd_score(&mut self, user: &str) {
        let text = match self.scores.get(user) {
            Some(score) => fill(self.text.score, &[&score]),
            None => self.text.idku.to_string(),
        };
        self.outbox.send_private(user, &text);
    }

    fn cmd_help(&mut self, user: &str) {
        if !self.config.admin.owner.is_empty() {
            let belong = fill(self.text.belong, &[&self.config.admin.owner]);
            self.outbox.send_private(user, &belong);
        }
        self.outbox.send_private(user, self.text.commands);
        if self.config.is_admin(user) {
            self.outbox.send_private(user, self.text.admin_cmds);
        }
    }

    fn repeat(&mut self, reply_to: &str) {
        if !self.running {
            self.say(self.text.not_playing);
            return;
        }
        if !matches!(self.phase, Phase::Presenting | Phase::Clueing) {
            return;
        }
        let Some(prompt) = self.question.as_ref().map(|q| q.prompt.clone()) else {
            return;
        };
        let lines = [
            self.text.question.to_string(),
            fill(self.text.question_line, &[&prompt]),
            fill(self.text.clue, &[&self.tracker.current_clue()]),
        ];
        for line in lines {
            self.reply(reply_to, &line);
        }
    }

    fn vote(&mut self, user: &str, now: Instant) {
        if !self.running {
            self.say(self.text.not_playing);
            return;
        }
        match self.votes.cast(user) {
            VoteOutcome::AlreadyVoted => {
                let text = fill(self.text.already_voted, &[&user]);
                self.say(&text);
            }
            VoteOutcome::Counted { remaining } => {
                let text = fill(self.text.you_voted, &[&user, &remaining]);
                self.say(&text);
            }
            VoteOutcome::Skip => self.skip(now),
        }
    }

    /// Save and sign off, as if an admin had said `die`.
    pub fn quit(&mut self) {
        self.shutdown(Control::Quit, self.text.signing_off);
    }

    fn shutdown(&mut self, control: Control, message: &str) {
        self.save_scores();
        self.schedule.clear();
        self.running = false;
        self.phase = Phase::Idle;
        self.outbox.push(Outbound::Quit(Some(message.to_string())));
        self.control = Some(control);
        tracing::info!(?control, "Shutting down");
    }

    fn set_score(&mut self, args: &[String], user: &str) {
        let (Some(player), Some(value)) = (args.first(), args.get(1)) else {
            self.outbox.send_private(user, self.text.set_usage);
            return;
        };
        let Ok(score) = value.parse::<i64>() else {
            self.outbox.send_private(user, self.text.set_usage);
            return;
        };
        if !self.scores.set(player, score) {
            let text = fill(self.text.not_in_scores, &[player]);
            self.outbox.send_private(user, &text);
            return;
        }
        tracing::info!(admin = user, player = %player, score, "Score set");
        self.save_scores();
        let text = fill(self.text.score_set, &[player, &score]);
        self.outbox.send_private(user, &text);
    }

    fn freeze(&mut self, args: &[String], user: &str) {
        let Some(nick) = args.first().map(|s| s.trim().to_string()) else {
            let text = fill(self.text.nick_usage, &[&"freeze"]);
            self.outbox.send_private(user, &text);
            return;
        };
        if !self.scores.contains(&nick) {
            let text = fill(self.text.freeze_no_score, &[&nick]);
            self.outbox.send_private(user, &text);
        }
        if self.frozen.contains(&nick) {
            let text = fill(self.text.already_frozen, &[&nick]);
            self.outbox.send_private(user, &text);
            return;
        }
        self.frozen.insert(nick.clone());
        let text = fill(self.text.freeze, &[&nick]);
        self.say(&text);
        self.save_frozen();
    }

    fn unfreeze(&mut self, args: &[String], user: &str) {
        let Some(nick) = args.first().map(|s| s.trim().to_string()) else {
            let text = fill(self.text.nick_usage, &[&"unfreeze"]);
            self.outbox.send_private(user, &text);
            return;
        };
        if !self.frozen.remove(&nick) {
            let text = fill(self.text.not_frozen, &[&nick]);
            self.outbox.send_private(user, &text);
            return;
        }
        let text = fill(self.text.unfreeze, &[&nick]);
        self.say(&text);
        self.save_frozen();
    }

    // ── game flow ──

    /// Start playing. No-op when already running.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.clue_number = 0;
        self.phase = Phase::Resolved;
        self.schedule
            .arm_announcement(now + self.config.announcements.delay);
        self.schedule.arm_tick(self.round_interval(), now, true);
        tracing::info!("Game started");
    }

    /// Stop playing, show final standings and save. No-op when idle.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.schedule.clear();
        self.running = false;
        self.phase = Phase::Idle;
        self.clue_number = 0;
        self.say(self.text.thanks);
        self.say(self.text.rankings);
        self.show_standings(None, self.config.game.standings_limit);
        self.say(self.text.see_you);
        self.save_scores();
        tracing::info!("Game stopped");
    }

    fn on_tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        match self.clue_number {
            0 => self.new_question(now),
            n if n < LAST_CLUE => {
                if self.locutor.is_none()
                    && let Some(prompt) = self.question.as_ref().map(|q| q.prompt.clone())
                {
                    self.say(self.text.question);
                    let line = fill(self.text.question_line, &[&prompt]);
                    self.say(&line);
                }
                let clue = self.tracker.give_clue();
                let line = fill(self.text.give_clue, &[&clue]);
                self.say(&line);
                self.clue_number += 1;
                self.phase = Phase::Clueing;
            }
            _ => {
                let line = fill(self.text.no_one_got, &[&self.tracker.answer()]);
                self.say(&line);
                self.streaks.clear();
                self.new_question(now);
            }
        }
    }

    fn new_question(&mut self, now: Instant) {
        self.clue_number = 0;
        self.votes.reset();
        self.round += 1;
        self.schedule.clear_delayed_start();

        let question = match questions::draw(self.questions.as_mut()) {
            Ok(q) => q,
            Err(e) => {
                tracing::error!(error = %e, "Question bank unavailable, stopping the game");
                self.say(self.text.bank_unavailable);
                self.schedule.clear();
                self.running = false;
                self.phase = Phase::Idle;
                self.question = None;
                self.save_scores();
                return;
            }
        };
        tracing::debug!(round = self.round, prompt = %question.prompt, "New question");
        self.tracker.set_answer(&question.answer);
        let prompt = question.prompt.clone();
        self.question = Some(question);

        if let Some(narrator) = self.locutor.clone() {
            let lines = [
                self.text.question.to_string(),
                fill(self.text.question_line, &[&prompt]),
                fill(self.text.answer_length, &[&self.tracker.len()]),
            ];
            for line in lines {
                self.outbox.send_private(&narrator, &line);
            }
            let url = fill(self.text.url_line, &[&format!("--> {}", self.config.audio.url)]);
            self.say(&url);
            self.schedule.disarm_tick();
            self.schedule
                .arm_delayed_start(self.round, now + self.config.audio.delay);
            self.phase = Phase::Narrating;
        } else {
            self.say(self.text.next);
            let line = fill(self.text.question_line, &[&prompt]);
            self.say(&line);
            let clue = fill(self.text.clue, &[&self.tracker.current_clue()]);
            self.say(&clue);
            self.clue_number = 1;
            self.started_at = Some(now);
            self.phase = Phase::Presenting;
        }
    }

    /// Narrator delay elapsed: show the first clue and start ticking.
    fn delayed_start(&mut self, round: u64, now: Instant) {
        if !self.running || round != self.round || self.phase != Phase::Narrating {
            tracing::debug!(round, current = self.round, "Ignoring stale delayed start");
            return;
        }
        self.clue_number = 1;
        self.started_at = Some(now);
        let clue = fill(self.text.clue, &[&self.tracker.current_clue()]);
        self.say(&clue);
        self.phase = Phase::Presenting;
        self.schedule.arm_tick(self.round_interval(), now, false);
    }

    fn skip(&mut self, now: Instant) {
        if !self.running {
            self.say(self.text.not_playing);
            return;
        }
        let line = fill(self.text.skipped_the_answer_was, &[&self.tracker.answer()]);
        self.say(&line);
        self.clue_number = 0;
        self.streaks.clear();
        self.phase = Phase::Resolved;
        self.schedule.clear_delayed_start();
        self.schedule.arm_tick(self.round_interval(), now, true);
    }

    fn audio(&mut self, user: &str, now: Instant) {
        self.locutor = Some(user.to_string());
        self.say(self.text.audio_on);
        self.outbox
            .send_private(user, "------------------------------------------------");
        tracing::info!(narrator = user, "Audio mode on");
        if self.running {
            self.new_question(now);
        }
    }

    fn text_mode(&mut self, now: Instant) {
        self.locutor = None;
        self.say(self.text.audio_off);
        self.schedule.clear_delayed_start();
        tracing::info!("Audio mode off");
        if self.running {
            self.schedule.arm_tick(self.round_interval(), now, false);
            self.new_question(now);
        }
    }

    fn winner(&mut self, user: &str, now: Instant) {
        let got_it = fill(self.text.user_got_it, &[&user.to_uppercase()]);
        self.say(&got_it);
        let answer = fill(self.text.the_answer_was, &[&self.tracker.answer()]);
        self.say(&answer);

        if self.frozen.contains(user) {
            let text = fill(self.text.on_frost_win, &[&user]);
            self.say(&text);
        } else {
            self.award_points(user);
        }

        let elapsed = self
            .started_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(Duration::ZERO);
        let timing = fill(
            self.text.timing,
            &[&user, &elapsed.as_secs(), &(elapsed.subsec_millis() / 10)],
        );
        self.say(&timing);
        tracing::info!(winner = user, round = self.round, elapsed_ms = elapsed.as_millis() as u64, "Question answered");

        self.save_scores();
        self.clue_number = 0;
        self.phase = Phase::Resolved;
        self.schedule.arm_tick(self.round_interval(), now, true);
    }

    fn award_points(&mut self, user: &str) {
        let award = scoring::award_for(
            user,
            self.tracker.clue_index(),
            &self.scores,
            &self.config.scoring,
        );
        if let Some(max) = award.max_points {
            let text = fill(self.text.max_point_announce, &[&max]);
            self.say(&text);
        }
        self.scores.add(user, award.points);
        let template = if award.points == 1 {
            self.text.point_added
        } else {
            self.text.points_added
        };
        let text = fill(template, &[&award.points]);
        self.say(&text);

        let mut rank_rewarded = false;
        if let Some(info) = self.scores.rank(user) {
            let text = match (&info.next_below, info.rank) {
                (_, 1) => fill(self.text.number_one, &[&user, &info.score]),
                (Some(below), rank) => fill(self.text.ranking, &[&user, &info.score, &rank, below]),
                (None, rank) => fill(self.text.ranking_last, &[&user, &info.score, &rank]),
            };
            self.say(&text);
            rank_rewarded = self.check_rank_reward(user, info.rank);
        }

        let streak = self.streaks.record_win(user);
        if self.config.rewards.enabled
            && !rank_rewarded
            && let Some(tier) = streak_reward(streak, &self.config.rewards.streak)
            && self.rewards.grant(user, tier)
        {
            let text = fill(self.text.on_streak_mode_reward, &[&user, &tier.mode_char()]);
            self.say(&text);
            let channel = self.config.irc.channel.clone();
            self.outbox.set_mode(&channel, true, tier, user);
        }
    }

    /// Grant the rank tier if it beats what the player already has.
    fn check_rank_reward(&mut self, user: &str, rank: usize) -> bool {
        if !self.config.rewards.enabled {
            return false;
        }
        let Some(tier) = rank_reward(rank, &self.config.rewards.rank) else {
            return false;
        };
        if !self.rewards.grant(user, tier) {
            return false;
        }
        let text = fill(self.text.on_rank_mode_reward, &[&user, &tier.mode_char()]);
        self.say(&text);
        let channel = self.config.irc.channel.clone();
        self.outbox.set_mode(&channel, true, tier, user);
        true
    }

    fn announce(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        self.schedule
            .arm_announcement(now + self.config.announcements.delay);
        match self.announcements.pick() {
            Some(Announcement::Ranking) => self.show_standings(None, self.config.game.standings_limit),
            Some(Announcement::Text(line)) => self.say(&line),
            None => {}
        }
    }

    /// Standings to `nick` privately, or to the channel. Five entries per line.
    fn show_standings(&mut self, nick: Option<&str>, limit: usize) {
        if self.block_rank {
            return;
        }
        let mut lines = vec![self.text.standings.trim_end().to_string()];
        for chunk in self.scores.standings(limit.max(1)).chunks(5) {
            let line = chunk
                .iter()
                .map(|s| format!("{}: {}: {}", s.rank, s.player, s.score))
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(line);
        }
        for line in lines {
            match nick {
                Some(nick) => self.outbox.send_private(nick, &line),
                None => self.say(&line),
            }
        }
    }

    // ── helpers ──

    fn round_interval(&self) -> Duration {
        if self.locutor.is_some() {
            self.config.audio.wait_interval
        } else {
            self.config.game.wait_interval
        }
    }

    fn say(&mut self, text: &str) {
        self.outbox.send_to_channel(text);
    }

    fn reply(&mut self, reply_to: &str, text: &str) {
        if reply_to == self.config.irc.channel {
            self.say(text);
        } else {
            self.outbox.send_private(reply_to, text);
        }
    }

    fn save_scores(&mut self) {
        if let Err(e) = self.store.save_scores(&self.scores.to_map()) {
            tracing::error!(error = %e, "Failed to save scores");
        }
    }

    fn save_frozen(&mut self) {
        if let Err(e) = self.store.save_frozen(&self.frozen) {
            tracing::error!(error = %e, "Failed to save freeze list");
        }
    }
}

fn is_channel(target: &str) -> bool {
    target.starts_with('#') || target.starts_with('&')
}
