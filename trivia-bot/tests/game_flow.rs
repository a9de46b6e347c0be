//! Drives a full game session with scripted questions and an in-memory store.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use trivia_bot::config::GameConfig;
use trivia_bot::game::{Control, GameSession, Phase};
use trivia_bot::output::Outbound;
use trivia_bot::questions::QuestionSource;
use trivia_bot::ranking::Tier;
use trivia_bot::store::{MemoryStore, ScoreStore};

const CHANNEL: &str = "#trivia";
const BOT: &str = "trivia";
const ADMIN: &str = "boss";

struct Scripted {
    lines: Vec<String>,
    next: usize,
}

impl Scripted {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            next: 0,
        }
    }
}

impl QuestionSource for Scripted {
    fn next_line(&mut self) -> Result<String> {
        if self.lines.is_empty() {
            bail!("no questions");
        }
        let line = self.lines[self.next % self.lines.len()].clone();
        self.next += 1;
        Ok(line)
    }
}

fn config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.irc.nick = BOT.to_string();
    cfg.irc.channel = CHANNEL.to_string();
    cfg.admin.owner = ADMIN.to_string();
    cfg.admin.admins = vec![ADMIN.to_string()];
    cfg.game.autostart = false;
    cfg.announcements.file = "/nonexistent/messages.txt".into();
    cfg
}

fn session_with(cfg: GameConfig, lines: &[&str], store: MemoryStore) -> GameSession {
    GameSession::new(cfg, Box::new(Scripted::new(lines)), Box::new(store)).unwrap()
}

fn paris() -> (GameSession, MemoryStore) {
    let store = MemoryStore::default();
    let session = session_with(config(), &["Capital of France?`Paris"], store.clone());
    (session, store)
}

/// Start and show the first question at `t0`.
fn started(session: &mut GameSession, t0: Instant) {
    session.start(t0);
    session.fire_due(t0);
    session.drain_outbox();
}

fn said_to(out: &[Outbound], target: &str) -> Vec<String> {
    out.iter()
        .filter_map(|o| match o {
            Outbound::Privmsg { target: t, text } if t == target => Some(text.clone()),
            _ => None,
        })
        .collect()
}

fn channel(out: &[Outbound]) -> Vec<String> {
    said_to(out, CHANNEL)
}

fn modes(out: &[Outbound]) -> Vec<(String, String)> {
    out.iter()
        .filter_map(|o| match o {
            Outbound::Mode { flags, nick, .. } => Some((flags.clone(), nick.clone())),
            _ => None,
        })
        .collect()
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

#[test]
fn start_presents_the_first_question() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    s.start(t0);
    assert!(s.is_running());
    s.fire_due(t0);
    let out = s.drain_outbox();
    assert_eq!(
        channel(&out),
        vec![
            "Next question:".to_string(),
            "\x02\x0303Capital of France?\x0f".to_string(),
            "Clue: *****".to_string(),
        ]
    );
    assert_eq!(s.phase(), Phase::Presenting);
    assert_eq!(s.clue_number(), 1);
    assert_eq!(s.round(), 1);
    assert_eq!(s.next_deadline(), Some(t0 + secs(10)));
}

#[test]
fn start_twice_is_a_no_op() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.start(t0 + secs(1));
    s.fire_due(t0 + secs(1));
    assert_eq!(s.round(), 1);
    assert!(s.drain_outbox().is_empty());
}

#[test]
fn clues_then_no_one_got_it() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);

    s.fire_due(t0 + secs(10));
    let out = channel(&s.drain_outbox());
    assert_eq!(out.first().map(String::as_str), Some("Question:"));
    assert_eq!(out.last().map(String::as_str), Some("Clue: P****"));
    assert_eq!(s.phase(), Phase::Clueing);

    s.fire_due(t0 + secs(20));
    assert_eq!(channel(&s.drain_outbox()).last().map(String::as_str), Some("Clue: P***s"));
    s.fire_due(t0 + secs(30));
    assert_eq!(channel(&s.drain_outbox()).last().map(String::as_str), Some("Clue: Pa*is"));
    assert_eq!(s.clue_number(), 4);

    s.fire_due(t0 + secs(40));
    let out = channel(&s.drain_outbox());
    assert_eq!(out[0], "No one got it. The answer was: Paris");
    assert!(out.contains(&"Next question:".to_string()));
    assert_eq!(s.round(), 2);
    assert_eq!(s.clue_number(), 1);
}

#[test]
fn winner_scores_and_next_round_starts_immediately() {
    let (mut s, store) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);

    let guessed = t0 + Duration::from_millis(1500);
    s.handle_message("alice", CHANNEL, "  paris ", guessed);
    let out = channel(&s.drain_outbox());
    assert_eq!(
        out,
        vec![
            "ALICE GOT IT!".to_string(),
            "If there was any doubt, the correct answer was: Paris".to_string(),
            "10 points have been added to your score!".to_string(),
            "alice is number one with 10 points!".to_string(),
            "alice answered in 1.50 seconds.".to_string(),
        ]
    );
    assert_eq!(s.score("alice"), Some(10));
    assert_eq!(s.streak("alice"), 1);
    assert_eq!(s.phase(), Phase::Resolved);
    assert_eq!(s.clue_number(), 0);
    assert_eq!(s.next_deadline(), Some(guessed));
    assert!(store.save_count() >= 1);

    // Late guesses for a resolved round do nothing
    s.handle_message("bob", CHANNEL, "Paris", guessed);
    assert_eq!(s.score("bob"), None);

    s.fire_due(guessed);
    assert_eq!(s.round(), 2);
    assert_eq!(s.phase(), Phase::Presenting);
}

#[test]
fn later_clues_are_worth_less() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.fire_due(t0 + secs(10));
    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(11));
    assert_eq!(s.score("alice"), Some(6));
}

#[test]
fn streaks_reset_for_everyone_but_the_winner() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.handle_message("alice", CHANNEL, "Paris", t0);
    s.fire_due(t0);
    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(1));
    assert_eq!(s.streak("alice"), 2);
    s.fire_due(t0 + secs(1));
    s.handle_message("bob", CHANNEL, "Paris", t0 + secs(2));
    assert_eq!(s.streak("alice"), 0);
    assert_eq!(s.streak("bob"), 1);

    // Exhausting a question clears all streaks
    s.fire_due(t0 + secs(2));
    for n in 1..=4 {
        s.fire_due(t0 + secs(2 + n * 10));
    }
    assert_eq!(s.streak("bob"), 0);
}

#[test]
fn frozen_winner_gains_nothing() {
    let store = MemoryStore::with_scores([("alice".to_string(), 5)].into());
    let mut s = session_with(config(), &["Capital of France?`Paris"], store);
    let t0 = Instant::now();
    started(&mut s, t0);

    s.handle_message(ADMIN, CHANNEL, "!freeze alice", t0);
    assert!(s.is_frozen("alice"));
    assert!(channel(&s.drain_outbox()).contains(&"alice's score is now frozen.".to_string()));

    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(1));
    let out = channel(&s.drain_outbox());
    assert!(out.contains(&"alice's score is frozen, no points this time.".to_string()));
    assert_eq!(s.score("alice"), Some(5));

    s.handle_message(ADMIN, CHANNEL, "!unfreeze alice", t0 + secs(2));
    assert!(!s.is_frozen("alice"));
    s.handle_message(ADMIN, CHANNEL, "!unfreeze alice", t0 + secs(2));
    let warnings = said_to(&s.drain_outbox(), ADMIN);
    assert!(warnings.contains(&"WARNING: alice is not frozen.".to_string()));
}

#[test]
fn frostlist_and_freeze_warnings() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    s.handle_message(ADMIN, CHANNEL, "!freeze ghost", t0);
    s.handle_message(ADMIN, CHANNEL, "!freeze ghost", t0);
    s.handle_message(ADMIN, CHANNEL, "!frostlist", t0);
    let private = said_to(&s.drain_outbox(), ADMIN);
    assert!(private.contains(&"WARNING: ghost doesn't have any score. They will be frozen anyway.".to_string()));
    assert!(private.contains(&"WARNING: ghost is already frozen.".to_string()));
    assert!(private.contains(&"The following users have frozen scores: ghost".to_string()));
}

#[test]
fn three_distinct_votes_skip_the_question() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);

    s.handle_message("amy", CHANNEL, "!next", t0);
    s.handle_message("ben", CHANNEL, "!next", t0);
    assert_eq!(s.vote_count(), 2);
    s.handle_message("amy", CHANNEL, "!next", t0);
    assert_eq!(s.vote_count(), 2);
    let out = channel(&s.drain_outbox());
    assert_eq!(
        out,
        vec![
            "amy, you have voted. 2 more votes needed to skip.".to_string(),
            "ben, you have voted. 1 more votes needed to skip.".to_string(),
            "You already voted, amy, give someone else a chance to hate this question".to_string(),
        ]
    );

    s.handle_message("cal", CHANNEL, "!next", t0 + secs(1));
    let out = channel(&s.drain_outbox());
    assert_eq!(out, vec!["Question has been skipped. The answer was: Paris".to_string()]);
    assert_eq!(s.vote_count(), 0);
    assert_eq!(s.phase(), Phase::Resolved);

    s.fire_due(t0 + secs(1));
    assert_eq!(s.round(), 2);
}

#[test]
fn voting_and_hints_need_a_running_game() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    s.handle_message("amy", CHANNEL, "!next", t0);
    s.handle_message("amy", CHANNEL, "!hint", t0);
    s.handle_message(ADMIN, CHANNEL, "!skip", t0);
    let out = channel(&s.drain_outbox());
    assert_eq!(out, vec!["We aren't playing right now.".to_string(); 3]);
    assert_eq!(s.vote_count(), 0);
}

#[test]
fn repeat_shows_current_clue_without_advancing() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.handle_message("amy", CHANNEL, "trivia: repeat", t0);
    let out = channel(&s.drain_outbox());
    assert_eq!(out.last().map(String::as_str), Some("Clue: *****"));
    assert_eq!(s.clue_number(), 1);
}

#[test]
fn admin_commands_are_refused_for_players() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.handle_message("bob", CHANNEL, "!skip", t0);
    let out = channel(&s.drain_outbox());
    assert_eq!(out, vec!["bob: You don't tell me what to do.".to_string()]);
    assert_eq!(s.phase(), Phase::Presenting);
}

#[test]
fn unknown_commands_get_an_odd_look() {
    let (mut s, _) = paris();
    s.handle_message("bob", CHANNEL, "!dance", Instant::now());
    assert_eq!(
        s.drain_outbox(),
        vec![Outbound::Action {
            target: CHANNEL.into(),
            text: "looks at bob oddly.".into()
        }]
    );
}

#[test]
fn private_answers_are_redirected() {
    let (mut s, _) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.handle_message("alice", BOT, "Paris", t0);
    let out = s.drain_outbox();
    assert_eq!(
        said_to(&out, "alice"),
        vec!["I'm sorry, answers must be given in the game channel.".to_string()]
    );
    assert_eq!(s.score("alice"), None);
    assert_eq!(s.phase(), Phase::Presenting);
}

#[test]
fn stop_thanks_players_and_clears_timers() {
    let store = MemoryStore::with_scores([("alice".to_string(), 30), ("bob".to_string(), 20)].into());
    let mut s = session_with(config(), &["Q?`A"], store.clone());
    let t0 = Instant::now();
    started(&mut s, t0);

    s.handle_message(ADMIN, CHANNEL, "!stop", t0);
    let out = channel(&s.drain_outbox());
    assert_eq!(
        out,
        vec![
            "Thanks for playing trivia!".to_string(),
            "Current rankings were:".to_string(),
            "The current trivia standings are:".to_string(),
            "1: alice: 30 | 2: bob: 20".to_string(),
            "Scores have been saved, and see you next game!".to_string(),
        ]
    );
    assert_eq!(s.phase(), Phase::Idle);
    assert!(!s.is_running());
    assert_eq!(s.next_deadline(), None);
    assert!(store.save_count() >= 1);

    s.handle_message(ADMIN, CHANNEL, "!stop", t0);
    assert!(s.drain_outbox().is_empty());
}

#[test]
fn standings_are_grouped_and_can_be_blocked() {
    let scores: BTreeMap<String, i64> = (1..=7).map(|i| (format!("p{i}"), i * 10)).collect();
    let mut s = session_with(config(), &["Q?`A"], MemoryStore::with_scores(scores));
    let t0 = Instant::now();

    s.handle_message("amy", CHANNEL, "!standings", t0);
    let private = said_to(&s.drain_outbox(), "amy");
    assert_eq!(private.len(), 3);
    assert_eq!(
        private[1],
        "1: p7: 70 | 2: p6: 60 | 3: p5: 50 | 4: p4: 40 | 5: p3: 30"
    );
    assert_eq!(private[2], "6: p2: 20 | 7: p1: 10");

    s.handle_message("amy", CHANNEL, "!rank 2", t0);
    let private = said_to(&s.drain_outbox(), "amy");
    assert_eq!(private[1], "1: p7: 70 | 2: p6: 60");

    s.handle_message(ADMIN, CHANNEL, "!rankoff", t0);
    assert!(s.rank_blocked());
    s.drain_outbox();
    s.handle_message("amy", CHANNEL, "!standings", t0);
    assert!(s.drain_outbox().is_empty());
}

#[test]
fn score_and_set_score() {
    let store = MemoryStore::with_scores([("alice".to_string(), 12)].into());
    let mut s = session_with(config(), &["Q?`A"], store);
    let t0 = Instant::now();

    s.handle_message("alice", CHANNEL, "!score", t0);
    s.handle_message("zed", CHANNEL, "!score", t0);
    let out = s.drain_outbox();
    assert_eq!(said_to(&out, "alice"), vec!["Your current score is: 12".to_string()]);
    assert_eq!(said_to(&out, "zed"), vec!["You aren't in my database.".to_string()]);

    s.handle_message(ADMIN, CHANNEL, "!set zed 40", t0);
    s.handle_message(ADMIN, CHANNEL, "!set alice lots", t0);
    s.handle_message(ADMIN, CHANNEL, "!set alice 99", t0);
    let private = said_to(&s.drain_outbox(), ADMIN);
    assert_eq!(
        private,
        vec![
            "zed not in scores database.".to_string(),
            "Usage: set <user> <score>".to_string(),
            "alice score set to 99".to_string(),
        ]
    );
    assert_eq!(s.score("zed"), None);
    assert_eq!(s.score("alice"), Some(99));
}

#[test]
fn winning_at_the_score_ceiling_keeps_the_ceiling() {
    let store = MemoryStore::with_scores([("alice".to_string(), 5), ("bob".to_string(), 1)].into());
    let mut s = session_with(config(), &["Capital of France?`Paris"], store.clone());
    let t0 = Instant::now();
    started(&mut s, t0);

    s.handle_message(ADMIN, CHANNEL, &format!("!set alice {}", i64::MAX), t0);
    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(3));
    assert_eq!(s.score("alice"), Some(i64::MAX));
    assert_eq!(s.score("bob"), Some(1));
    assert_eq!(store.load_scores().unwrap().get("alice"), Some(&i64::MAX));
}

#[test]
fn narrator_mode_delays_clues_and_ignores_stale_starts() {
    let mut cfg = config();
    cfg.audio.url = "https://radio.example/stream.ogg".into();
    let mut session = session_with(cfg, &["Capital of France?`Paris"], MemoryStore::default());
    let s = &mut session;

    let t0 = Instant::now();
    started(s, t0);
    s.handle_message(ADMIN, CHANNEL, "!audio", t0);
    let out = s.drain_outbox();
    assert_eq!(s.locutor(), Some(ADMIN));
    assert_eq!(s.phase(), Phase::Narrating);
    assert_eq!(s.clue_number(), 0);
    assert_eq!(s.round(), 2);
    assert_eq!(s.schedule().tick_interval(), None);
    assert!(said_to(&out, ADMIN).contains(&"5 characters".to_string()));
    assert!(channel(&out).contains(&"\x0312--> https://radio.example/stream.ogg\x0f".to_string()));

    // Guesses are not accepted before the first clue
    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(1));
    assert_eq!(s.score("alice"), None);

    // A skip starts round 3; round 2's delayed start must not fire
    s.handle_message(ADMIN, CHANNEL, "!skip", t0 + secs(1));
    s.fire_due(t0 + secs(1));
    assert_eq!(s.round(), 3);
    assert_eq!(s.schedule().delayed_start().map(|(r, _)| r), Some(3));
    s.drain_outbox();

    s.fire_due(t0 + secs(10));
    assert_eq!(s.phase(), Phase::Narrating);
    assert!(s.drain_outbox().is_empty());

    s.fire_due(t0 + secs(11));
    assert_eq!(s.phase(), Phase::Presenting);
    assert_eq!(s.clue_number(), 1);
    assert_eq!(channel(&s.drain_outbox()), vec!["Clue: *****".to_string()]);
    assert_eq!(s.next_deadline(), Some(t0 + secs(21)));

    // Text mode: immediate question, text interval
    s.handle_message(ADMIN, CHANNEL, "!text", t0 + secs(12));
    assert_eq!(s.locutor(), None);
    assert_eq!(s.phase(), Phase::Presenting);
    assert_eq!(s.schedule().tick_interval(), Some(secs(10)));
    assert_eq!(s.schedule().delayed_start(), None);
}

#[test]
fn empty_question_bank_stops_the_game() {
    let mut s = session_with(config(), &["broken line", "also`broken`"], MemoryStore::default());
    let t0 = Instant::now();
    s.start(t0);
    s.fire_due(t0);
    let out = channel(&s.drain_outbox());
    assert_eq!(out, vec!["The question bank is unavailable, stopping the game.".to_string()]);
    assert!(!s.is_running());
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn streak_rewards_upgrade_and_never_downgrade() {
    let mut cfg = config();
    cfg.rewards.enabled = true;
    cfg.rewards.rank = BTreeMap::new();
    cfg.rewards.streak = [(1, Tier::Voice), (2, Tier::Halfop)].into();
    let mut s = session_with(cfg, &["Capital of France?`Paris"], MemoryStore::default());
    let t0 = Instant::now();
    started(&mut s, t0);

    s.handle_message("alice", CHANNEL, "Paris", t0);
    assert_eq!(s.granted_tier("alice"), Some(Tier::Voice));
    let out = s.drain_outbox();
    assert_eq!(modes(&out), vec![("+v".to_string(), "alice".to_string())]);
    assert!(channel(&out).contains(&"alice is on a streak and earns +v!".to_string()));

    s.fire_due(t0);
    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(1));
    assert_eq!(s.granted_tier("alice"), Some(Tier::Halfop));
    assert_eq!(modes(&s.drain_outbox()), vec![("+h".to_string(), "alice".to_string())]);

    s.fire_due(t0 + secs(1));
    s.handle_message("alice", CHANNEL, "Paris", t0 + secs(2));
    assert_eq!(s.granted_tier("alice"), Some(Tier::Halfop));
    assert!(modes(&s.drain_outbox()).is_empty());
}

#[test]
fn rank_reward_suppresses_streak_reward() {
    let mut cfg = config();
    cfg.rewards.enabled = true;
    cfg.rewards.rank = [(10, Tier::Op)].into();
    cfg.rewards.streak = [(1, Tier::Voice)].into();
    let mut s = session_with(cfg, &["Capital of France?`Paris"], MemoryStore::default());
    let t0 = Instant::now();
    started(&mut s, t0);
    s.handle_message("alice", CHANNEL, "Paris", t0);
    assert_eq!(modes(&s.drain_outbox()), vec![("+o".to_string(), "alice".to_string())]);
    assert_eq!(s.granted_tier("alice"), Some(Tier::Op));
}

#[test]
fn joins_reapply_rank_rewards_and_op_admins() {
    let mut cfg = config();
    cfg.rewards.enabled = true;
    cfg.rewards.rank = [(10, Tier::Op), (20, Tier::Voice)].into();
    let store = MemoryStore::with_scores([("alice".to_string(), 50)].into());
    let mut s = session_with(cfg, &["Q?`A"], store);

    s.user_joined(CHANNEL, "alice");
    assert_eq!(modes(&s.drain_outbox()), vec![("+o".to_string(), "alice".to_string())]);
    // Rejoining forgets the old grant, so it is applied again
    s.user_joined(CHANNEL, "alice");
    assert_eq!(modes(&s.drain_outbox()), vec![("+o".to_string(), "alice".to_string())]);

    s.user_joined(CHANNEL, ADMIN);
    assert_eq!(modes(&s.drain_outbox()), vec![("+o".to_string(), ADMIN.to_string())]);

    s.user_joined(CHANNEL, "stranger");
    s.user_joined("#elsewhere", "alice");
    s.user_joined(CHANNEL, BOT);
    assert!(modes(&s.drain_outbox()).is_empty());
}

#[test]
fn die_and_restart_request_control() {
    let (mut s, store) = paris();
    let t0 = Instant::now();
    started(&mut s, t0);
    s.handle_message(ADMIN, CHANNEL, "!restart", t0);
    assert_eq!(s.take_control(), Some(Control::Restart));
    assert!(
        s.drain_outbox()
            .contains(&Outbound::Quit(Some("Triviabot restarting.".into())))
    );
    assert!(store.save_count() >= 1);
    assert_eq!(s.next_deadline(), None);

    s.handle_message(ADMIN, BOT, "trivia die", t0);
    assert_eq!(s.take_control(), Some(Control::Quit));
    assert_eq!(s.take_control(), None);
}

#[test]
fn sign_on_joins_greets_and_resumes_after_disconnect() {
    let mut cfg = config();
    cfg.irc.identify = Some("sekrit".into());
    let mut s = session_with(cfg, &["Capital of France?`Paris"], MemoryStore::default());
    let t0 = Instant::now();

    s.signed_on(BOT, t0);
    let out = s.drain_outbox();
    assert_eq!(out[0], Outbound::Join(CHANNEL.into()));
    assert_eq!(said_to(&out, "NickServ"), vec!["identify sekrit".to_string()]);
    assert!(channel(&out).contains(&"Welcome to #trivia!".to_string()));
    assert!(!s.is_running());

    started(&mut s, t0);
    s.suspend();
    assert!(!s.is_running());
    assert_eq!(s.next_deadline(), None);

    s.signed_on(BOT, t0 + secs(30));
    assert!(s.is_running());
    s.fire_due(t0 + secs(30));
    assert_eq!(s.phase(), Phase::Presenting);
}

#[test]
fn announcements_fire_on_their_own_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.txt");
    std::fs::write(&path, "Visit our website!\n").unwrap();
    let mut cfg = config();
    cfg.announcements.file = path;
    cfg.announcements.ranking = false;
    let mut s = session_with(cfg, &["Capital of France?`Paris"], MemoryStore::default());
    let t0 = Instant::now();
    started(&mut s, t0);

    s.fire_due(t0 + secs(239));
    let out = channel(&s.drain_outbox());
    assert!(!out.contains(&"Visit our website!".to_string()));

    s.fire_due(t0 + secs(240));
    let out = channel(&s.drain_outbox());
    assert!(out.contains(&"Visit our website!".to_string()));
    assert_eq!(
        s.schedule().next_deadline().map(|d| d > t0 + secs(240)),
        Some(true)
    );
}
