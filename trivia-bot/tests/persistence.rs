//! Scores and the freeze list survive a restart through the JSON store.

use std::time::Instant;

use anyhow::Result;
use trivia_bot::config::GameConfig;
use trivia_bot::game::GameSession;
use trivia_bot::questions::QuestionSource;
use trivia_bot::store::{JsonStore, ScoreStore};

struct OneQuestion;

impl QuestionSource for OneQuestion {
    fn next_line(&mut self) -> Result<String> {
        Ok("Largest planet?`Jupiter".to_string())
    }
}

fn config() -> GameConfig {
    let mut cfg = GameConfig::default();
    cfg.irc.nick = "trivia".into();
    cfg.admin.owner = "boss".into();
    cfg.admin.admins = vec!["boss".into()];
    cfg.game.autostart = false;
    cfg.announcements.file = "/nonexistent/messages.txt".into();
    cfg
}

fn session(dir: &std::path::Path) -> GameSession {
    GameSession::new(config(), Box::new(OneQuestion), Box::new(JsonStore::new(dir))).unwrap()
}

#[test]
fn scores_and_freezes_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let t0 = Instant::now();

    let mut first = session(dir.path());
    first.start(t0);
    first.fire_due(t0);
    first.handle_message("alice", "#trivia", "jupiter", t0);
    first.handle_message("boss", "#trivia", "!freeze bob", t0);
    assert_eq!(first.score("alice"), Some(10));
    drop(first);

    let second = session(dir.path());
    assert_eq!(second.score("alice"), Some(10));
    assert!(second.is_frozen("bob"));
    assert!(!second.is_running());
}

#[test]
fn fresh_directory_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("not-yet"));
    assert!(store.load_scores().unwrap().is_empty());
    assert!(store.load_frozen().unwrap().is_empty());

    let s = session(&dir.path().join("not-yet"));
    assert_eq!(s.score("anyone"), None);
}

#[test]
fn corrupt_scores_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("scores.json"), "{not json").unwrap();
    let result = GameSession::new(
        config(),
        Box::new(OneQuestion),
        Box::new(JsonStore::new(dir.path())),
    );
    assert!(result.is_err());
}
