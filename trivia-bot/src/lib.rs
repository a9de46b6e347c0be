//! IRC trivia bot.
//!
//! Posts questions with progressively revealed clues, scores whoever answers
//! first and keeps standings across games.

pub mod announce;
pub mod answer;
pub mod config;
pub mod game;
pub mod output;
pub mod questions;
pub mod ranking;
pub mod scoring;
pub mod store;
pub mod strings;
