//! trivia-sdk: a small IRC client for bots.
//!
//! Handles the TCP/TLS connection, registration, keepalive and line
//! parsing, and hands the consumer a stream of [`event::Event`]s plus a
//! cloneable [`client::ClientHandle`] for sending.

pub mod client;
pub mod event;
pub mod irc;
