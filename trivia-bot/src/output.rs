//! Outbound chat text.
//!
//! The game writes into an [`Outbox`] through the [`MessageSink`] trait and
//! never touches the connection. After each event the driver drains the
//! outbox into the pacer, which writes lines through the IRC client at the
//! configured line rate.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use trivia_sdk::client::ClientHandle;

use crate::ranking::Tier;
use crate::strings::colorize;

/// IRC lines are capped at 512 bytes including the prefix the server adds.
const MAX_LINE: usize = 400;

/// Where the game sends its text.
pub trait MessageSink {
    fn send_to_channel(&mut self, text: &str);
    fn send_private(&mut self, nick: &str, text: &str);
    /// CTCP ACTION.
    fn send_action(&mut self, target: &str, text: &str);
    fn set_mode(&mut self, channel: &str, grant: bool, tier: Tier, nick: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Privmsg { target: String, text: String },
    Action { target: String, text: String },
    Mode { channel: String, flags: String, nick: String },
    Join(String),
    Quit(Option<String>),
}

/// Queue of outbound lines for one game channel.
#[derive(Debug, Clone)]
pub struct Outbox {
    channel: String,
    color_code: String,
    queue: Vec<Outbound>,
}

impl Outbox {
    pub fn new(channel: &str, color_code: &str) -> Self {
        Self {
            channel: channel.to_string(),
            color_code: color_code.to_string(),
            queue: Vec::new(),
        }
    }

    pub fn push(&mut self, item: Outbound) {
        self.queue.push(item);
    }

    pub fn pending(&self) -> &[Outbound] {
        &self.queue
    }

    pub fn drain(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.queue)
    }

    fn privmsg(&mut self, target: &str, text: &str) {
        for line in wrap_lines(text, MAX_LINE) {
            self.queue.push(Outbound::Privmsg {
                target: target.to_string(),
                text: line,
            });
        }
    }
}

impl MessageSink for Outbox {
    fn send_to_channel(&mut self, text: &str) {
        let channel = self.channel.clone();
        let text = colorize(&self.color_code, text);
        self.privmsg(&channel, &text);
    }

    fn send_private(&mut self, nick: &str, text: &str) {
        self.privmsg(nick, text);
    }

    fn send_action(&mut self, target: &str, text: &str) {
        self.queue.push(Outbound::Action {
            target: target.to_string(),
            text: text.to_string(),
        });
    }

    fn set_mode(&mut self, channel: &str, grant: bool, tier: Tier, nick: &str) {
        let sign = if grant { '+' } else { '-' };
        self.queue.push(Outbound::Mode {
            channel: channel.to_string(),
            flags: format!("{sign}{}", tier.mode_char()),
            nick: nick.to_string(),
        });
    }
}

/// Spawn a task writing queued lines through `handle`, one every `line_rate`.
///
/// The task ends once the sender is dropped and the queue is empty, or when
/// the connection goes away.
pub fn spawn_pacer(
    handle: ClientHandle,
    line_rate: Duration,
) -> (mpsc::UnboundedSender<Outbound>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Outbound>();
    let task = tokio::spawn(async move {
        while let Some(item) = rx.recv().await {
            let paced = matches!(item, Outbound::Privmsg { .. } | Outbound::Action { .. });
            if let Err(e) = deliver(&handle, item).await {
                tracing::debug!(error = %e, "Pacer stopped, connection closed");
                break;
            }
            if paced && !line_rate.is_zero() {
                tokio::time::sleep(line_rate).await;
            }
        }
    });
    (tx, task)
}

async fn deliver(handle: &ClientHandle, item: Outbound) -> anyhow::Result<()> {
    match item {
        Outbound::Privmsg { target, text } => handle.privmsg(&target, &text).await,
        Outbound::Action { target, text } => handle.action(&target, &text).await,
        Outbound::Mode {
            channel,
            flags,
            nick,
        } => handle.mode(&channel, &flags, Some(&nick)).await,
        Outbound::Join(channel) => handle.join(&channel).await,
        Outbound::Quit(message) => handle.quit(message.as_deref()).await,
    }
}

/// Split text on newlines, then word-wrap anything longer than `max_len`.
pub fn wrap_lines(text: &str, max_len: usize) -> Vec<String> {
    let mut result = Vec::new();
    for line in text.lines() {
        if line.len() <= max_len {
            result.push(line.to_string());
            continue;
        }
        let mut current = String::new();
        for word in line.split_whitespace() {
            if !current.is_empty() && current.len() + word.len() + 1 > max_len {
                result.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            result.push(current);
        }
    }
    result
}
