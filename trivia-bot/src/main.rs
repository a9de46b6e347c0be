//! trivia-bot: an IRC trivia game.
//!
//! Connects to one server, plays in one channel. Settings come from a TOML
//! file (see `trivia.example.toml`); a few can be overridden on the command
//! line. Reconnects with back-off when the connection drops.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use trivia_sdk::client::{self, ConnectConfig, ReconnectConfig};
use trivia_sdk::event::Event;

use trivia_bot::config::{GameConfig, Overrides};
use trivia_bot::game::{Control, GameSession};
use trivia_bot::output::{self, Outbound};
use trivia_bot::questions::{self, QuestionBank};
use trivia_bot::store::JsonStore;

/// How long to wait for the server to close the link after QUIT.
const QUIT_GRACE: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "trivia-bot", about = "IRC trivia game bot")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, short, default_value = "trivia.toml", env = "TRIVIA_CONFIG")]
    config: PathBuf,

    /// IRC server address (host:port), overrides the config file
    #[arg(long)]
    server: Option<String>,

    /// Bot nick, overrides the config file
    #[arg(long)]
    nick: Option<String>,

    /// Game channel, overrides the config file
    #[arg(long)]
    channel: Option<String>,

    /// Use TLS
    #[arg(long)]
    tls: bool,
}

/// Why the connection loop ended.
enum Outcome {
    Control(Control),
    Disconnected(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trivia_bot=info,trivia_sdk=info".into()),
        )
        .init();

    let args = Args::parse();
    let overrides = Overrides {
        server: args.server.clone(),
        nick: args.nick.clone(),
        channel: args.channel.clone(),
        tls: args.tls,
    };

    loop {
        let config = GameConfig::load(&args.config, &overrides)
            .with_context(|| format!("loading {}", args.config.display()))?;
        let update_script = config.game.update_script.clone();

        match run(config).await? {
            Control::Restart => {
                tracing::info!("Restarting with fresh configuration");
                continue;
            }
            Control::Update => {
                run_update_script(update_script.as_deref());
                break;
            }
            Control::Quit => break,
        }
    }

    Ok(())
}

/// Play until an admin (or Ctrl+C) ends the session.
async fn run(config: GameConfig) -> Result<Control> {
    tracing::info!(
        server = %config.irc.server,
        nick = %config.irc.nick,
        channel = %config.irc.channel,
        "Starting trivia-bot"
    );

    let bank = QuestionBank::new(&config.game.questions_dir);
    let refresher = config.game.questions_url.clone().map(|url| {
        questions::spawn_remote_refresh(url, config.game.remote_refresh, bank.remote_cache())
    });
    let store = JsonStore::new(&config.game.save_dir);
    let mut session = GameSession::new(config.clone(), Box::new(bank), Box::new(store))
        .context("loading saved game")?;

    let connect = ConnectConfig {
        server_addr: config.irc.server.clone(),
        nick: config.irc.nick.clone(),
        user: config.irc.nick.clone(),
        realname: config.irc.realname.clone(),
        tls: config.irc.tls,
        tls_insecure: config.irc.tls_insecure,
    };
    let reconnect = ReconnectConfig::default();
    let mut delay = reconnect.initial_delay;

    let control = loop {
        let conn = match client::establish_connection(&connect).await {
            Ok(conn) => {
                delay = reconnect.initial_delay;
                conn
            }
            Err(e) => {
                tracing::warn!(error = %e, retry_in = ?delay, "Connection failed");
                if wait_or_interrupt(delay).await {
                    break Control::Quit;
                }
                delay = reconnect.next_delay(delay);
                continue;
            }
        };

        let (handle, mut events) = client::connect_with_stream(conn, connect.clone());
        let (pacer, pacer_task) = output::spawn_pacer(handle, config.irc.line_rate);

        match drive(&mut session, &mut events, &pacer).await {
            Outcome::Control(control) => {
                // Let the pacer deliver the QUIT, then wait for the server to hang up
                drop(pacer);
                let _ = tokio::time::timeout(QUIT_GRACE, async {
                    let _ = pacer_task.await;
                    while let Some(event) = events.recv().await {
                        if matches!(event, Event::Disconnected { .. }) {
                            break;
                        }
                    }
                })
                .await;
                break control;
            }
            Outcome::Disconnected(reason) => {
                tracing::warn!(reason = %reason, retry_in = ?delay, "Disconnected");
                session.suspend();
                pacer_task.abort();
                if wait_or_interrupt(delay).await {
                    break Control::Quit;
                }
                delay = reconnect.next_delay(delay);
            }
        }
    };

    if let Some(task) = refresher {
        task.abort();
    }
    Ok(control)
}

/// Event loop for one connection.
async fn drive(
    session: &mut GameSession,
    events: &mut mpsc::Receiver<Event>,
    pacer: &mpsc::UnboundedSender<Outbound>,
) -> Outcome {
    loop {
        let deadline = session.next_deadline();
        tokio::select! {
            event = events.recv() => match event {
                Some(Event::Disconnected { reason }) => return Outcome::Disconnected(reason),
                Some(event) => handle_event(session, event),
                None => return Outcome::Disconnected("event channel closed".to_string()),
            },
            _ = sleep_until(deadline) => session.fire_due(Instant::now()),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, signing off");
                session.quit();
            }
        }

        for item in session.drain_outbox() {
            if pacer.send(item).is_err() {
                tracing::warn!("Pacer gone, dropping outbound lines");
                break;
            }
        }
        if let Some(control) = session.take_control() {
            return Outcome::Control(control);
        }
    }
}

fn handle_event(session: &mut GameSession, event: Event) {
    match event {
        Event::Connected => tracing::info!("Connected"),
        Event::Registered { nick } => session.signed_on(&nick, Instant::now()),
        Event::Joined { channel, nick } => session.user_joined(&channel, &nick),
        Event::NickChanged { old_nick, new_nick } => session.nick_changed(&old_nick, &new_nick),
        Event::Message { from, target, text } => {
            tracing::debug!(from = %from, target = %target, text = %text, "Message");
            session.handle_message(&from, &target, &text, Instant::now());
        }
        Event::Ctcp {
            from, command, args, ..
        } => tracing::debug!(from = %from, command = %command, args = %args, "CTCP received"),
        Event::ServerNotice { text } => tracing::debug!(text = %text, "Server notice"),
        Event::Parted { .. } | Event::UserQuit { .. } | Event::Disconnected { .. } => {}
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

/// Sleep for `delay`. Returns true if Ctrl+C arrived first.
async fn wait_or_interrupt(delay: Duration) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => false,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted while reconnecting");
            true
        }
    }
}

fn run_update_script(script: Option<&str>) {
    let Some(script) = script else {
        tracing::warn!("Update requested but no update_script is configured");
        return;
    };
    match std::process::Command::new("sh").arg("-c").arg(script).spawn() {
        Ok(child) => tracing::info!(pid = child.id(), script, "Update script launched"),
        Err(e) => tracing::error!(error = %e, script, "Failed to launch update script"),
    }
}
