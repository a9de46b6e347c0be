//! Game state machine, timers and command handling.

mod commands;
mod schedule;
mod session;
mod vote;

pub use commands::{CommandKind, CommandRegistry, ParsedCommand, parse_command, strip_formatting};
pub use schedule::{Schedule, Timer};
pub use session::{Control, GameSession, Phase};
pub use vote::{VOTES_TO_SKIP, VoteOutcome, VoteState};
