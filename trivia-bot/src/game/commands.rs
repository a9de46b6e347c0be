//! Chat command parsing and the command registry.

use std::collections::HashMap;

/// Every command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Score,
    Help,
    Source,
    Standings,
    Repeat,
    Next,
    Die,
    Restart,
    Update,
    Set,
    Start,
    Stop,
    Save,
    RankOn,
    RankOff,
    Skip,
    Audio,
    Text,
    Freeze,
    Unfreeze,
    Frostlist,
}

impl CommandKind {
    /// Admin-only commands.
    pub fn privileged(self) -> bool {
        !matches!(
            self,
            CommandKind::Score
                | CommandKind::Help
                | CommandKind::Source
                | CommandKind::Standings
                | CommandKind::Repeat
                | CommandKind::Next
        )
    }
}

/// Name and alias lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    by_name: HashMap<&'static str, CommandKind>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        use CommandKind::*;
        let by_name = [
            ("score", Score),
            ("help", Help),
            ("source", Source),
            ("rank", Standings),
            ("standings", Standings),
            ("repeat", Repeat),
            ("hint", Repeat),
            ("next", Next),
            ("die", Die),
            ("restart", Restart),
            ("update", Update),
            ("set", Set),
            ("start", Start),
            ("stop", Stop),
            ("save", Save),
            ("rankon", RankOn),
            ("rankoff", RankOff),
            ("skip", Skip),
            ("audio", Audio),
            ("text", Text),
            ("freeze", Freeze),
            ("unfreeze", Unfreeze),
            ("frostlist", Frostlist),
        ]
        .into_iter()
        .collect();
        Self { by_name }
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<CommandKind> {
        self.by_name.get(name.to_lowercase().as_str()).copied()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A line addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// `!cmd args` or `<botnick>[:,] cmd args`. Anything else is `None` and
/// counts as a guess.
pub fn parse_command(text: &str, bot_nick: &str) -> Option<ParsedCommand> {
    let text = text.trim();
    let mut words = if let Some(rest) = text.strip_prefix('!') {
        rest.split_whitespace()
    } else {
        let mut words = text.split_whitespace();
        let first = words.next()?;
        let addressed = first.trim_end_matches([':', ',']);
        if bot_nick.is_empty() || !addressed.eq_ignore_ascii_case(bot_nick) {
            return None;
        }
        words
    };
    let name = words.next()?.to_lowercase();
    Some(ParsedCommand {
        name,
        args: words.map(str::to_string).collect(),
    })
}

/// Drop control characters and mIRC formatting (including colour codes).
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x03' {
            // \x03[fg[,bg]] with one or two digits each
            skip_digits(&mut chars);
            if chars.peek() == Some(&',') {
                let mut look = chars.clone();
                look.next();
                if look.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                    skip_digits(&mut chars);
                }
            }
            continue;
        }
        if !c.is_control() {
            out.push(c);
        }
    }
    out
}

fn skip_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    for _ in 0..2 {
        if chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bang_commands() {
        let cmd = parse_command("!set alice 40", "trivia").unwrap();
        assert_eq!(cmd.name, "set");
        assert_eq!(cmd.args, vec!["alice", "40"]);
        assert_eq!(parse_command("!", "trivia"), None);
    }

    #[test]
    fn addressed_commands() {
        for line in ["trivia: score", "trivia, score", "Trivia score"] {
            let cmd = parse_command(line, "trivia").unwrap();
            assert_eq!(cmd.name, "score");
            assert!(cmd.args.is_empty());
        }
        assert_eq!(parse_command("trivia", "trivia"), None);
        assert_eq!(parse_command("triviabot score", "trivia"), None);
    }

    #[test]
    fn plain_text_is_a_guess() {
        assert_eq!(parse_command("Paris", "trivia"), None);
        assert_eq!(parse_command("", "trivia"), None);
    }

    #[test]
    fn registry_resolves_aliases() {
        let reg = CommandRegistry::new();
        assert_eq!(reg.lookup("rank"), Some(CommandKind::Standings));
        assert_eq!(reg.lookup("standings"), Some(CommandKind::Standings));
        assert_eq!(reg.lookup("HINT"), Some(CommandKind::Repeat));
        assert_eq!(reg.lookup("dance"), None);
    }

    #[test]
    fn privilege_levels() {
        assert!(!CommandKind::Next.privileged());
        assert!(!CommandKind::Score.privileged());
        assert!(CommandKind::Skip.privileged());
        assert!(CommandKind::Freeze.privileged());
    }

    #[test]
    fn formatting_is_stripped() {
        assert_eq!(strip_formatting("\x02Paris\x0f"), "Paris");
        assert_eq!(strip_formatting("\x0304,01red\x03 text"), "red text");
        assert_eq!(strip_formatting("\x0312blue"), "blue");
        assert_eq!(strip_formatting("Zürich"), "Zürich");
        assert_eq!(strip_formatting("a\x01b"), "ab");
    }
}
