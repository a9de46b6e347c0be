//! IRC line parsing (RFC 1459 framing).
//!
//! IRCv3 message tags are accepted on input and discarded.

/// A single parsed IRC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// `nick!user@host` or a server name, without the leading `:`.
    pub prefix: Option<String>,
    /// Command word or three-digit numeric.
    pub command: String,
    /// Middle parameters followed by the trailing parameter, if any.
    pub params: Vec<String>,
}

impl Message {
    /// Parse a raw line. Returns `None` for empty or command-less input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut rest = line.trim_end_matches(['\r', '\n']).trim_start();

        if rest.starts_with('@') {
            let (_, after) = rest.split_once(' ')?;
            rest = after.trim_start();
        }

        let prefix = if let Some(stripped) = rest.strip_prefix(':') {
            let (prefix, after) = stripped.split_once(' ')?;
            rest = after.trim_start();
            Some(prefix.to_string())
        } else {
            None
        };

        let (command, mut rest) = match rest.split_once(' ') {
            Some((cmd, after)) => (cmd, after),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing.to_string());
                break;
            }
            match rest.split_once(' ') {
                Some((param, after)) => {
                    params.push(param.to_string());
                    rest = after;
                }
                None => {
                    params.push(rest.to_string());
                    break;
                }
            }
        }

        Some(Self {
            prefix,
            command: command.to_ascii_uppercase(),
            params,
        })
    }

    /// Nick portion of the prefix (`nick` in `nick!user@host`).
    pub fn nick(&self) -> Option<&str> {
        self.prefix
            .as_deref()
            .and_then(|p| p.split('!').next())
            .filter(|n| !n.is_empty())
    }

    /// True when the prefix carries a hostmask, i.e. it came from a user
    /// rather than the server.
    pub fn from_user(&self) -> bool {
        self.prefix.as_deref().is_some_and(|p| p.contains('!'))
    }
}

/// Split a CTCP payload (`\x01CMD args\x01`) into command and arguments.
pub fn parse_ctcp(text: &str) -> Option<(String, String)> {
    let inner = text.strip_prefix('\x01')?;
    let inner = inner.strip_suffix('\x01').unwrap_or(inner);
    let (cmd, args) = match inner.split_once(' ') {
        Some((cmd, args)) => (cmd, args),
        None => (inner, ""),
    };
    if cmd.is_empty() {
        return None;
    }
    Some((cmd.to_ascii_uppercase(), args.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_privmsg_with_prefix() {
        let msg = Message::parse(":alice!a@host PRIVMSG #trivia :hello there\r\n").unwrap();
        assert_eq!(msg.prefix.as_deref(), Some("alice!a@host"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#trivia", "hello there"]);
        assert_eq!(msg.nick(), Some("alice"));
        assert!(msg.from_user());
    }

    #[test]
    fn parse_drops_tags() {
        let msg = Message::parse("@time=2024-01-01T00:00:00Z :bob!b@h JOIN #trivia").unwrap();
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.params, vec!["#trivia"]);
    }

    #[test]
    fn parse_ping_without_prefix() {
        let msg = Message::parse("PING :irc.example.net").unwrap();
        assert!(msg.prefix.is_none());
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["irc.example.net"]);
    }

    #[test]
    fn parse_numeric_with_many_params() {
        let msg = Message::parse(":srv 353 me = #trivia :alice @bob +carol").unwrap();
        assert_eq!(msg.command, "353");
        assert_eq!(msg.params.len(), 4);
        assert_eq!(msg.params[3], "alice @bob +carol");
        assert!(!msg.from_user());
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(Message::parse("").is_none());
        assert!(Message::parse("\r\n").is_none());
    }

    #[test]
    fn ctcp_split() {
        assert_eq!(
            parse_ctcp("\x01VERSION\x01"),
            Some(("VERSION".to_string(), String::new()))
        );
        assert_eq!(
            parse_ctcp("\x01ping 12345\x01"),
            Some(("PING".to_string(), "12345".to_string()))
        );
        assert_eq!(parse_ctcp("plain text"), None);
    }
}
