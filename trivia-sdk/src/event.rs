//! Events emitted by the IRC client for the bot layer to consume.

/// Events that the SDK emits to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// TCP (and TLS, if enabled) connection is up.
    Connected,

    /// IRC registration complete. `nick` is our confirmed nick.
    Registered {
        nick: String,
    },

    /// Someone (possibly us) joined a channel.
    Joined {
        channel: String,
        nick: String,
    },

    /// Someone left a channel.
    Parted {
        channel: String,
        nick: String,
    },

    /// A user changed nick.
    NickChanged {
        old_nick: String,
        new_nick: String,
    },

    /// A user disconnected from the server.
    UserQuit {
        nick: String,
        reason: String,
    },

    /// A message in a channel or a private message.
    Message {
        from: String,
        target: String,
        text: String,
    },

    /// A CTCP message (`\x01COMMAND args\x01`), ACTION included.
    Ctcp {
        from: String,
        target: String,
        command: String,
        args: String,
    },

    /// Server notices, error numerics and MOTD lines.
    ServerNotice {
        text: String,
    },

    /// The connection ended.
    Disconnected {
        reason: String,
    },
}
