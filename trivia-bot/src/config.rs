//! Bot configuration.
//!
//! The file is TOML. Every field is optional; missing values fall back to
//! the defaults below. [`RawConfig`] is the file as written and
//! [`GameConfig`] the validated, typed form the bot runs with.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::ranking::{Tier, UnknownTier};
use crate::scoring::{MaxPoints, RewardModel, ScoringConfig};

pub const DEFAULT_SERVER: &str = "127.0.0.1:6667";
pub const DEFAULT_NICK: &str = "trivia";
pub const DEFAULT_CHANNEL: &str = "#trivia";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("can't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("[{section}] key '{key}' is not a number")]
    NonNumericKey { section: &'static str, key: String },
    #[error("[{section}] {source}")]
    InvalidTier {
        section: &'static str,
        #[source]
        source: UnknownTier,
    },
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("channel '{0}' must start with '#' or '&'")]
    BadChannel(String),
    #[error("scoring.max_points must be an integer or \"increasing\", got '{0}'")]
    BadMaxPoints(String),
    #[error("unknown scoring model '{0}' (expected interpolated or quantile_tax)")]
    UnknownModel(String),
    #[error("scoring.base_points must be greater than zero, got {0}")]
    BadBasePoints(i64),
}

// ── file layout ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub irc: RawIrc,
    pub admin: RawAdmin,
    pub game: RawGame,
    pub audio: RawAudio,
    pub announcements: RawAnnouncements,
    pub scoring: RawScoring,
    pub rewards: RawRewards,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawIrc {
    /// host:port
    pub server: Option<String>,
    /// Auto-detected from :6697 when unset.
    pub tls: Option<bool>,
    pub tls_insecure: Option<bool>,
    pub nick: Option<String>,
    pub realname: Option<String>,
    pub channel: Option<String>,
    /// NickServ password.
    pub identify: Option<String>,
    pub line_rate_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawAdmin {
    pub owner: Option<String>,
    pub admins: Option<Vec<String>>,
    pub auto_op: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawGame {
    pub lang: Option<String>,
    pub color_code: Option<String>,
    pub wait_interval_secs: Option<u64>,
    pub questions_dir: Option<PathBuf>,
    pub questions_url: Option<String>,
    pub remote_refresh_secs: Option<u64>,
    pub save_dir: Option<PathBuf>,
    pub update_script: Option<String>,
    pub source_url: Option<String>,
    pub autostart: Option<bool>,
    pub standings_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawAudio {
    pub url: Option<String>,
    pub wait_interval_secs: Option<u64>,
    pub delay_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawAnnouncements {
    pub file: Option<PathBuf>,
    pub delay_secs: Option<u64>,
    pub ranking: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMaxPoints {
    Number(i64),
    Word(String),
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawScoring {
    pub base_points: Option<i64>,
    /// 0 disables the privilege curve.
    pub min_users_for_privilege: Option<usize>,
    pub model: Option<String>,
    pub max_points: Option<RawMaxPoints>,
    pub unprivileged_group: Option<usize>,
    /// Quantile (as a string key) to bonus points.
    pub privilege: Option<BTreeMap<String, i64>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RawRewards {
    pub enabled: Option<bool>,
    pub rank: Option<BTreeMap<String, String>>,
    pub streak: Option<BTreeMap<String, String>>,
}

// ── validated config ────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct IrcConfig {
    pub server: String,
    pub tls: bool,
    pub tls_insecure: bool,
    pub nick: String,
    pub realname: String,
    pub channel: String,
    pub identify: Option<String>,
    /// Delay between outbound lines.
    pub line_rate: Duration,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub owner: String,
    /// Admin nicks, owner included.
    pub admins: Vec<String>,
    pub auto_op: bool,
}

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub lang: String,
    pub color_code: String,
    pub wait_interval: Duration,
    pub questions_dir: PathBuf,
    pub questions_url: Option<String>,
    pub remote_refresh: Duration,
    pub save_dir: PathBuf,
    pub update_script: Option<String>,
    pub source_url: String,
    pub autostart: bool,
    pub standings_limit: usize,
}

#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub url: String,
    pub wait_interval: Duration,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct AnnouncementConfig {
    pub file: PathBuf,
    pub delay: Duration,
    pub ranking: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RewardConfig {
    pub enabled: bool,
    pub rank: BTreeMap<usize, Tier>,
    pub streak: BTreeMap<u32, Tier>,
}

/// Everything the bot reads at startup. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub irc: IrcConfig,
    pub admin: AdminConfig,
    pub game: GameSettings,
    pub audio: AudioConfig,
    pub announcements: AnnouncementConfig,
    pub scoring: ScoringConfig,
    pub rewards: RewardConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            irc: IrcConfig {
                server: DEFAULT_SERVER.to_string(),
                tls: false,
                tls_insecure: false,
                nick: DEFAULT_NICK.to_string(),
                realname: "trivia bot".to_string(),
                channel: DEFAULT_CHANNEL.to_string(),
                identify: None,
                line_rate: Duration::from_millis(200),
            },
            admin: AdminConfig {
                owner: String::new(),
                admins: Vec::new(),
                auto_op: true,
            },
            game: GameSettings {
                lang: "en".to_string(),
                color_code: String::new(),
                wait_interval: Duration::from_secs(10),
                questions_dir: PathBuf::from("questions"),
                questions_url: None,
                remote_refresh: Duration::from_secs(300),
                save_dir: PathBuf::from("savedata"),
                update_script: None,
                source_url: String::new(),
                autostart: true,
                standings_limit: 10,
            },
            audio: AudioConfig {
                url: String::new(),
                wait_interval: Duration::from_secs(10),
                delay: Duration::from_secs(10),
            },
            announcements: AnnouncementConfig {
                file: PathBuf::from("messages.txt"),
                delay: Duration::from_secs(240),
                ranking: true,
            },
            scoring: ScoringConfig::default(),
            rewards: RewardConfig {
                enabled: false,
                rank: [(10, Tier::Op), (20, Tier::Halfop), (30, Tier::Voice)].into(),
                streak: [(4, Tier::Op), (2, Tier::Halfop), (1, Tier::Voice)].into(),
            },
        }
    }
}

/// Command-line values that win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server: Option<String>,
    pub nick: Option<String>,
    pub channel: Option<String>,
    pub tls: bool,
}

impl GameConfig {
    /// Load and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
        let raw = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&text)?
        } else {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            RawConfig::default()
        };
        Self::from_raw(raw, overrides)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_raw(toml::from_str(text)?, &Overrides::default())
    }

    pub fn from_raw(raw: RawConfig, overrides: &Overrides) -> Result<Self, ConfigError> {
        let d = GameConfig::default();

        let server = overrides
            .server
            .clone()
            .or(raw.irc.server)
            .unwrap_or(d.irc.server);
        // Ensure server has a port
        let server = if server.contains(':') {
            server
        } else {
            format!("{server}:6667")
        };
        let tls = overrides.tls || raw.irc.tls.unwrap_or_else(|| server.ends_with(":6697"));
        let channel = overrides
            .channel
            .clone()
            .or(raw.irc.channel)
            .unwrap_or(d.irc.channel);
        if !channel.starts_with('#') && !channel.starts_with('&') {
            return Err(ConfigError::BadChannel(channel));
        }
        let line_rate = raw
            .irc
            .line_rate_ms
            .map(Duration::from_millis)
            .unwrap_or(d.irc.line_rate);

        let irc = IrcConfig {
            server,
            tls,
            tls_insecure: raw.irc.tls_insecure.unwrap_or(false),
            nick: overrides.nick.clone().or(raw.irc.nick).unwrap_or(d.irc.nick),
            realname: raw.irc.realname.unwrap_or(d.irc.realname),
            channel,
            identify: raw.irc.identify.filter(|s| !s.is_empty()),
            line_rate,
        };

        let owner = raw.admin.owner.unwrap_or(d.admin.owner);
        let mut admins: Vec<String> = raw
            .admin
            .admins
            .unwrap_or_default()
            .into_iter()
            .filter(|a| !a.is_empty())
            .collect();
        if !owner.is_empty() && !admins.contains(&owner) {
            admins.push(owner.clone());
        }
        if admins.is_empty() {
            tracing::warn!("No [admin] owner configured, admin commands are disabled");
        }
        let admin = AdminConfig {
            owner,
            admins,
            auto_op: raw.admin.auto_op.unwrap_or(d.admin.auto_op),
        };

        let game = GameSettings {
            lang: raw.game.lang.unwrap_or(d.game.lang),
            color_code: raw.game.color_code.unwrap_or(d.game.color_code),
            wait_interval: secs(raw.game.wait_interval_secs, d.game.wait_interval, "game.wait_interval_secs")?,
            questions_dir: raw.game.questions_dir.unwrap_or(d.game.questions_dir),
            questions_url: raw.game.questions_url.filter(|s| !s.is_empty()),
            remote_refresh: secs(raw.game.remote_refresh_secs, d.game.remote_refresh, "game.remote_refresh_secs")?,
            save_dir: raw.game.save_dir.unwrap_or(d.game.save_dir),
            update_script: raw.game.update_script.filter(|s| !s.is_empty()),
            source_url: raw.game.source_url.unwrap_or(d.game.source_url),
            autostart: raw.game.autostart.unwrap_or(d.game.autostart),
            standings_limit: raw.game.standings_limit.unwrap_or(d.game.standings_limit),
        };

        let audio = AudioConfig {
            url: raw.audio.url.unwrap_or(d.audio.url),
            wait_interval: secs(raw.audio.wait_interval_secs, d.audio.wait_interval, "audio.wait_interval_secs")?,
            delay: secs(raw.audio.delay_secs, d.audio.delay, "audio.delay_secs")?,
        };

        let announcements = AnnouncementConfig {
            file: raw.announcements.file.unwrap_or(d.announcements.file),
            delay: secs(raw.announcements.delay_secs, d.announcements.delay, "announcements.delay_secs")?,
            ranking: raw.announcements.ranking.unwrap_or(d.announcements.ranking),
        };

        let scoring = scoring_from_raw(raw.scoring, d.scoring)?;

        let rewards = RewardConfig {
            enabled: raw.rewards.enabled.unwrap_or(d.rewards.enabled),
            rank: match raw.rewards.rank {
                Some(map) => tier_map("rewards.rank", map)?,
                None => d.rewards.rank,
            },
            streak: match raw.rewards.streak {
                Some(map) => tier_map("rewards.streak", map)?,
                None => d.rewards.streak,
            },
        };

        Ok(Self {
            irc,
            admin,
            game,
            audio,
            announcements,
            scoring,
            rewards,
        })
    }

    pub fn is_admin(&self, nick: &str) -> bool {
        !nick.is_empty() && self.admin.admins.iter().any(|a| a == nick)
    }
}

fn secs(value: Option<u64>, default: Duration, field: &'static str) -> Result<Duration, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::ZeroInterval(field)),
        Some(n) => Ok(Duration::from_secs(n)),
        None => Ok(default),
    }
}

fn scoring_from_raw(raw: RawScoring, default: ScoringConfig) -> Result<ScoringConfig, ConfigError> {
    let base_points = raw.base_points.unwrap_or(default.base_points);
    if base_points <= 0 {
        return Err(ConfigError::BadBasePoints(base_points));
    }
    let max_points = match raw.max_points {
        None => MaxPoints::Increasing,
        Some(RawMaxPoints::Number(n)) => MaxPoints::Fixed(n),
        Some(RawMaxPoints::Word(w)) if w.eq_ignore_ascii_case("increasing") => MaxPoints::Increasing,
        Some(RawMaxPoints::Word(w)) => return Err(ConfigError::BadMaxPoints(w)),
    };
    let unprivileged_group = raw.unprivileged_group.unwrap_or(10);
    let model = match raw.model.as_deref().unwrap_or("interpolated") {
        "interpolated" => RewardModel::Interpolated {
            max_points,
            unprivileged_group,
        },
        "quantile_tax" => {
            let privilege = raw
                .privilege
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| Ok((numeric_key("scoring.privilege", &k)?, v)))
                .collect::<Result<BTreeMap<usize, i64>, ConfigError>>()?;
            RewardModel::QuantileTax {
                max_points,
                unprivileged_group,
                privilege,
            }
        }
        other => return Err(ConfigError::UnknownModel(other.to_string())),
    };
    Ok(ScoringConfig {
        base_points,
        min_users_for_privilege: match raw.min_users_for_privilege {
            Some(0) => None,
            Some(n) => Some(n),
            None => default.min_users_for_privilege,
        },
        model,
    })
}

fn numeric_key<T: std::str::FromStr>(section: &'static str, key: &str) -> Result<T, ConfigError> {
    key.trim().parse().map_err(|_| ConfigError::NonNumericKey {
        section,
        key: key.to_string(),
    })
}

fn tier_map<K: std::str::FromStr + Ord>(
    section: &'static str,
    raw: BTreeMap<String, String>,
) -> Result<BTreeMap<K, Tier>, ConfigError> {
    raw.into_iter()
        .map(|(k, v)| {
            let key = numeric_key(section, &k)?;
            let tier = v
                .parse::<Tier>()
                .map_err(|source| ConfigError::InvalidTier { section, source })?;
            Ok((key, tier))
        })
        .collect()
}
