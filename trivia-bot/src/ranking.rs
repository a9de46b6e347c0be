//! Standings, ranks, streaks and privilege rewards.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A player's position in the standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankInfo {
    /// 1-based rank.
    pub rank: usize,
    pub score: i64,
    /// The player directly below, if any.
    pub next_below: Option<String>,
}

/// One line of the standings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub rank: usize,
    pub player: String,
    pub score: i64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    score: i64,
    seq: u64,
}

/// Cumulative scores keyed by nick (case-sensitive).
///
/// Ties in score are ordered by first insertion, so repeated queries over an
/// unchanged board always agree.
#[derive(Debug, Clone, Default)]
pub struct Scoreboard {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, player: &str) -> bool {
        self.entries.contains_key(player)
    }

    pub fn get(&self, player: &str) -> Option<i64> {
        self.entries.get(player).map(|e| e.score)
    }

    /// Add points, inserting the player on first award. Returns the new
    /// total, saturating at the `i64` bounds.
    pub fn add(&mut self, player: &str, points: i64) -> i64 {
        if let Some(entry) = self.entries.get_mut(player) {
            entry.score = entry.score.saturating_add(points);
            return entry.score;
        }
        self.insert(player, points);
        points
    }

    /// Overwrite an existing player's score. Unknown players are left alone.
    pub fn set(&mut self, player: &str, score: i64) -> bool {
        match self.entries.get_mut(player) {
            Some(entry) => {
                entry.score = score;
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, player: &str, score: i64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(player.to_string(), Entry { score, seq });
    }

    fn sorted(&self) -> Vec<(&str, i64)> {
        let mut rows: Vec<(&str, Entry)> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), *entry))
            .collect();
        rows.sort_by(|a, b| b.1.score.cmp(&a.1.score).then(a.1.seq.cmp(&b.1.seq)));
        rows.into_iter().map(|(name, e)| (name, e.score)).collect()
    }

    pub fn rank(&self, player: &str) -> Option<RankInfo> {
        let sorted = self.sorted();
        let pos = sorted.iter().position(|(name, _)| *name == player)?;
        Some(RankInfo {
            rank: pos + 1,
            score: sorted[pos].1,
            next_below: sorted.get(pos + 1).map(|(name, _)| name.to_string()),
        })
    }

    /// Top `limit` players.
    pub fn standings(&self, limit: usize) -> Vec<Standing> {
        self.sorted()
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, (player, score))| Standing {
                rank: i + 1,
                player: player.to_string(),
                score,
            })
            .collect()
    }

    /// Mean of all scores, or of the top `top` scores. `None` with no players.
    pub fn average_score(&self, top: Option<usize>) -> Option<f64> {
        let sorted = self.sorted();
        let group = match top {
            Some(n) => &sorted[..n.min(sorted.len())],
            None => &sorted[..],
        };
        if group.is_empty() {
            return None;
        }
        let sum: i128 = group.iter().map(|(_, s)| i128::from(*s)).sum();
        Some(sum as f64 / group.len() as f64)
    }

    /// Snapshot for persistence.
    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.entries
            .iter()
            .map(|(name, e)| (name.clone(), e.score))
            .collect()
    }
}

impl FromIterator<(String, i64)> for Scoreboard {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut board = Scoreboard::new();
        for (player, score) in iter {
            if !board.set(&player, score) {
                board.insert(&player, score);
            }
        }
        board
    }
}

/// Channel privilege granted as a reward, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Voice,
    Halfop,
    Op,
    Admin,
    Owner,
}

impl Tier {
    /// IRC channel mode letter.
    pub fn mode_char(self) -> char {
        match self {
            Tier::Voice => 'v',
            Tier::Halfop => 'h',
            Tier::Op => 'o',
            Tier::Admin => 'a',
            Tier::Owner => 'q',
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Voice => "voice",
            Tier::Halfop => "halfop",
            Tier::Op => "op",
            Tier::Admin => "admin",
            Tier::Owner => "owner",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown privilege tier '{0}'")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v" | "voice" => Ok(Tier::Voice),
            "h" | "halfop" => Ok(Tier::Halfop),
            "o" | "op" => Ok(Tier::Op),
            "a" | "admin" => Ok(Tier::Admin),
            "q" | "owner" => Ok(Tier::Owner),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

/// Tier for the nearest rank threshold the player is inside: the smallest
/// `min_rank` with `rank < min_rank`.
pub fn rank_reward(rank: usize, map: &BTreeMap<usize, Tier>) -> Option<Tier> {
    map.range(rank.saturating_add(1)..).next().map(|(_, tier)| *tier)
}

/// Tier for the nearest streak threshold reached: the largest
/// `min_streak <= streak`.
pub fn streak_reward(streak: u32, map: &BTreeMap<u32, Tier>) -> Option<Tier> {
    map.range(..=streak).next_back().map(|(_, tier)| *tier)
}

/// Highest tier granted to each player so far.
#[derive(Debug, Clone, Default)]
pub struct RewardState {
    granted: HashMap<String, Tier>,
}

impl RewardState {
    pub fn get(&self, player: &str) -> Option<Tier> {
        self.granted.get(player).copied()
    }

    /// Record `tier` if it is strictly higher than what the player holds.
    /// Returns whether the caller should apply the mode.
    pub fn grant(&mut self, player: &str, tier: Tier) -> bool {
        if self.get(player).is_some_and(|held| held >= tier) {
            return false;
        }
        self.granted.insert(player.to_string(), tier);
        true
    }

    /// Drop the record, e.g. after the player rejoined without modes.
    pub fn forget(&mut self, player: &str) {
        self.granted.remove(player);
    }
}

/// Consecutive correct answers.
#[derive(Debug, Clone, Default)]
pub struct Streaks {
    counts: HashMap<String, u32>,
}

impl Streaks {
    pub fn get(&self, player: &str) -> u32 {
        self.counts.get(player).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Reset everyone except `winner`, then extend the winner's streak.
    pub fn record_win(&mut self, winner: &str) -> u32 {
        self.counts.retain(|player, _| player == winner);
        let count = self.counts.entry(winner.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}
