//! Periodic channel announcements.

use std::path::PathBuf;

use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Show the standings.
    Ranking,
    Text(String),
}

/// Announcement list, re-read from disk on every pick so edits apply live.
#[derive(Debug, Clone)]
pub struct Announcements {
    path: PathBuf,
    include_ranking: bool,
}

impl Announcements {
    pub fn new(path: impl Into<PathBuf>, include_ranking: bool) -> Self {
        Self {
            path: path.into(),
            include_ranking,
        }
    }

    /// Current entries. A missing or unreadable file leaves only the ranking
    /// placeholder (when enabled).
    pub fn load(&self) -> Vec<Announcement> {
        let mut entries = Vec::new();
        if self.include_ranking {
            entries.push(Announcement::Ranking);
        }
        match std::fs::read_to_string(&self.path) {
            Ok(text) => entries.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(|l| Announcement::Text(l.to_string())),
            ),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "No announcements file");
            }
        }
        entries
    }

    /// One entry chosen uniformly at random, if any.
    pub fn pick(&self) -> Option<Announcement> {
        self.load().choose(&mut rand::thread_rng()).cloned()
    }
}
