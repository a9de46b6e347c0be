//! Score and freeze-list persistence.
//!
//! `scores.json` is a flat object of nick to score; `freeze.json` a list of
//! nicks. Missing files load as empty state.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;

pub const SCORES_FILE: &str = "scores.json";
pub const FREEZE_FILE: &str = "freeze.json";

pub trait ScoreStore: Send {
    fn load_scores(&self) -> Result<BTreeMap<String, i64>>;
    fn save_scores(&self, scores: &BTreeMap<String, i64>) -> Result<()>;
    fn load_frozen(&self) -> Result<BTreeSet<String>>;
    fn save_frozen(&self, frozen: &BTreeSet<String>) -> Result<()>;
}

/// JSON files under a save directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read<T: serde::de::DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        if !path.exists() {
            tracing::info!(path = %path.display(), "No save file yet");
            return Ok(T::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    fn write<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.dir.join(name);
        let tmp = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(value)?;
        std::fs::write(&tmp, text).with_context(|| format!("writing {}", tmp.display()))?;
        std::fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

impl ScoreStore for JsonStore {
    fn load_scores(&self) -> Result<BTreeMap<String, i64>> {
        self.read(SCORES_FILE)
    }

    fn save_scores(&self, scores: &BTreeMap<String, i64>) -> Result<()> {
        self.write(SCORES_FILE, scores)?;
        tracing::debug!(players = scores.len(), "Scores saved");
        Ok(())
    }

    fn load_frozen(&self) -> Result<BTreeSet<String>> {
        let list: Vec<String> = self.read(FREEZE_FILE)?;
        Ok(list.into_iter().collect())
    }

    fn save_frozen(&self, frozen: &BTreeSet<String>) -> Result<()> {
        let list: Vec<&String> = frozen.iter().collect();
        self.write(FREEZE_FILE, &list)
    }
}

/// In-process store, shared by clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: std::sync::Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    scores: BTreeMap<String, i64>,
    frozen: BTreeSet<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn with_scores(scores: BTreeMap<String, i64>) -> Self {
        let store = Self::default();
        store.inner.lock().scores = scores;
        store
    }

    /// Number of `save_scores` calls so far.
    pub fn save_count(&self) -> usize {
        self.inner.lock().saves
    }
}

impl ScoreStore for MemoryStore {
    fn load_scores(&self) -> Result<BTreeMap<String, i64>> {
        Ok(self.inner.lock().scores.clone())
    }

    fn save_scores(&self, scores: &BTreeMap<String, i64>) -> Result<()> {
        let mut state = self.inner.lock();
        state.scores = scores.clone();
        state.saves += 1;
        Ok(())
    }

    fn load_frozen(&self) -> Result<BTreeSet<String>> {
        Ok(self.inner.lock().frozen.clone())
    }

    fn save_frozen(&self, frozen: &BTreeSet<String>) -> Result<()> {
        self.inner.lock().frozen = frozen.clone();
        Ok(())
    }
}
