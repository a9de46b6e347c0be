//! Question records and where they come from.
//!
//! A record is one line, `prompt`answer`, split on the single backtick.
//! Local banks are directories of such files; a remote URL may serve the
//! same format and is cached by a background refresher.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use parking_lot::RwLock;
use rand::seq::SliceRandom;

/// How many damaged records are skipped before giving up on a draw.
pub const MAX_DRAW_ATTEMPTS: usize = 32;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QuestionError {
    #[error("expected exactly one '`' delimiter, found {0}")]
    Delimiters(usize),
    #[error("empty prompt")]
    EmptyPrompt,
    #[error("empty answer")]
    EmptyAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answer: String,
}

impl Question {
    pub fn parse(line: &str) -> Result<Self, QuestionError> {
        let delimiters = line.matches('`').count();
        if delimiters != 1 {
            return Err(QuestionError::Delimiters(delimiters));
        }
        let (prompt, answer) = line.split_once('`').ok_or(QuestionError::Delimiters(0))?;
        let prompt = prompt.trim();
        let answer = answer.trim();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if answer.is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        Ok(Self {
            prompt: prompt.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// Supplies raw question records.
pub trait QuestionSource: Send {
    fn next_line(&mut self) -> Result<String>;
}

/// Draw until a record parses, up to [`MAX_DRAW_ATTEMPTS`].
pub fn draw(source: &mut dyn QuestionSource) -> Result<Question> {
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        let line = source.next_line()?;
        match Question::parse(&line) {
            Ok(q) => return Ok(q),
            Err(e) => tracing::warn!(attempt, line = %line, error = %e, "Damaged question"),
        }
    }
    bail!("no usable question after {MAX_DRAW_ATTEMPTS} attempts")
}

/// Remote records shared with the refresher task.
pub type RemoteCache = Arc<RwLock<Vec<String>>>;

/// Random line from a random file in `dir`, or from the remote cache when
/// it holds anything.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    dir: PathBuf,
    remote: RemoteCache,
}

impl QuestionBank {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            remote: RemoteCache::default(),
        }
    }

    pub fn remote_cache(&self) -> RemoteCache {
        self.remote.clone()
    }

    fn local_line(&self) -> Result<String> {
        let mut files = Vec::new();
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("reading question dir {}", self.dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        let mut rng = rand::thread_rng();
        let file = files
            .choose(&mut rng)
            .with_context(|| format!("no question files in {}", self.dir.display()))?;
        let lines = read_lines(file)?;
        lines
            .choose(&mut rng)
            .cloned()
            .with_context(|| format!("{} is empty", file.display()))
    }
}

impl QuestionSource for QuestionBank {
    fn next_line(&mut self) -> Result<String> {
        {
            let remote = self.remote.read();
            if let Some(line) = remote.choose(&mut rand::thread_rng()) {
                return Ok(line.clone());
            }
        }
        self.local_line()
    }
}

/// Non-empty lines of a question file. Invalid UTF-8 is replaced, not fatal.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect())
}

/// Keep `cache` filled from `url`, refreshing every `period`. A failed fetch
/// empties the cache so draws fall back to the local bank.
pub fn spawn_remote_refresh(url: String, period: Duration, cache: RemoteCache) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let http = match reqwest::Client::builder().timeout(FETCH_TIMEOUT).build() {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Can't build HTTP client, remote questions disabled");
                return;
            }
        };
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            match fetch(&http, &url).await {
                Ok(lines) => {
                    tracing::info!(url = %url, count = lines.len(), "Loaded remote questions");
                    *cache.write() = lines;
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Remote questions unavailable, using local bank");
                    cache.write().clear();
                }
            }
        }
    })
}

async fn fetch(http: &reqwest::Client, url: &str) -> Result<Vec<String>> {
    let body = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect())
}
