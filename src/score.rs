use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Failures reading or writing the high-score record.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Where the high score lives between runs.
pub trait HighScoreStore {
    /// Returns the stored high score, `0` when nothing has been stored yet.
    fn load(&self) -> Result<u32, ScoreError>;

    /// Replaces the stored high score.
    fn save(&mut self, score: u32) -> Result<(), ScoreError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load(&self) -> Result<u32, ScoreError> {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        (**self).save(score)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// High score kept as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct data location.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

/// Store that remembers nothing, for `--no-persist`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScoreStore;

impl HighScoreStore for NullScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(0)
    }

    fn save(&mut self, _score: u32) -> Result<(), ScoreError> {
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file = serde_json::from_str::<ScoreFile>(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;

    fs::write(path, json)?;
    Ok(())
}
