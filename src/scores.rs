use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

const FILE_NAME: &str = "high_score.json";

/// The persisted high score: a single JSON number in a file.
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location, next to the executable.
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(FILE_NAME);
            }
        }
        PathBuf::from(FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score. A missing or unreadable file counts as 0.
    pub fn load(&self) -> u32 {
        if !self.path.exists() {
            info!("no high score at {}, starting from 0", self.path.display());
            return 0;
        }
        match self.read() {
            Ok(score) => score,
            Err(err) => {
                warn!("ignoring high score file: {err:#}");
                0
            }
        }
    }

    fn read(&self) -> Result<u32> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let score = serde_json::from_str(data.trim())
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(score)
    }

    pub fn save(&self, high_score: u32) -> Result<()> {
        let json = serde_json::to_string(&high_score)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        info!("saved high score {high_score} to {}", self.path.display());
        Ok(())
    }
}
