//! Completed-level bookkeeping.
//!
//! The file format is a JSON object keyed by difficulty:
//!
//! ```json
//! { "easy": [0, 2], "medium": [], "hard": [] }
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Write as _},
    path::{Path, PathBuf},
};

use flowline_core::Difficulty;
use serde::{Deserialize, Serialize};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ProgressError {
    #[display("cannot access progress file: {_0}")]
    Io(io::Error),
    #[display("malformed progress file: {_0}")]
    Json(serde_json::Error),
}

/// A keyed store of completed levels.
pub trait ProgressStore {
    /// Returns the completed level ids of `difficulty`, ascending.
    fn completed_levels(&self, difficulty: Difficulty) -> Vec<u32>;

    /// Records a completed level. Recording a level twice is a no-op.
    ///
    /// Returns `true` if the level was not recorded before.
    fn mark_completed(&mut self, difficulty: Difficulty, id: u32) -> Result<bool, ProgressError>;

    /// Forgets the completed levels of `difficulty`.
    fn reset(&mut self, difficulty: Difficulty) -> Result<(), ProgressError>;

    /// Forgets every completed level.
    fn reset_all(&mut self) -> Result<(), ProgressError> {
        for difficulty in Difficulty::ALL {
            self.reset(difficulty)?;
        }
        Ok(())
    }

    fn is_completed(&self, difficulty: Difficulty, id: u32) -> bool {
        self.completed_levels(difficulty).contains(&id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedLevels(BTreeMap<Difficulty, BTreeSet<u32>>);

impl Default for CompletedLevels {
    fn default() -> Self {
        Self(
            Difficulty::ALL
                .into_iter()
                .map(|difficulty| (difficulty, BTreeSet::new()))
                .collect(),
        )
    }
}

impl CompletedLevels {
    fn levels(&self, difficulty: Difficulty) -> Vec<u32> {
        self.0
            .get(&difficulty)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    fn insert(&mut self, difficulty: Difficulty, id: u32) -> bool {
        self.0.entry(difficulty).or_default().insert(id)
    }

    fn clear(&mut self, difficulty: Difficulty) -> bool {
        self.0
            .get_mut(&difficulty)
            .is_some_and(|ids| !std::mem::take(ids).is_empty())
    }
}

/// Progress kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgress {
    levels: CompletedLevels,
}

impl ProgressStore for MemoryProgress {
    fn completed_levels(&self, difficulty: Difficulty) -> Vec<u32> {
        self.levels.levels(difficulty)
    }

    fn mark_completed(&mut self, difficulty: Difficulty, id: u32) -> Result<bool, ProgressError> {
        Ok(self.levels.insert(difficulty, id))
    }

    fn reset(&mut self, difficulty: Difficulty) -> Result<(), ProgressError> {
        self.levels.clear(difficulty);
        Ok(())
    }
}

/// Progress persisted to a JSON file, rewritten after every change.
#[derive(Debug, Clone)]
pub struct JsonFileProgress {
    path: PathBuf,
    levels: CompletedLevels,
}

impl JsonFileProgress {
    /// Opens the progress file at `path`. A missing file means no progress.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProgressError> {
        let path = path.into();
        let levels = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("no progress file at {}, starting fresh", path.display());
                CompletedLevels::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, levels })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), ProgressError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.levels)?;
        writer.flush()?;
        log::debug!("saved progress to {}", self.path.display());
        Ok(())
    }
}

impl ProgressStore for JsonFileProgress {
    fn completed_levels(&self, difficulty: Difficulty) -> Vec<u32> {
        self.levels.levels(difficulty)
    }

    fn mark_completed(&mut self, difficulty: Difficulty, id: u32) -> Result<bool, ProgressError> {
        if !self.levels.insert(difficulty, id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn reset(&mut self, difficulty: Difficulty) -> Result<(), ProgressError> {
        if self.levels.clear(difficulty) {
            self.save()?;
        }
        Ok(())
    }
}
