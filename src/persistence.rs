//! JSON snapshot of the whole scoreboard on disk.

use crate::logic::Scoreboard;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SNAPSHOT_FILE: &str = "scoreboard.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE)
}

/// Load the snapshot from `data_dir`, or `None` if there is none yet.
pub fn load(data_dir: &Path) -> Result<Option<Scoreboard>, PersistenceError> {
    let path = snapshot_path(data_dir);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let board = serde_json::from_slice(&bytes)?;
    log::info!("Loaded scoreboard from {}", path.display());
    Ok(Some(board))
}

/// Write the snapshot to `data_dir` (temp file, then rename over the old one).
pub fn save(data_dir: &Path, board: &Scoreboard) -> Result<(), PersistenceError> {
    fs::create_dir_all(data_dir)?;
    let path = snapshot_path(data_dir);
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_vec_pretty(board)?;
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &path)?;
    log::debug!("Saved scoreboard to {}", path.display());
    Ok(())
}
