//! Durable record I/O: atomic writes and corruption quarantine.

use herald_error::{StorageError, StorageErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{error, warn};

/// The backing file's modification time, or `None` when it does not exist.
pub(crate) async fn file_mtime(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|m| m.modified().ok())
}

/// Load and parse a JSON record.
///
/// A missing file is `Ok(None)`. An unparseable file is quarantined first
/// (the original bytes move to a `.bak` sibling, never overwritten
/// silently) and then reported as `CorruptRecord`; the next read sees no
/// record and proceeds from an empty state.
pub(crate) async fn load_record<T: DeserializeOwned>(
    path: &Path,
    guild_id: u64,
) -> Result<Option<T>, StorageError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            ))));
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(parse_err) => {
            let preserved_at = quarantine(path, guild_id, &parse_err).await;
            Err(StorageError::new(StorageErrorKind::CorruptRecord {
                guild_id,
                preserved_at: preserved_at.display().to_string(),
            }))
        }
    }
}

/// Move an unparseable record aside so its bytes survive for inspection.
/// Returns where the bytes ended up; on a failed move that is the original
/// path, which is left untouched.
async fn quarantine(path: &Path, guild_id: u64, parse_err: &serde_json::Error) -> PathBuf {
    let backup = path.with_extension("bak");
    error!(
        guild_id,
        path = %path.display(),
        backup = %backup.display(),
        %parse_err,
        "Record failed to parse, preserving original bytes"
    );
    match tokio::fs::rename(path, &backup).await {
        Ok(()) => backup,
        Err(rename_err) => {
            warn!(
                guild_id,
                path = %path.display(),
                %rename_err,
                "Could not move corrupt record aside, leaving it in place"
            );
            path.to_path_buf()
        }
    }
}

/// Persist a JSON record atomically: write the full serialized form to a
/// temporary sibling, then rename it over the target. A crash mid-write
/// leaves the previous valid record untouched.
pub(crate) async fn write_record<T: Serialize>(
    path: &Path,
    record: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(record).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: serialize: {}",
            path.display(),
            e
        )))
    })?;

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, &bytes).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    tokio::fs::rename(&temp_path, path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::Rename(format!(
            "{} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
    })?;

    Ok(())
}
