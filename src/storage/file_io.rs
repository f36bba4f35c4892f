//! Whole-document JSON files
//!
//! `users.json` is small enough to be read in one go and rewritten in one go.
//! Writes land in a sibling `.json.tmp` file that is synced and then renamed
//! over the target, so a crash leaves either the old document or the new one.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SonnicError, SonnicResult};

fn storage_error(action: &str, path: &Path, err: impl fmt::Display) -> SonnicError {
    SonnicError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read a JSON document; a missing file reads as `T::default()`
pub fn read_json<T>(path: &Path) -> SonnicResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace a JSON document atomically
pub fn write_json_atomic<T>(path: &Path, value: &T) -> SonnicResult<()>
where
    T: Serialize + ?Sized,
{
    let bytes =
        serde_json::to_vec_pretty(value).map_err(|e| storage_error("serialize", path, e))?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory for", path, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let written = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(storage_error("write", path, e));
    }

    Ok(())
}
