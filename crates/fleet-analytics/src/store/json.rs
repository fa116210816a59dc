//! JSON file snapshot store.
//!
//! Persists the whole snapshot as one JSON document. `replace` writes to a
//! hidden temporary file in the same directory and renames it over the
//! target, so the published file is never partially written and readers
//! that lose the race still see the previous complete snapshot.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use fleet_data::Snapshot;

use crate::ports::{SnapshotStore, SnapshotStoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Snapshot store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonSnapshotStore {
    dir: Dir,
    file_name: String,
    display_path: String,
}

impl JsonSnapshotStore {
    /// Opens a store whose snapshot lives at `path`.
    ///
    /// The parent directory must already exist; the snapshot file itself
    /// appears on the first `replace`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotStoreError::Io`] when `path` does not name a file
    /// or its parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SnapshotStoreError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| SnapshotStoreError::io(path.as_str(), "path must name a file"))?;
        let dir = Dir::open_ambient_dir(parent.as_std_path(), ambient_authority())
            .map_err(|err| SnapshotStoreError::io(parent.as_str(), err.to_string()))?;

        Ok(Self {
            dir,
            file_name: file_name.to_owned(),
            display_path: path.as_str().to_owned(),
        })
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn replace(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        let payload = serde_json::to_string_pretty(snapshot)
            .map_err(|err| SnapshotStoreError::serialisation(err.to_string()))?;
        write_atomic(&self.dir, &self.file_name, &self.display_path, &payload)
    }

    fn load(&self) -> Result<Snapshot, SnapshotStoreError> {
        let contents = self
            .dir
            .read_to_string(&self.file_name)
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => SnapshotStoreError::Missing,
                _ => SnapshotStoreError::io(&self.display_path, err.to_string()),
            })?;

        serde_json::from_str(&contents)
            .map_err(|err| SnapshotStoreError::serialisation(err.to_string()))
    }
}

/// Writes contents atomically using a temp file and rename.
fn write_atomic(
    dir: &Dir,
    file_name: &str,
    display_path: &str,
    contents: &str,
) -> Result<(), SnapshotStoreError> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        nanos,
        counter
    );

    write_to_temp_file(dir, &tmp_name, display_path, contents)?;
    rename_temp_to_target(dir, &tmp_name, file_name, display_path)?;
    sync_parent_directory(dir);

    Ok(())
}

fn write_to_temp_file(
    dir: &Dir,
    tmp_name: &str,
    display_path: &str,
    contents: &str,
) -> Result<(), SnapshotStoreError> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir
        .open_with(tmp_name, &options)
        .map_err(|err| SnapshotStoreError::io(display_path, err.to_string()))?;

    if let Err(err) = file.write_all(contents.as_bytes()) {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(SnapshotStoreError::io(display_path, err.to_string()));
    }

    if let Err(err) = file.sync_all() {
        drop(file);
        drop(dir.remove_file(tmp_name));
        return Err(SnapshotStoreError::io(display_path, err.to_string()));
    }

    Ok(())
}

fn rename_temp_to_target(
    dir: &Dir,
    tmp_name: &str,
    target_name: &str,
    display_path: &str,
) -> Result<(), SnapshotStoreError> {
    if let Err(err) = rename_temp_to_target_impl(dir, tmp_name, target_name) {
        // Best-effort cleanup of the temp file on rename failure.
        if dir.remove_file(tmp_name).is_err() {
            // Ignore cleanup failures.
        }
        return Err(SnapshotStoreError::io(display_path, err.to_string()));
    }
    Ok(())
}

#[cfg(windows)]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_temp_to_target_impl(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn sync_parent_directory(parent: &Dir) {
    // Best-effort directory sync; ignore failures.
    if parent.open(".").and_then(|dir| dir.sync_all()).is_err() {
        // Ignore sync failures.
    }
}
