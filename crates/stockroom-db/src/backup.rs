//! # Database Backups
//!
//! Timestamped file copies of the database into the backup directory.
//!
//! ## File Naming
//! `backup_YYYYMMDD_HHMMSS.<ext>` where `<ext>` is the database file's own
//! extension (`db` when it has none). Two backups inside the same second
//! would collide; instead of silently overwriting, the second copy gets a
//! numeric suffix: `backup_20260828_101502_1.db`.
//!
//! Backups are never pruned or rotated here; an external scheduler that
//! wants periodic copies simply invokes the operation repeatedly.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Formats the base backup file name for a given timestamp.
pub fn backup_file_name(at: NaiveDateTime) -> String {
    format!("backup_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Copies `source` into `backup_dir` under a timestamped name and returns
/// the path written.
///
/// The directory is created if missing. A missing source file is an error,
/// not a silent no-op.
pub fn create_backup(source: &Path, backup_dir: &Path, at: NaiveDateTime) -> DbResult<PathBuf> {
    if !source.is_file() {
        return Err(DbError::BackupSourceMissing(source.to_path_buf()));
    }

    fs::create_dir_all(backup_dir)?;

    let extension = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "db".to_string());
    let base = backup_file_name(at);

    let target = next_free_path(backup_dir, &base, &extension);
    debug!(source = %source.display(), target = %target.display(), "Copying backup");

    fs::copy(source, &target)?;
    Ok(target)
}

/// Picks the first non-existing path for the base name, suffixing `_1`,
/// `_2`, ... when a backup from the same second is already present.
fn next_free_path(backup_dir: &Path, base: &str, extension: &str) -> PathBuf {
    let candidate = backup_dir.join(format!("{base}.{extension}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut counter = 1u32;
    loop {
        let candidate = backup_dir.join(format!("{base}_{counter}.{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
