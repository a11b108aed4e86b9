//! Backups of the sales data file, taken before it is replaced.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;

/// Prefix for data file backups.
pub const DATA: &str = "data";

const CSV: &str = "csv";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings it needs.
/// Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    data_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            data_path: config.data_path(),
        }
    }

    /// Copies the current data file to the backups directory.
    ///
    /// The filename format is `data.YYYY-MM-DD-NNN.csv` where NNN is a sequence number.
    /// Automatically rotates old backups, keeping only `backup_copies` files.
    ///
    /// Returns the path to the created backup file, or `None` if there is no data file yet.
    pub async fn copy_data(&self) -> Result<Option<PathBuf>> {
        if !self.data_path.is_file() {
            return Ok(None);
        }
        let date = today();
        let seq = self.next_sequence_number(DATA, &date).await?;
        let path = self.backups_dir.join(format!("{DATA}.{date}-{seq:03}.{CSV}"));

        utils::copy(&self.data_path, &path).await?;
        self.rotate(DATA).await?;

        Ok(Some(path))
    }

    /// Lists the backup files for `prefix`, oldest first.
    pub async fn list(&self, prefix: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .backup_files(prefix)
            .await?
            .into_iter()
            .map(|(path, _)| path)
            .collect())
    }

    /// Scans the backups directory for existing files with the given prefix and date,
    /// and returns the next sequence number.
    async fn next_sequence_number(&self, prefix: &str, date: &str) -> Result<u32> {
        let max_seq = self
            .backup_files(prefix)
            .await?
            .iter()
            .filter_map(|(_, name)| parse_sequence_number(name, prefix, date))
            .max()
            .unwrap_or(0);
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files with the given prefix.
    async fn rotate(&self, prefix: &str) -> Result<()> {
        let files = self.backup_files(prefix).await?;

        // Delete oldest files if we have more than backup_copies
        let to_delete = files.len().saturating_sub(self.backup_copies as usize);
        for (path, _) in files.into_iter().take(to_delete) {
            utils::remove_file(&path).await?;
        }

        Ok(())
    }

    /// All backup files with `prefix`, sorted by filename, which sorts by date and sequence
    /// number due to the format.
    async fn backup_files(&self, prefix: &str) -> Result<Vec<(PathBuf, String)>> {
        let mut files: Vec<(PathBuf, String)> = Vec::new();

        let mut dir = utils::read_dir(&self.backups_dir).await?;
        while let Some(entry) = dir
            .next_entry()
            .await
            .context("Failed to read directory entry")?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if is_backup_file(&name, prefix) {
                files.push((entry.path(), name));
            }
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, prefix: &str, date: &str) -> Option<u32> {
    // Pattern: {prefix}.{date}-{NNN}.csv
    filename
        .strip_prefix(&format!("{prefix}.{date}-"))?
        .strip_suffix(&format!(".{CSV}"))?
        .parse()
        .ok()
}

/// Checks if a filename is a backup file with the given prefix.
fn is_backup_file(filename: &str, prefix: &str) -> bool {
    filename.starts_with(&format!("{prefix}.")) && filename.ends_with(&format!(".{CSV}"))
}
