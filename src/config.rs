//! Configuration file handling.
//!
//! The configuration file is stored at `$SALES_HOME/config.json` and holds the location of the
//! sales data file, the display limits for option lists, the fallback year window and backup
//! settings.

use crate::backup::Backup;
use crate::load::load_dataset;
use crate::model::{YearWindow, FALLBACK_YEARS};
use crate::pipeline::{Dataset, OPTION_LIMIT};
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "sales";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const DATA_CSV: &str = "data.csv";
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$SALES_HOME` and from there it loads `$SALES_HOME/config.json`. It provides
/// paths to other items that are either configurable or are expected in a certain location within
/// the sales home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory, its subdirectories and:
    /// - Copies `csv_file` into its default location in the data dir.
    /// - Creates an initial `config.json` file with default settings.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/sales`
    /// - `csv_file` - The sales CSV. It is parsed first so that a bad file never produces a data
    ///   directory.
    ///
    /// # Errors
    /// - Returns an error if the CSV does not load or any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, csv_file: &Path) -> Result<Self> {
        let _ = load_dataset(csv_file, FALLBACK_YEARS)
            .await
            .context("The CSV file cannot be used as sales data")?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the sales home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let backups = root.join(BACKUPS);
        utils::make_dir(&backups).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        let config = Self {
            root,
            backups,
            config_path,
            config_file,
        };

        utils::copy(csv_file, config.data_path()).await?;
        config.config_file.save(&config.config_path).await?;
        Ok(config)
    }

    /// This will
    /// - validate that the `sales_home` exists and that the config file exists
    /// - load the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub async fn load(sales_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = sales_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Sales home is missing, run 'sales init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let config = Self {
            backups: root.join(BACKUPS),
            root,
            config_path,
            config_file,
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    pub fn option_limit(&self) -> usize {
        self.config_file.option_limit
    }

    pub fn fallback_years(&self) -> YearWindow {
        self.config_file.fallback_years
    }

    /// Returns the stored `data_path` if it is absolute, otherwise resolves the relative path.
    pub fn data_path(&self) -> PathBuf {
        let p = self.config_file.data_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }

    /// Loads the configured data file.
    pub async fn dataset(&self) -> Result<Dataset> {
        load_dataset(&self.data_path(), self.fallback_years()).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "sales",
///   "config_version": 1,
///   "data_path": "data.csv",
///   "option_limit": 100,
///   "fallback_years": { "min": 2017, "max": 2020 },
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "sales"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the sales CSV (optional, relative to the sales home or absolute)
    /// Defaults to $SALES_HOME/data.csv if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_path: Option<PathBuf>,

    /// Maximum number of entries listed by `sales options`
    #[serde(default = "default_option_limit")]
    option_limit: usize,

    /// Year bounds used when no row of the data has a parseable year
    #[serde(default)]
    fallback_years: YearWindow,

    /// Number of backup copies to keep
    #[serde(default = "default_backup_copies")]
    backup_copies: u32,
}

fn default_option_limit() -> usize {
    OPTION_LIMIT
}

fn default_backup_copies() -> u32 {
    BACKUP_COPIES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            data_path: None,
            option_limit: OPTION_LIMIT,
            fallback_years: FALLBACK_YEARS,
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.fallback_years.min <= config.fallback_years.max,
            "Invalid fallback_years in config file: min {} is after max {}",
            config.fallback_years.min,
            config.fallback_years.max
        );
        ensure!(
            config.option_limit > 0,
            "Invalid option_limit in config file: must be at least 1"
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Gets the data path. Relative paths are relative to the sales home.
    fn data_path(&self) -> PathBuf {
        self.data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DATA_CSV))
    }
}
