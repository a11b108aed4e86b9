//! These structs provide the CLI interface for the sales CLI.

use crate::model::{DateCursor, FilterKind};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// sales: Explore monthly sales of a supplier or an item.
///
/// The purpose of this program is to take a flat CSV of monthly sales records, with one row per
/// supplier, item and month, and turn it into a time series for one supplier or one item. Each
/// month of the series sums the retail sales, warehouse sales and retail transfers of every
/// matching row.
///
/// Start with `sales init --csv <file>`, then use `sales options` to find the exact supplier or
/// item name and `sales chart` to see its series.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory from a sales CSV and initialize the configuration file.
    ///
    /// The CSV needs a header row with at least these columns, in any order:
    /// SUPPLIER, ITEM DESCRIPTION, YEAR, MONTH, RETAIL SALES, WAREHOUSE SALES, RETAIL TRANSFERS.
    /// Other columns are ignored. The file is copied into the data directory.
    Init(InitArgs),
    /// Replace the sales data with a new CSV. The current file is backed up first.
    Import(ImportArgs),
    /// Show the suppliers, items and years found in the data.
    Domain,
    /// List the suppliers or items that match a search.
    Options(OptionsArgs),
    /// List every month that can be used as a range bound.
    Dates,
    /// Show the monthly series for one supplier or item within a range of months.
    Chart(ChartArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where sales data and configuration is held. Defaults to ~/sales
    #[arg(long, env = "SALES_HOME", default_value_t = default_sales_home())]
    sales_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn sales_home(&self) -> &DisplayPath {
        &self.sales_home
    }
}

/// (Not shown): Args for the `sales init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The path to the sales CSV. It will be copied into the data directory.
    #[arg(long)]
    csv: PathBuf,
}

impl InitArgs {
    pub fn csv(&self) -> &Path {
        &self.csv
    }
}

/// (Not shown): Args for the `sales import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The path to the new sales CSV.
    #[arg(long)]
    csv: PathBuf,
}

impl ImportArgs {
    pub fn csv(&self) -> &Path {
        &self.csv
    }
}

/// (Not shown): Args for the `sales options` command.
#[derive(Debug, Parser, Clone)]
pub struct OptionsArgs {
    /// Whether to list suppliers or items.
    #[arg(long, value_enum, default_value_t = FilterKind::Supplier)]
    kind: FilterKind,

    /// Only list values containing this text, ignoring case. Lists everything when empty.
    #[arg(long, default_value = "")]
    search: String,

    /// The most values to list. Defaults to `option_limit` from the config file.
    #[arg(long)]
    limit: Option<usize>,
}

impl OptionsArgs {
    pub fn new(kind: FilterKind, search: impl Into<String>, limit: Option<usize>) -> Self {
        Self {
            kind,
            search: search.into(),
            limit,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// How `sales chart` writes its series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// An aligned text table followed by the totals.
    #[default]
    Table,
    /// CSV with a header row, one row per month and a final `TOTAL` row.
    Csv,
    /// The full chart view as pretty-printed JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// (Not shown): Args for the `sales chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Whether `--value` is a supplier or an item.
    #[arg(long, value_enum, default_value_t = FilterKind::Supplier)]
    kind: FilterKind,

    /// The exact supplier or item to chart. Matching is case-sensitive; use `sales options` to
    /// find the exact text.
    #[arg(long, default_value = "")]
    value: String,

    /// The first month, as YYYY-MM. Defaults to January of the earliest year in the data.
    #[arg(long)]
    from: Option<DateCursor>,

    /// The last month, as YYYY-MM. Defaults to December of the latest year in the data.
    #[arg(long)]
    to: Option<DateCursor>,

    /// The output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ChartArgs {
    pub fn new(
        kind: FilterKind,
        value: impl Into<String>,
        from: Option<DateCursor>,
        to: Option<DateCursor>,
        format: OutputFormat,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            from,
            to,
            format,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The `--from` month, if given.
    pub fn start(&self) -> Option<DateCursor> {
        self.from
    }

    /// The `--to` month, if given.
    pub fn end(&self) -> Option<DateCursor> {
        self.to
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

fn default_sales_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("sales"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --sales-home or SALES_HOME instead of relying on the default \
                sales home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("sales")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
