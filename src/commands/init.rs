use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its subdirectories and:
/// - Copies `csv_file` into its default location in the data dir.
/// - Creates an initial `config.json` file with default settings.
///
/// # Arguments
/// - `sales_home` - The directory that will be the root of data directory, e.g. `$HOME/sales`
/// - `csv_file` - The sales CSV. It must have all of the required columns.
///
/// # Errors
/// - Returns an error if the CSV cannot be loaded or any file operations fail.
pub async fn init(sales_home: &Path, csv_file: &Path) -> Result<Out<()>> {
    let config = Config::create(sales_home, csv_file)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the sales directory at {}",
        config.root().display()
    )
    .into())
}
