use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::load::load_dataset;
use crate::{utils, Config, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What `import` did.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    /// The number of rows in the new data file.
    pub rows: usize,
    /// Where the previous data file was copied, if there was one.
    pub backup: Option<PathBuf>,
}

/// Replaces the configured data file with `csv_file`.
///
/// The new file is loaded first, so a file that cannot be used never replaces good data. The
/// current data file is then backed up and old backups are rotated.
pub async fn import(config: Config, csv_file: &Path) -> Result<Out<ImportSummary>> {
    let dataset = load_dataset(csv_file, config.fallback_years())
        .await
        .pub_result(ErrorType::Data)?;

    let backup = config
        .backup()
        .copy_data()
        .await
        .pub_result(ErrorType::Config)?;
    if let Some(path) = &backup {
        debug!("Saved backup to {}", path.display());
    }

    utils::copy(csv_file, config.data_path())
        .await
        .pub_result(ErrorType::Config)?;

    let summary = ImportSummary {
        rows: dataset.len(),
        backup,
    };
    Ok(Out::new(
        format!(
            "Imported {} row{} from {}",
            summary.rows,
            if summary.rows == 1 { "" } else { "s" },
            csv_file.display()
        ),
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{TestEnv, SAMPLE_CSV};

    const NEW_CSV: &str = "\
SUPPLIER,ITEM DESCRIPTION,YEAR,MONTH,RETAIL SALES,WAREHOUSE SALES,RETAIL TRANSFERS
Acme,Beer,2021,1,1,2,3
";

    #[tokio::test]
    async fn test_import_replaces_and_backs_up() {
        let env = TestEnv::new().await;
        let input = env.write_input("new.csv", NEW_CSV).await;

        let out = import(env.config(), &input).await.unwrap();
        assert_eq!(out.message(), format!("Imported 1 row from {}", input.display()));

        let summary = out.structure().unwrap();
        let backup = summary.backup.as_ref().unwrap();
        assert_eq!(utils::read(backup).await.unwrap(), SAMPLE_CSV);
        assert_eq!(utils::read(&env.config().data_path()).await.unwrap(), NEW_CSV);
        assert_eq!(env.config().dataset().await.unwrap().domain().suppliers(), ["Acme"]);
    }

    #[tokio::test]
    async fn test_import_bad_file_keeps_data() {
        let env = TestEnv::new().await;
        let input = env.write_input("bad.csv", "SUPPLIER,YEAR\nAcme,2021\n").await;

        let err = import(env.config(), &input).await.unwrap_err();
        assert_eq!(err.to_string(), "data error");
        assert_eq!(
            utils::read(&env.config().data_path()).await.unwrap(),
            SAMPLE_CSV
        );
        assert!(env.config().backup().list("data").await.unwrap().is_empty());
    }
}
