//! Loading the sales CSV into a [`Dataset`].
//!
//! Columns are found by header name, so their order does not matter and extra columns are
//! ignored. A file missing any required column fails as a whole. Within a row, a bad year, month
//! or measure never fails the load; it is substituted when the row becomes a `SalesRecord`.

use crate::model::{RawSalesRow, SalesColumn, SalesRecord, YearWindow};
use crate::pipeline::Dataset;
use crate::{utils, Result};
use anyhow::{bail, Context};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Counts gathered while parsing a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub malformed_fields: usize,
}

/// Reads and parses the CSV at `path`.
pub async fn load_dataset(path: &Path, fallback_years: YearWindow) -> Result<Dataset> {
    let content = utils::read(path).await?;
    let (records, stats) = parse_records(content.as_bytes())
        .with_context(|| format!("Unable to parse sales data in {}", path.display()))?;
    info!("Loaded {} sales rows from {}", stats.rows, path.display());
    if stats.malformed_fields > 0 {
        debug!(
            "{} malformed field(s) were treated as zero or as a missing date, including years \
             that are not four digits",
            stats.malformed_fields
        );
    }
    Ok(Dataset::with_fallback_years(records, fallback_years))
}

/// Parses CSV text with a header row into records.
pub fn parse_records<R: Read>(reader: R) -> Result<(Vec<SalesRecord>, LoadStats)> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().context("Unable to read the CSV header row")?;
    let missing = missing_columns(headers.iter());
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        bail!("The CSV is missing required column(s): {}", names.join(", "));
    }

    let mut records = Vec::new();
    let mut stats = LoadStats::default();
    for (ix, result) in rdr.deserialize::<RawSalesRow>().enumerate() {
        // Line numbers are 1-based and the header is line 1.
        let row = result.with_context(|| format!("Unable to read CSV row {}", ix + 2))?;
        stats.rows += 1;
        stats.malformed_fields += row.malformed_fields();
        records.push(SalesRecord::from(row));
    }
    Ok((records, stats))
}

/// Returns the required columns that are not present in `headers`.
fn missing_columns<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<SalesColumn> {
    let found: Vec<SalesColumn> = headers.filter_map(SalesColumn::from_header).collect();
    SalesColumn::ALL
        .into_iter()
        .filter(|c| !found.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateCursor, FilterKind, Quantity};
    use crate::test::SAMPLE_CSV;
    use std::str::FromStr;
    use tempfile::TempDir;

    #[test]
    fn test_parse_sample() {
        let (records, stats) = parse_records(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(stats.rows, records.len());
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].supplier(), "REPUBLIC NATIONAL DISTRIBUTING CO");
        assert_eq!(records[0].item_description(), "STEFANO BARTOLOMEO PINOT GRIGIO");
        assert_eq!(records[0].year(), Some(2019));
        assert_eq!(records[0].month(), Some(1));
        assert_eq!(records[0].retail_sales(), Quantity::from_str("10").unwrap());
    }

    #[test]
    fn test_parse_counts_malformed_fields() {
        let (_, stats) = parse_records(SAMPLE_CSV.as_bytes()).unwrap();
        // one "N/A" measure and one unparseable month in the sample
        assert_eq!(stats.malformed_fields, 2);
    }

    #[test]
    fn test_columns_in_any_order_with_extras() {
        let csv = "\
MONTH,ITEM CODE,RETAIL SALES,YEAR,SUPPLIER,RETAIL TRANSFERS,ITEM DESCRIPTION,WAREHOUSE SALES
2, 100,1.5,2020,Acme,0,Beer,3
";
        let (records, _) = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].supplier(), "Acme");
        assert_eq!(records[0].month_label().as_deref(), Some("2020-02"));
        assert_eq!(records[0].warehouse_sales(), Quantity::from_str("3").unwrap());
    }

    #[test]
    fn test_missing_columns_fail() {
        let csv = "SUPPLIER,ITEM DESCRIPTION,YEAR,RETAIL SALES\nAcme,Beer,2020,1\n";
        let err = parse_records(csv.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("MONTH"), "{message}");
        assert!(message.contains("WAREHOUSE SALES"), "{message}");
        assert!(message.contains("RETAIL TRANSFERS"), "{message}");
        assert!(!message.contains("SUPPLIER"), "{message}");
    }

    #[test]
    fn test_empty_lines_and_short_rows() {
        let csv = "\
SUPPLIER,ITEM DESCRIPTION,YEAR,MONTH,RETAIL SALES,WAREHOUSE SALES,RETAIL TRANSFERS

Acme,Beer,2020,1,1,2,3

Acme,Beer,2020,2
";
        let (records, _) = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].retail_sales().is_zero());
        assert_eq!(records[1].month(), Some(2));
    }

    #[test]
    fn test_typo_year_does_not_widen_domain() {
        let csv = "\
SUPPLIER,ITEM DESCRIPTION,YEAR,MONTH,RETAIL SALES,WAREHOUSE SALES,RETAIL TRANSFERS
Acme,Beer,2019,1,1,2,3
Acme,Beer,20190,2,1,2,3
";
        let (records, stats) = parse_records(csv.as_bytes()).unwrap();
        assert_eq!(stats.malformed_fields, 1);
        let data = Dataset::new(records);
        assert_eq!(data.domain().years(), YearWindow::new(2019, 2019));
        assert_eq!(data.date_options().len(), 12);
    }

    #[test]
    fn test_empty_file_fails() {
        assert!(parse_records("".as_bytes()).is_err());
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let csv = "SUPPLIER,ITEM DESCRIPTION,YEAR,MONTH,RETAIL SALES,WAREHOUSE SALES,RETAIL TRANSFERS\n";
        let (records, stats) = parse_records(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
        assert_eq!(stats, LoadStats::default());
    }

    #[tokio::test]
    async fn test_load_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sales.csv");
        utils::write(&path, SAMPLE_CSV).await.unwrap();

        let data = load_dataset(&path, YearWindow::default()).await.unwrap();
        assert_eq!(data.len(), 8);
        assert_eq!(data.domain().min_year(), 2019);
        assert_eq!(data.domain().max_year(), 2020);

        let view = data.chart(
            FilterKind::Supplier,
            "REPUBLIC NATIONAL DISTRIBUTING CO",
            DateCursor::new(2019, 1),
            DateCursor::new(2019, 12),
        );
        assert!(view.series().is_some());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_dataset(&dir.path().join("nope.csv"), YearWindow::default()).await;
        assert!(result.is_err());
    }
}
