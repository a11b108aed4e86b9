use crate::model::cursor::month_key;
use crate::model::{FilterKind, Quantity, YearWindow};
use serde::{Deserialize, Serialize};

/// Represents the known columns that must be found in the header row of the sales CSV.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum SalesColumn {
    #[serde(rename = "SUPPLIER")]
    Supplier,
    #[serde(rename = "ITEM DESCRIPTION")]
    ItemDescription,
    #[serde(rename = "YEAR")]
    Year,
    #[serde(rename = "MONTH")]
    Month,
    #[serde(rename = "RETAIL SALES")]
    RetailSales,
    #[serde(rename = "WAREHOUSE SALES")]
    WarehouseSales,
    #[serde(rename = "RETAIL TRANSFERS")]
    RetailTransfers,
}

serde_plain::derive_display_from_serialize!(SalesColumn);
serde_plain::derive_fromstr_from_deserialize!(SalesColumn);

impl SalesColumn {
    pub const ALL: [SalesColumn; 7] = [
        SalesColumn::Supplier,
        SalesColumn::ItemDescription,
        SalesColumn::Year,
        SalesColumn::Month,
        SalesColumn::RetailSales,
        SalesColumn::WarehouseSales,
        SalesColumn::RetailTransfers,
    ];

    /// Matches a header cell to a known column. Surrounding whitespace is ignored.
    pub fn from_header(header: &str) -> Option<Self> {
        header.trim().parse().ok()
    }
}

/// One row of the CSV exactly as it was read. Every field is optional text so that a short or
/// malformed row never fails deserialization; interpretation happens in [`SalesRecord::from`].
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawSalesRow {
    #[serde(rename = "SUPPLIER", default)]
    pub supplier: Option<String>,
    #[serde(rename = "ITEM DESCRIPTION", default)]
    pub item_description: Option<String>,
    #[serde(rename = "YEAR", default)]
    pub year: Option<String>,
    #[serde(rename = "MONTH", default)]
    pub month: Option<String>,
    #[serde(rename = "RETAIL SALES", default)]
    pub retail_sales: Option<String>,
    #[serde(rename = "WAREHOUSE SALES", default)]
    pub warehouse_sales: Option<String>,
    #[serde(rename = "RETAIL TRANSFERS", default)]
    pub retail_transfers: Option<String>,
}

impl RawSalesRow {
    /// The number of fields in this row that will be substituted when it becomes a
    /// `SalesRecord`: an unparseable year or month, or a present but non-numeric measure.
    pub(crate) fn malformed_fields(&self) -> usize {
        let bad_year = |v: &Option<String>| parse_year(v.as_deref()).is_none();
        let bad_month = parse_month(self.month.as_deref()).is_none();
        let bad_measure = |v: &Option<String>| {
            v.as_deref()
                .is_some_and(|s| !s.trim().is_empty() && s.parse::<Quantity>().is_err())
        };
        [
            bad_year(&self.year),
            bad_month,
            bad_measure(&self.retail_sales),
            bad_measure(&self.warehouse_sales),
            bad_measure(&self.retail_transfers),
        ]
        .into_iter()
        .filter(|&b| b)
        .count()
    }
}

/// Represents a single, interpreted row of the sales dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SalesRecord {
    supplier: String,
    item_description: String,
    /// `None` when the source year did not parse or was not four digits.
    year: Option<i32>,
    /// `None` when the source month did not parse or was outside `1..=12`.
    month: Option<u32>,
    retail_sales: Quantity,
    warehouse_sales: Quantity,
    retail_transfers: Quantity,
}

impl SalesRecord {
    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn item_description(&self) -> &str {
        &self.item_description
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn retail_sales(&self) -> Quantity {
        self.retail_sales
    }

    pub fn warehouse_sales(&self) -> Quantity {
        self.warehouse_sales
    }

    pub fn retail_transfers(&self) -> Quantity {
        self.retail_transfers
    }

    /// The value of the categorical field selected by `kind`.
    pub fn field(&self, kind: FilterKind) -> &str {
        match kind {
            FilterKind::Supplier => &self.supplier,
            FilterKind::Item => &self.item_description,
        }
    }

    /// `year * 12 + month`, or `None` if either part is missing.
    pub fn month_key(&self) -> Option<i64> {
        Some(month_key(self.year?, self.month?))
    }

    /// The grouping label, e.g. `2019-01`, or `None` if either part is missing.
    pub fn month_label(&self) -> Option<String> {
        Some(format!("{}-{:02}", self.year?, self.month?))
    }
}

impl From<RawSalesRow> for SalesRecord {
    fn from(row: RawSalesRow) -> Self {
        let measure = |v: Option<String>| v.as_deref().map(Quantity::lenient).unwrap_or_default();
        Self {
            year: parse_year(row.year.as_deref()),
            month: parse_month(row.month.as_deref()),
            supplier: row.supplier.unwrap_or_default(),
            item_description: row.item_description.unwrap_or_default(),
            retail_sales: measure(row.retail_sales),
            warehouse_sales: measure(row.warehouse_sales),
            retail_transfers: measure(row.retail_transfers),
        }
    }
}

/// Years a record may carry. Anything else is a typo and would stretch the date range, and the
/// `YYYY-MM` labels only sort chronologically with four digit years.
const RECORD_YEARS: YearWindow = YearWindow::new(1000, 9999);

fn parse_year(s: Option<&str>) -> Option<i32> {
    s?.trim().parse().ok().filter(|&y| RECORD_YEARS.contains(y))
}

fn parse_month(s: Option<&str>) -> Option<u32> {
    s?.trim().parse().ok().filter(|m| (1..=12).contains(m))
}
