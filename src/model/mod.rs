//! Types that represent the core data model, such as `SalesRecord` and `MonthlyAggregate`.
mod aggregate;
mod cursor;
mod filter;
mod quantity;
mod record;

pub use aggregate::{MonthlyAggregate, Series, Totals};
pub use cursor::{DateCursor, DateCursorError};
pub use filter::FilterKind;
pub use quantity::{Quantity, QuantityError, ROUND_DP};
pub use record::{RawSalesRow, SalesColumn, SalesRecord};
use serde::{Deserialize, Serialize};

/// An inclusive span of years.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct YearWindow {
    pub min: i32,
    pub max: i32,
}

impl YearWindow {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

/// The window used when a dataset has no parseable year at all.
pub const FALLBACK_YEARS: YearWindow = YearWindow::new(2017, 2020);

impl Default for YearWindow {
    fn default() -> Self {
        FALLBACK_YEARS
    }
}
