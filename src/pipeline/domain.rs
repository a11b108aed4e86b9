use crate::model::{FilterKind, SalesRecord, YearWindow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The selectable values of a record set: distinct suppliers, distinct items and the observed
/// year bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterDomain {
    suppliers: Vec<String>,
    items: Vec<String>,
    years: YearWindow,
}

impl FilterDomain {
    /// Sorted, distinct, non-empty supplier names.
    pub fn suppliers(&self) -> &[String] {
        &self.suppliers
    }

    /// Sorted, distinct, non-empty item descriptions.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The sorted values for the given filter kind.
    pub fn values(&self, kind: FilterKind) -> &[String] {
        match kind {
            FilterKind::Supplier => &self.suppliers,
            FilterKind::Item => &self.items,
        }
    }

    pub fn min_year(&self) -> i32 {
        self.years.min
    }

    pub fn max_year(&self) -> i32 {
        self.years.max
    }

    pub fn years(&self) -> YearWindow {
        self.years
    }
}

/// Derives the filter domain of `records`, falling back to [`crate::model::FALLBACK_YEARS`] when
/// no record has a parseable year.
pub fn derive_filter_domain(records: &[SalesRecord]) -> FilterDomain {
    derive_filter_domain_with_fallback(records, YearWindow::default())
}

/// Same as [`derive_filter_domain`] but with a caller-chosen fallback window.
pub fn derive_filter_domain_with_fallback(
    records: &[SalesRecord],
    fallback: YearWindow,
) -> FilterDomain {
    let mut suppliers = BTreeSet::new();
    let mut items = BTreeSet::new();
    let mut years: Option<YearWindow> = None;

    for record in records {
        if !record.supplier().trim().is_empty() {
            suppliers.insert(record.supplier());
        }
        if !record.item_description().trim().is_empty() {
            items.insert(record.item_description());
        }
        if let Some(year) = record.year() {
            years = Some(match years {
                None => YearWindow::new(year, year),
                Some(w) => YearWindow::new(w.min.min(year), w.max.max(year)),
            });
        }
    }

    FilterDomain {
        suppliers: suppliers.into_iter().map(String::from).collect(),
        items: items.into_iter().map(String::from).collect(),
        years: years.unwrap_or(fallback),
    }
}
