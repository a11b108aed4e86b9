use crate::model::{DateCursor, FilterKind, MonthlyAggregate, SalesRecord, Series, YearWindow};
use crate::pipeline::{
    aggregate, derive_filter_domain_with_fallback, filter_options, generate_date_options,
    is_range_valid, ChartView, FilterDomain,
};
use std::sync::OnceLock;
use tracing::trace;

/// One loaded, read-only record set.
///
/// The filter domain is derived on first use and cached for as long as the `Dataset` lives, so it
/// is computed once per record set. Every other operation is recomputed on each call.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    fallback_years: YearWindow,
    domain: OnceLock<FilterDomain>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self::with_fallback_years(records, YearWindow::default())
    }

    /// Creates a dataset whose domain uses `fallback_years` when no record has a year.
    pub fn with_fallback_years(records: Vec<SalesRecord>, fallback_years: YearWindow) -> Self {
        Self {
            records,
            fallback_years,
            domain: OnceLock::new(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn domain(&self) -> &FilterDomain {
        self.domain.get_or_init(|| {
            trace!("Deriving the filter domain of {} records", self.records.len());
            derive_filter_domain_with_fallback(&self.records, self.fallback_years)
        })
    }

    pub fn options(&self, kind: FilterKind, search: &str, limit: usize) -> Vec<&str> {
        filter_options(self.domain(), kind, search, limit)
    }

    pub fn date_options(&self) -> Vec<DateCursor> {
        generate_date_options(self.domain())
    }

    pub fn aggregate(
        &self,
        kind: FilterKind,
        selected: &str,
        start: DateCursor,
        end: DateCursor,
    ) -> Vec<MonthlyAggregate> {
        aggregate(&self.records, kind, selected, start, end)
    }

    /// Resolves a selection into the state that should be shown in place of, or as, the chart.
    pub fn chart(
        &self,
        kind: FilterKind,
        selected: &str,
        start: DateCursor,
        end: DateCursor,
    ) -> ChartView {
        if selected.is_empty() {
            return ChartView::NotSelected;
        }
        if !is_range_valid(start, end) {
            return ChartView::InvalidRange;
        }
        let points = self.aggregate(kind, selected, start, end);
        if points.is_empty() {
            return ChartView::NoData;
        }
        ChartView::Ready(Series::new(points))
    }
}

impl From<Vec<SalesRecord>> for Dataset {
    fn from(records: Vec<SalesRecord>) -> Self {
        Dataset::new(records)
    }
}
