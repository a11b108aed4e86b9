use crate::model::{DateCursor, FilterKind, MonthlyAggregate, SalesRecord};
use crate::pipeline::is_range_valid;
use std::collections::BTreeMap;

/// Sums the measures of the records matching `selected` within `start..=end`, one aggregate per
/// month, ordered by month and rounded to cents.
///
/// - Only records whose `kind` field equals `selected` exactly are kept.
/// - Records without a parseable year and month are outside every range.
/// - Unparseable measures were loaded as zero and add nothing, but the record still makes its
///   month appear.
///
/// An empty `selected`, an empty `records` or an end before the start yields an empty list.
pub fn aggregate(
    records: &[SalesRecord],
    kind: FilterKind,
    selected: &str,
    start: DateCursor,
    end: DateCursor,
) -> Vec<MonthlyAggregate> {
    if selected.is_empty() || records.is_empty() || !is_range_valid(start, end) {
        return Vec::new();
    }
    let range = start.key()..=end.key();

    let mut months: BTreeMap<String, MonthlyAggregate> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| r.field(kind) == selected)
        .filter(|r| r.month_key().is_some_and(|key| range.contains(&key)))
    {
        let Some(label) = record.month_label() else {
            continue;
        };
        months
            .entry(label)
            .or_insert_with_key(|label| MonthlyAggregate::empty(label.as_str()))
            .add(
                record.retail_sales(),
                record.warehouse_sales(),
                record.retail_transfers(),
            );
    }

    months.into_values().map(MonthlyAggregate::rounded).collect()
}
