use crate::model::DateCursor;
use crate::pipeline::FilterDomain;

/// True when `end` is the same month as `start` or later.
pub fn is_range_valid(start: DateCursor, end: DateCursor) -> bool {
    end.key() >= start.key()
}

/// Every month of every year in the domain's year bounds, January to December within each year.
pub fn generate_date_options(domain: &FilterDomain) -> Vec<DateCursor> {
    (domain.min_year()..=domain.max_year())
        .flat_map(|year| (1..=12).map(move |month| DateCursor::new(year, month)))
        .collect()
}
