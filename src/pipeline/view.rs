use crate::model::{DateCursor, FilterKind, Series};
use crate::pipeline::Dataset;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// What to show where the chart goes. Every variant is a normal, terminal state for one render;
/// none of them is an error that stops further interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "data")]
pub enum ChartView {
    /// The data has not finished loading.
    Loading,
    /// The data could not be loaded. Nothing partial is shown.
    LoadFailed(String),
    /// Nothing has been selected yet.
    NotSelected,
    /// The end of the range is before its start.
    InvalidRange,
    /// The inputs are valid but nothing matched them.
    NoData,
    /// A non-empty series ready to plot.
    Ready(Series),
}

impl ChartView {
    pub fn series(&self) -> Option<&Series> {
        match self {
            ChartView::Ready(series) => Some(series),
            _ => None,
        }
    }

    /// The placeholder text for this state, or a short summary of the series.
    pub fn message(&self) -> String {
        match self {
            ChartView::Loading => String::from("Loading data..."),
            ChartView::LoadFailed(reason) => format!("Unable to load data: {reason}"),
            ChartView::NotSelected => String::from("Select a value to view its sales"),
            ChartView::InvalidRange => String::from("The end date must not be before the start date"),
            ChartView::NoData => String::from("No data for the selected value and date range"),
            ChartView::Ready(series) => format!(
                "{} month{} of data",
                series.len(),
                if series.len() == 1 { "" } else { "s" }
            ),
        }
    }
}

impl Display for ChartView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// The state of the one asynchronous step, loading the data. Aggregation can only run once it is
/// `Ready`.
#[derive(Debug, Clone, Default)]
pub enum DataState {
    #[default]
    Loading,
    Failed(String),
    Ready(Dataset),
}

impl DataState {
    /// Wraps the outcome of a load.
    pub fn from_load<E: Display>(result: Result<Dataset, E>) -> Self {
        match result {
            Ok(dataset) => DataState::Ready(dataset),
            Err(e) => DataState::Failed(e.to_string()),
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            DataState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn chart(
        &self,
        kind: FilterKind,
        selected: &str,
        start: DateCursor,
        end: DateCursor,
    ) -> ChartView {
        match self {
            DataState::Loading => ChartView::Loading,
            DataState::Failed(reason) => ChartView::LoadFailed(reason.clone()),
            DataState::Ready(dataset) => dataset.chart(kind, selected, start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::record;

    const JAN: DateCursor = DateCursor::new(2019, 1);

    #[test]
    fn test_loading_blocks_aggregation() {
        let state = DataState::default();
        assert!(state.dataset().is_none());
        assert_eq!(state.chart(FilterKind::Supplier, "Acme", JAN, JAN), ChartView::Loading);
    }

    #[test]
    fn test_failed_load() {
        let state = DataState::from_load(Err::<Dataset, _>("missing column YEAR"));
        let view = state.chart(FilterKind::Supplier, "Acme", JAN, JAN);
        assert_eq!(view, ChartView::LoadFailed(String::from("missing column YEAR")));
        assert_eq!(view.message(), "Unable to load data: missing column YEAR");
        assert!(view.series().is_none());
    }

    #[test]
    fn test_ready_load() {
        let dataset = Dataset::new(vec![record("Acme", "Beer", "2019", "1", "1", "2", "3")]);
        let state = DataState::from_load(Ok::<_, String>(dataset));
        let view = state.chart(FilterKind::Supplier, "Acme", JAN, JAN);
        assert_eq!(view.message(), "1 month of data");
        assert_eq!(view.series().map(Series::len), Some(1));
    }

    #[test]
    fn test_placeholder_messages_are_distinct() {
        let messages = [
            ChartView::NotSelected.message(),
            ChartView::InvalidRange.message(),
            ChartView::NoData.message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[0], messages[2]);
    }

    #[test]
    fn test_serialize_state() {
        let json = serde_json::to_string(&ChartView::NoData).unwrap();
        assert_eq!(json, r#"{"state":"no_data"}"#);
    }
}
