use crate::args::{ChartArgs, OutputFormat};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{DateCursor, MonthlyAggregate, Series};
use crate::pipeline::ChartView;
use crate::{Config, Result};
use anyhow::Context;
use tracing::debug;

const MONTH: &str = "MONTH";
const RETAIL_SALES: &str = "RETAIL SALES";
const WAREHOUSE_SALES: &str = "WAREHOUSE SALES";
const RETAIL_TRANSFERS: &str = "RETAIL TRANSFERS";
const TOTAL: &str = "TOTAL";

/// Aggregates the selected supplier or item by month and renders the result in the requested
/// format. A missing `--from` or `--to` widens the range to the full years of the data.
///
/// An empty selection, a backwards range or a selection with no rows are not errors; the
/// returned view says which one happened and the message is its placeholder text.
pub async fn chart(config: Config, args: ChartArgs) -> Result<Out<ChartView>> {
    let dataset = config.dataset().await.pub_result(ErrorType::Data)?;
    let domain = dataset.domain();
    let start = args
        .start()
        .unwrap_or_else(|| DateCursor::new(domain.min_year(), 1));
    let end = args
        .end()
        .unwrap_or_else(|| DateCursor::new(domain.max_year(), 12));
    debug!(
        "Charting {} '{}' from {start} to {end}",
        args.kind(),
        args.value()
    );

    let view = dataset.chart(args.kind(), args.value(), start, end);
    let message = render(&view, args.format()).pub_result(ErrorType::Request)?;
    Ok(Out::new(message, view))
}

/// Renders `view` as text. Placeholder states render as their message except in JSON, which
/// always carries the whole view.
fn render(view: &ChartView, format: OutputFormat) -> Result<String> {
    match (format, view.series()) {
        (OutputFormat::Json, _) => {
            serde_json::to_string_pretty(view).context("Unable to serialize the chart to JSON")
        }
        (OutputFormat::Table, Some(series)) => Ok(table(series)),
        (OutputFormat::Csv, Some(series)) => csv(series),
        (_, None) => Ok(view.message()),
    }
}

fn table(series: &Series) -> String {
    let width = series
        .points()
        .iter()
        .map(|p| p.month().len())
        .chain([MONTH.len(), TOTAL.len()])
        .max()
        .unwrap_or_default();
    let row = |label: &str, cells: [String; 3]| {
        format!(
            "{label:<width$}  {:>r$}  {:>w$}  {:>t$}",
            cells[0],
            cells[1],
            cells[2],
            r = RETAIL_SALES.len(),
            w = WAREHOUSE_SALES.len(),
            t = RETAIL_TRANSFERS.len(),
        )
    };

    let mut lines = vec![row(
        MONTH,
        [RETAIL_SALES, WAREHOUSE_SALES, RETAIL_TRANSFERS].map(String::from),
    )];
    for point in series.points() {
        lines.push(row(
            point.month(),
            [
                point.retail_sales().to_grouped_string(),
                point.warehouse_sales().to_grouped_string(),
                point.retail_transfers().to_grouped_string(),
            ],
        ));
    }
    let totals = series.totals();
    lines.push(row(
        TOTAL,
        [
            totals.retail_sales.to_grouped_string(),
            totals.warehouse_sales.to_grouped_string(),
            totals.retail_transfers.to_grouped_string(),
        ],
    ));
    lines.join("\n")
}

fn csv(series: &Series) -> Result<String> {
    let totals = series.totals();
    let total = MonthlyAggregate::new(
        TOTAL,
        totals.retail_sales,
        totals.warehouse_sales,
        totals.retail_transfers,
    );
    let mut writer = csv::Writer::from_writer(Vec::new());
    for point in series.points().iter().chain([&total]) {
        writer
            .serialize(point)
            .context("Unable to write a CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .context("Unable to finish writing CSV")?;
    String::from_utf8(bytes).context("The CSV output was not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterKind;
    use crate::test::{TestEnv, REPUBLIC};

    fn args(value: &str, format: OutputFormat) -> ChartArgs {
        ChartArgs::new(FilterKind::Supplier, value, None, None, format)
    }

    fn tokens(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    #[tokio::test]
    async fn test_chart_table() {
        let env = TestEnv::new().await;
        let out = chart(env.config(), args(REPUBLIC, OutputFormat::Table))
            .await
            .unwrap();

        let lines: Vec<&str> = out.message().lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("MONTH"));
        assert_eq!(tokens(lines[1]), ["2019-01", "12.50", "5.00", "1.00"]);
        assert_eq!(tokens(lines[2]), ["2019-02", "0.00", "1.25", "2.00"]);
        assert_eq!(tokens(lines[3]), ["2020-02", "3.00", "2.00", "0.00"]);
        assert_eq!(tokens(lines[4]), ["TOTAL", "15.50", "8.25", "3.00"]);

        let series = out.structure().unwrap().series().unwrap();
        assert_eq!(series.len(), 3);
    }

    #[tokio::test]
    async fn test_chart_csv() {
        let env = TestEnv::new().await;
        let range = ChartArgs::new(
            FilterKind::Item,
            "KNOB CREEK BOURBON 9YR - 100P - 375ML",
            Some(DateCursor::new(2020, 1)),
            Some(DateCursor::new(2020, 1)),
            OutputFormat::Csv,
        );
        let out = chart(env.config(), range).await.unwrap();
        assert_eq!(
            out.message(),
            "month,retail_sales,warehouse_sales,retail_transfers\n\
             2020-01,10,0,8\n\
             TOTAL,10,0,8\n"
        );
    }

    #[tokio::test]
    async fn test_chart_json() {
        let env = TestEnv::new().await;
        let out = chart(env.config(), args("PWSWN INC", OutputFormat::Json))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(out.message()).unwrap();
        assert_eq!(json["state"], "ready");
        // the month 13 row is dropped, leaving only March
        let points = json["data"]["points"].as_array().unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["month"], "2019-03");
        assert_eq!(points[0]["warehouse_sales"], "-1");
        assert_eq!(points[0]["retail_sales"], "0.77");
    }

    #[tokio::test]
    async fn test_chart_placeholders() {
        let env = TestEnv::new().await;

        let out = chart(env.config(), args("", OutputFormat::Table))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&ChartView::NotSelected));
        assert_eq!(out.message(), ChartView::NotSelected.message());

        let backwards = ChartArgs::new(
            FilterKind::Supplier,
            REPUBLIC,
            Some(DateCursor::new(2020, 1)),
            Some(DateCursor::new(2019, 1)),
            OutputFormat::Csv,
        );
        let out = chart(env.config(), backwards).await.unwrap();
        assert_eq!(out.structure(), Some(&ChartView::InvalidRange));

        let out = chart(env.config(), args("republic", OutputFormat::Table))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&ChartView::NoData));

        let out = chart(env.config(), args("", OutputFormat::Json))
            .await
            .unwrap();
        assert_eq!(out.message(), "{\n  \"state\": \"not_selected\"\n}");
    }
}
