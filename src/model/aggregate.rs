use crate::model::Quantity;
use serde::{Deserialize, Serialize};

/// The summed measures of every selected record in one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MonthlyAggregate {
    /// The month as `YYYY-MM`.
    month: String,
    retail_sales: Quantity,
    warehouse_sales: Quantity,
    retail_transfers: Quantity,
}

impl MonthlyAggregate {
    pub fn new(
        month: impl Into<String>,
        retail_sales: Quantity,
        warehouse_sales: Quantity,
        retail_transfers: Quantity,
    ) -> Self {
        Self {
            month: month.into(),
            retail_sales,
            warehouse_sales,
            retail_transfers,
        }
    }

    /// An aggregate for `month` with every measure at zero.
    pub fn empty(month: impl Into<String>) -> Self {
        Self::new(month, Quantity::ZERO, Quantity::ZERO, Quantity::ZERO)
    }

    pub fn month(&self) -> &str {
        &self.month
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

    pub(crate) fn add(
        &mut self,
        retail_sales: Quantity,
        warehouse_sales: Quantity,
        retail_transfers: Quantity,
    ) {
        self.retail_sales += retail_sales;
        self.warehouse_sales += warehouse_sales;
        self.retail_transfers += retail_transfers;
    }

    pub(crate) fn rounded(self) -> Self {
        Self {
            month: self.month,
            retail_sales: self.retail_sales.rounded(),
            warehouse_sales: self.warehouse_sales.rounded(),
            retail_transfers: self.retail_transfers.rounded(),
        }
    }
}

/// The sum of each measure across a whole series, shown beside the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Totals {
    pub retail_sales: Quantity,
    pub warehouse_sales: Quantity,
    pub retail_transfers: Quantity,
}

/// An ordered, finalized sequence of monthly aggregates together with its totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Series {
    points: Vec<MonthlyAggregate>,
    totals: Totals,
}

impl Series {
    /// Wraps already ordered aggregates and computes their totals.
    pub fn new(points: Vec<MonthlyAggregate>) -> Self {
        let totals = Totals {
            retail_sales: points.iter().map(|p| p.retail_sales).sum(),
            warehouse_sales: points.iter().map(|p| p.warehouse_sales).sum(),
            retail_transfers: points.iter().map(|p| p.retail_transfers).sum(),
        };
        Self { points, totals }
    }

    pub fn points(&self) -> &[MonthlyAggregate] {
        &self.points
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
