//! The sales aggregation pipeline.
//!
//! A loaded record set goes through four pure operations:
//!
//! - [`derive_filter_domain`]: the distinct suppliers, items and year bounds of the records.
//! - [`filter_options`]: the values of one filter kind matching a search, for selection lists.
//! - [`is_range_valid`] and [`generate_date_options`]: the month range controls.
//! - [`aggregate`]: the per-month sums for one selected value within a month range.
//!
//! None of them has side effects, so a caller may recompute any of them whenever an input
//! changes. [`Dataset`] bundles a record set with its cached domain, and [`ChartView`] maps the
//! outcome of a selection to what should be displayed.

mod aggregate;
mod dataset;
mod domain;
mod options;
mod range;
mod view;

pub use aggregate::aggregate;
pub use dataset::Dataset;
pub use domain::{derive_filter_domain, derive_filter_domain_with_fallback, FilterDomain};
pub use options::{filter_options, OPTION_LIMIT};
pub use range::{generate_date_options, is_range_valid};
pub use view::{ChartView, DataState};
