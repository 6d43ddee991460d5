//! Analyzer framework for computing the derived views of a table.
//!
//! Each derived view is produced by an analyzer: a type implementing the
//! [`Analyzer`] trait with an intermediate, mergeable [`AnalyzerState`] and a
//! pure metric step. Analyzers read the table registered with a DataFusion
//! [`SessionContext`](datafusion::prelude::SessionContext) and never mutate
//! it; the table owner recomputes every view from scratch whenever the table
//! changes.
//!
//! ## Available analyzers
//!
//! - [`statistics`] — descriptive statistics over the numeric cells of a
//!   column (count, mean, population std, nearest-rank quartiles, median,
//!   mode)
//! - [`distribution`] — 10-bin histogram for numeric columns, exact category
//!   counts for everything else
//! - [`correlation`] — pairwise Pearson correlation between two all-numeric
//!   columns
//! - [`inference`] — per-cell numeric test and all-or-nothing column
//!   classification

use arrow::array::{Array, StringArray};
use datafusion::prelude::SessionContext;

pub mod correlation;
pub mod distribution;
pub mod errors;
pub mod inference;
pub mod statistics;
pub mod traits;
pub mod types;

pub use correlation::{PearsonAnalyzer, PearsonState};
pub use distribution::{DistributionAnalyzer, DistributionState};
pub use errors::{AnalyzerError, AnalyzerResult};
pub use inference::{classify, is_numeric_cell, numeric_values, ColumnKind};
pub use statistics::{DescriptiveStatsAnalyzer, StatsState};
pub use traits::{Analyzer, AnalyzerState};
pub use types::{
    CategoryBucket, CorrelationMatrix, Distribution, HistogramBucket, Statistics,
};

/// Fetches the raw string cells of one column, in row order.
///
/// Columns are registered under synthetic field names (`c0`, `c1`, ...) so
/// duplicate or unusual headers never reach the SQL layer.
pub(crate) async fn fetch_string_column(
    ctx: &SessionContext,
    table_name: &str,
    index: usize,
) -> AnalyzerResult<Vec<String>> {
    let df = ctx
        .sql(&format!("SELECT c{index} FROM {table_name}"))
        .await?;
    let batches = df.collect().await?;

    let mut cells = Vec::new();
    for batch in &batches {
        let array = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| AnalyzerError::invalid_data("expected a Utf8 column"))?;
        for i in 0..array.len() {
            cells.push(array.value(i).to_string());
        }
    }
    Ok(cells)
}

/// Fetches the raw string cells of two columns, paired by row.
pub(crate) async fn fetch_string_column_pair(
    ctx: &SessionContext,
    table_name: &str,
    first: usize,
    second: usize,
) -> AnalyzerResult<Vec<(String, String)>> {
    let df = ctx
        .sql(&format!("SELECT c{first}, c{second} FROM {table_name}"))
        .await?;
    let batches = df.collect().await?;

    let mut pairs = Vec::new();
    for batch in &batches {
        let left = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| AnalyzerError::invalid_data("expected a Utf8 column"))?;
        let right = batch
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| AnalyzerError::invalid_data("expected a Utf8 column"))?;
        for i in 0..left.len() {
            pairs.push((left.value(i).to_string(), right.value(i).to_string()));
        }
    }
    Ok(pairs)
}
