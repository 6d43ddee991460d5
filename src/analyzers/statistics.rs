//! Descriptive statistics analyzer.
//!
//! Computes count, mean, population standard deviation, min, nearest-rank
//! quartiles, median, max, and mode over the numeric cells of a column. Cells
//! that do not parse as finite numbers are dropped before computation, so the
//! quartile positions relate to the numeric-filtered sequence of a mixed
//! column rather than its full length.

use async_trait::async_trait;
use datafusion::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::errors::{AnalyzerError, AnalyzerResult};
use super::inference::numeric_values;
use super::traits::{Analyzer, AnalyzerState};
use super::types::Statistics;

/// State for descriptive statistics computation.
///
/// Holds the numeric-filtered values; exact medians, nearest-rank quartiles
/// and modes cannot be derived from running sums, so partial states carry the
/// values themselves and merge by concatenation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsState {
    /// Numeric cells of the column, in row order.
    pub values: Vec<f64>,
}

impl AnalyzerState for StatsState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        if states.is_empty() {
            return Err(AnalyzerError::state_merge("Cannot merge empty states"));
        }
        let mut values = Vec::new();
        for state in states {
            values.extend(state.values);
        }
        Ok(StatsState { values })
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Analyzer computing descriptive statistics for one column.
///
/// Produces `None` when the column has zero numeric cells.
#[derive(Debug, Clone)]
pub struct DescriptiveStatsAnalyzer {
    /// Positional index of the column in the table.
    column_index: usize,
    /// Name of the registered table to query.
    table_name: String,
}

impl DescriptiveStatsAnalyzer {
    /// Creates a new analyzer for the column at the given index.
    pub fn new(column_index: usize) -> Self {
        Self {
            column_index,
            table_name: "data".to_string(),
        }
    }

    /// Overrides the registered table name to query (default `data`).
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Computes the statistics over a numeric-filtered value sequence.
    ///
    /// Sorting happens on a private copy; caller-owned data is never mutated.
    pub(crate) fn statistics_of(values: &[f64]) -> Option<Statistics> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let std = variance.sqrt();

        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        // Nearest-rank quartiles; both indices stay below count for count >= 1.
        let q1 = sorted[(n * 0.25).floor() as usize];
        let q3 = sorted[(n * 0.75).floor() as usize];

        // Scan runs of equal values in sorted order, replacing the running
        // mode only on a strictly greater count, so ties resolve to the first
        // value in sorted order.
        let mut mode = sorted[0];
        let mut best_run = 0usize;
        let mut i = 0usize;
        while i < count {
            let mut j = i;
            while j < count && sorted[j] == sorted[i] {
                j += 1;
            }
            if j - i > best_run {
                best_run = j - i;
                mode = sorted[i];
            }
            i = j;
        }

        Some(Statistics {
            count,
            mean,
            std,
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[count - 1],
            mode,
        })
    }
}

#[async_trait]
impl Analyzer for DescriptiveStatsAnalyzer {
    type State = StatsState;
    type Metric = Option<Statistics>;

    #[instrument(skip(self, ctx), fields(analyzer = "descriptive_stats", column = %self.column_index))]
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State> {
        let cells = super::fetch_string_column(ctx, &self.table_name, self.column_index).await?;
        let values = numeric_values(cells.iter().map(String::as_str));
        Ok(StatsState { values })
    }

    fn compute_metric_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Metric> {
        Ok(Self::statistics_of(&state.values))
    }

    fn name(&self) -> &str {
        "descriptive_stats"
    }

    fn description(&self) -> &str {
        "Computes descriptive statistics over the numeric cells of a column"
    }

    fn metric_key(&self) -> String {
        format!("descriptive_stats_c{}", self.column_index)
    }

    fn columns(&self) -> Vec<usize> {
        vec![self.column_index]
    }
}
