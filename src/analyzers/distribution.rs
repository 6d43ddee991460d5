//! Distribution analyzer: histograms and category counts.
//!
//! Numeric columns get a fixed 10-bin equal-width histogram; every other
//! column gets one bucket per distinct cell value, grouped by exact string
//! equality in first-appearance order. Classification follows the
//! all-or-nothing rule from [`inference`](super::inference), re-evaluated
//! from the raw cells each time.

use async_trait::async_trait;
use datafusion::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::errors::{AnalyzerError, AnalyzerResult};
use super::inference::{classify, numeric_values, ColumnKind};
use super::traits::{Analyzer, AnalyzerState};
use super::types::{CategoryBucket, Distribution, HistogramBucket};

/// Number of bins in a numeric histogram.
pub const HISTOGRAM_BINS: usize = 10;

/// State for distribution computation.
///
/// Carries the raw cells so classification and bucketing both happen in the
/// metric step; merging concatenates partitions in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionState {
    /// Raw string cells of the column, in row order.
    pub cells: Vec<String>,
}

impl AnalyzerState for DistributionState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        if states.is_empty() {
            return Err(AnalyzerError::state_merge("Cannot merge empty states"));
        }
        let mut cells = Vec::new();
        for state in states {
            cells.extend(state.cells);
        }
        Ok(DistributionState { cells })
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Analyzer computing the value distribution of one column.
#[derive(Debug, Clone)]
pub struct DistributionAnalyzer {
    /// Positional index of the column in the table.
    column_index: usize,
    /// Name of the registered table to query.
    table_name: String,
}

impl DistributionAnalyzer {
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

    /// Builds the equal-width histogram over parsed numeric values.
    ///
    /// When every value is identical the range is zero; a single bucket
    /// covering all values is emitted instead of dividing by a zero bin
    /// width. The bin index is clamped so the maximum lands in the last bin.
    pub(crate) fn histogram_of(values: &[f64]) -> Vec<HistogramBucket> {
        if values.is_empty() {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return vec![HistogramBucket::new(min, max, values.len() as u64)];
        }

        let bin_size = (max - min) / HISTOGRAM_BINS as f64;
        let mut counts = [0u64; HISTOGRAM_BINS];
        for &value in values {
            let index = (((value - min) / bin_size).floor() as usize).min(HISTOGRAM_BINS - 1);
            counts[index] += 1;
        }

        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let lower = min + i as f64 * bin_size;
                let upper = if i == HISTOGRAM_BINS - 1 {
                    max
                } else {
                    min + (i + 1) as f64 * bin_size
                };
                HistogramBucket::new(lower, upper, count)
            })
            .collect()
    }

    /// Counts distinct cell values in first-appearance order.
    pub(crate) fn categories_of(cells: &[String]) -> Vec<CategoryBucket> {
        let mut buckets: Vec<CategoryBucket> = Vec::new();
        for cell in cells {
            match buckets.iter_mut().find(|b| b.value == *cell) {
                Some(bucket) => bucket.count += 1,
                None => buckets.push(CategoryBucket::new(cell.clone(), 1)),
            }
        }
        buckets
    }
}

#[async_trait]
impl Analyzer for DistributionAnalyzer {
    type State = DistributionState;
    type Metric = Distribution;

    #[instrument(skip(self, ctx), fields(analyzer = "distribution", column = %self.column_index))]
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State> {
        let cells = super::fetch_string_column(ctx, &self.table_name, self.column_index).await?;
        Ok(DistributionState { cells })
    }

    fn compute_metric_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Metric> {
        match classify(state.cells.iter().map(String::as_str)) {
            ColumnKind::Numeric => {
                let values = numeric_values(state.cells.iter().map(String::as_str));
                Ok(Distribution::Numeric(Self::histogram_of(&values)))
            }
            ColumnKind::Categorical => {
                Ok(Distribution::Categorical(Self::categories_of(&state.cells)))
            }
        }
    }

    fn name(&self) -> &str {
        "distribution"
    }

    fn description(&self) -> &str {
        "Computes a histogram or category counts for a column"
    }

    fn metric_key(&self) -> String {
        format!("distribution_c{}", self.column_index)
    }

    fn columns(&self) -> Vec<usize> {
        vec![self.column_index]
    }
}
