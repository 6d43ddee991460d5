//! Pearson correlation analyzer for pairs of all-numeric columns.
//!
//! The coefficient uses the population formulation: covariance divided by the
//! product of the population standard deviations. When either column has zero
//! variance the denominator is zero and the coefficient is undefined; the
//! analyzer reports `None` rather than letting NaN or infinity propagate.

use async_trait::async_trait;
use datafusion::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::errors::{AnalyzerError, AnalyzerResult};
use super::inference::is_numeric_cell;
use super::traits::{Analyzer, AnalyzerState};

/// State for Pearson correlation computation.
///
/// Running sums are sufficient for the coefficient and merge by addition, so
/// states from separate partitions combine exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PearsonState {
    /// Number of contributing row pairs.
    pub n: u64,
    /// Sum of x values.
    pub sum_x: f64,
    /// Sum of y values.
    pub sum_y: f64,
    /// Sum of x squared.
    pub sum_x2: f64,
    /// Sum of y squared.
    pub sum_y2: f64,
    /// Sum of x*y.
    pub sum_xy: f64,
}

impl PearsonState {
    /// Accumulates one row pair into the running sums.
    pub fn accumulate(&mut self, x: f64, y: f64) {
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_x2 += x * x;
        self.sum_y2 += y * y;
        self.sum_xy += x * y;
    }

    /// Builds a state from paired values, mainly for direct metric tests.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mut state = Self::default();
        for &(x, y) in pairs {
            state.accumulate(x, y);
        }
        state
    }
}

impl AnalyzerState for PearsonState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        if states.is_empty() {
            return Err(AnalyzerError::state_merge("Cannot merge empty states"));
        }
        let mut merged = PearsonState::default();
        for state in states {
            merged.n += state.n;
            merged.sum_x += state.sum_x;
            merged.sum_y += state.sum_y;
            merged.sum_x2 += state.sum_x2;
            merged.sum_y2 += state.sum_y2;
            merged.sum_xy += state.sum_xy;
        }
        Ok(merged)
    }

    fn is_empty(&self) -> bool {
        self.n == 0
    }
}

/// Analyzer computing the Pearson correlation between two columns.
///
/// Intended for columns already classified all-numeric; rows where either
/// cell fails the numeric test are skipped defensively.
#[derive(Debug, Clone)]
pub struct PearsonAnalyzer {
    /// Positional index of the first column.
    first: usize,
    /// Positional index of the second column.
    second: usize,
    /// Name of the registered table to query.
    table_name: String,
}

impl PearsonAnalyzer {
    /// Creates a new analyzer over the columns at the given indices.
    pub fn new(first: usize, second: usize) -> Self {
        Self {
            first,
            second,
            table_name: "data".to_string(),
        }
    }

    /// Overrides the registered table name to query (default `data`).
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Evaluates the coefficient from the running sums.
    ///
    /// `None` when fewer than two pairs contributed or when either column has
    /// zero variance. The result is clamped into `[-1, 1]` to absorb
    /// floating-point drift at the extremes.
    pub(crate) fn coefficient(state: &PearsonState) -> Option<f64> {
        if state.n < 2 {
            return None;
        }
        let n = state.n as f64;
        let numerator = n * state.sum_xy - state.sum_x * state.sum_y;
        let denominator = ((n * state.sum_x2 - state.sum_x * state.sum_x)
            * (n * state.sum_y2 - state.sum_y * state.sum_y))
            .sqrt();

        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }
        Some((numerator / denominator).clamp(-1.0, 1.0))
    }
}

#[async_trait]
impl Analyzer for PearsonAnalyzer {
    type State = PearsonState;
    type Metric = Option<f64>;

    #[instrument(skip(self, ctx), fields(
        analyzer = "pearson",
        first = %self.first,
        second = %self.second
    ))]
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State> {
        let pairs =
            super::fetch_string_column_pair(ctx, &self.table_name, self.first, self.second)
                .await?;

        let mut state = PearsonState::default();
        for (left, right) in &pairs {
            if !is_numeric_cell(left) || !is_numeric_cell(right) {
                continue;
            }
            // Both cells passed the numeric test, the parses cannot fail.
            let x: f64 = left.trim().parse().map_err(|_| {
                AnalyzerError::state_computation(format!("unparseable numeric cell: {left}"))
            })?;
            let y: f64 = right.trim().parse().map_err(|_| {
                AnalyzerError::state_computation(format!("unparseable numeric cell: {right}"))
            })?;
            state.accumulate(x, y);
        }
        Ok(state)
    }

    fn compute_metric_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Metric> {
        Ok(Self::coefficient(state))
    }

    fn name(&self) -> &str {
        "pearson"
    }

    fn description(&self) -> &str {
        "Computes the Pearson correlation between two numeric columns"
    }

    fn metric_key(&self) -> String {
        format!("pearson_c{}_c{}", self.first, self.second)
    }

    fn columns(&self) -> Vec<usize> {
        vec![self.first, self.second]
    }
}
