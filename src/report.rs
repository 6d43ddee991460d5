//! Report assembly: the explicit recomputation trigger.
//!
//! [`TabularAnalytics::recompute`] converts a [`Table`] into the three
//! derived views in one pass: per-column descriptive statistics, per-column
//! distributions, and the Pearson correlation matrix over the all-numeric
//! columns. There is no hidden memoization; the caller invokes `recompute`
//! whenever the table changes and replaces the previous report wholesale.

use datafusion::prelude::SessionContext;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::analyzers::{
    classify, Analyzer, ColumnKind, CorrelationMatrix, DescriptiveStatsAnalyzer, Distribution,
    DistributionAnalyzer, PearsonAnalyzer, Statistics,
};
use crate::error::Result;
use crate::table::{Table, DEFAULT_TABLE_NAME};

/// Descriptive statistics for one column, labeled by header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    /// Column header (positional; headers are not required unique).
    pub column: String,
    /// The computed statistics.
    pub statistics: Statistics,
}

/// Value distribution for one column, labeled by header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDistribution {
    /// Column header.
    pub column: String,
    /// Histogram or category counts.
    pub distribution: Distribution,
}

/// The derived views of one table.
///
/// All numeric fields carry full precision; [`AnalyticsReport::rounded`]
/// produces the two-decimal presentation view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Statistics for every column with at least one numeric cell, in table
    /// order.
    pub statistics: Vec<ColumnStatistics>,
    /// One distribution per column, in table order.
    pub distributions: Vec<ColumnDistribution>,
    /// Pearson correlation over the all-numeric columns.
    pub correlation: CorrelationMatrix,
}

impl AnalyticsReport {
    /// Returns a copy with statistics and correlation coefficients rounded to
    /// two decimal places for display.
    pub fn rounded(&self) -> Self {
        Self {
            statistics: self
                .statistics
                .iter()
                .map(|cs| ColumnStatistics {
                    column: cs.column.clone(),
                    statistics: cs.statistics.rounded(),
                })
                .collect(),
            distributions: self.distributions.clone(),
            correlation: self.correlation.rounded(),
        }
    }

    /// Serializes the report as JSON for a presentation layer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Computes analytics reports from tables.
///
/// Stateless between invocations: each `recompute` call builds a fresh
/// session context, registers the table, and runs every analyzer from
/// scratch.
#[derive(Debug, Clone)]
pub struct TabularAnalytics {
    table_name: String,
}

impl Default for TabularAnalytics {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularAnalytics {
    /// Creates an engine registering tables under the default name.
    pub fn new() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }

    /// Overrides the name tables register under.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Recomputes all derived views for the given table.
    ///
    /// Column classification is re-evaluated here rather than read from any
    /// cache. Each unordered pair of numeric columns is computed once and
    /// mirrored, so the correlation matrix is exactly symmetric.
    #[instrument(skip(self, table), fields(columns = table.column_count(), rows = table.row_count()))]
    pub async fn recompute(&self, table: &Table) -> Result<AnalyticsReport> {
        let ctx = SessionContext::new();
        table.register(&ctx, &self.table_name)?;

        let statistics = self.compute_statistics(&ctx, table).await?;
        let distributions = self.compute_distributions(&ctx, table).await?;
        let correlation = self.compute_correlation(&ctx, table).await?;

        info!(
            statistics = statistics.len(),
            distributions = distributions.len(),
            numeric_columns = correlation.len(),
            "recomputed analytics report"
        );

        Ok(AnalyticsReport {
            statistics,
            distributions,
            correlation,
        })
    }

    /// Statistics for every column with at least one numeric cell.
    async fn compute_statistics(
        &self,
        ctx: &SessionContext,
        table: &Table,
    ) -> Result<Vec<ColumnStatistics>> {
        let mut results = Vec::new();
        for (index, header) in table.headers().iter().enumerate() {
            let analyzer =
                DescriptiveStatsAnalyzer::new(index).with_table_name(self.table_name.clone());
            let state = analyzer.compute_state_from_data(ctx).await?;
            if let Some(statistics) = analyzer.compute_metric_from_state(&state)? {
                results.push(ColumnStatistics {
                    column: header.clone(),
                    statistics,
                });
            }
        }
        Ok(results)
    }

    /// One distribution per column, numeric or categorical.
    async fn compute_distributions(
        &self,
        ctx: &SessionContext,
        table: &Table,
    ) -> Result<Vec<ColumnDistribution>> {
        let mut results = Vec::new();
        for (index, header) in table.headers().iter().enumerate() {
            let analyzer =
                DistributionAnalyzer::new(index).with_table_name(self.table_name.clone());
            let state = analyzer.compute_state_from_data(ctx).await?;
            let distribution = analyzer.compute_metric_from_state(&state)?;
            results.push(ColumnDistribution {
                column: header.clone(),
                distribution,
            });
        }
        Ok(results)
    }

    /// Pearson matrix over the all-numeric columns.
    async fn compute_correlation(
        &self,
        ctx: &SessionContext,
        table: &Table,
    ) -> Result<CorrelationMatrix> {
        let numeric: Vec<(usize, String)> = table
            .headers()
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                table
                    .column(*index)
                    .map(|cells| classify(cells) == ColumnKind::Numeric)
                    .unwrap_or(false)
            })
            .map(|(index, header)| (index, header.clone()))
            .collect();

        let size = numeric.len();
        if size == 0 {
            return Ok(CorrelationMatrix::empty());
        }

        let mut values: Vec<Vec<Option<f64>>> = vec![vec![None; size]; size];
        for (i, row) in values.iter_mut().enumerate() {
            // Diagonal is 1 by definition, no computation.
            row[i] = Some(1.0);
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let analyzer = PearsonAnalyzer::new(numeric[i].0, numeric[j].0)
                    .with_table_name(self.table_name.clone());
                let state = analyzer.compute_state_from_data(ctx).await?;
                let coefficient = analyzer.compute_metric_from_state(&state)?;
                values[i][j] = coefficient;
                values[j][i] = coefficient;
            }
        }

        Ok(CorrelationMatrix {
            columns: numeric.into_iter().map(|(_, header)| header).collect(),
            values,
        })
    }
}
