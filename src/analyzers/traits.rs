//! Core analyzer traits for the tabular analytics framework.

use async_trait::async_trait;
use datafusion::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::errors::AnalyzerResult;

/// Core trait for analyzers that compute metrics from a registered table.
///
/// Analyzers split computation in two: an async pass over the data that
/// produces an intermediate, mergeable [`AnalyzerState`], and a synchronous
/// transformation of that state into the final metric. The split keeps the
/// numeric logic pure and directly testable without a session context.
///
/// # Type Parameters
///
/// * `State` - The state type that holds intermediate computation results
/// * `Metric` - The final metric type produced by this analyzer
#[async_trait]
pub trait Analyzer: Send + Sync + Debug {
    /// The state type for incremental computation.
    type State: AnalyzerState;

    /// The metric type produced by this analyzer.
    type Metric: Send + Sync + Debug;

    /// Computes the state from the input data.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The DataFusion session context with the registered table
    async fn compute_state_from_data(&self, ctx: &SessionContext) -> AnalyzerResult<Self::State>;

    /// Computes the final metric from the accumulated state.
    ///
    /// This step is pure: it never touches the session context and is
    /// deterministic given the same state.
    fn compute_metric_from_state(&self, state: &Self::State) -> AnalyzerResult<Self::Metric>;

    /// Merges multiple states into a single state.
    ///
    /// Enables states computed from separate data partitions to be combined.
    fn merge_states(&self, states: Vec<Self::State>) -> AnalyzerResult<Self::State> {
        Self::State::merge(states)
    }

    /// Returns the name of this analyzer.
    fn name(&self) -> &str;

    /// Returns a description of what this analyzer computes.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the metric key for storing results.
    ///
    /// By default this returns the analyzer name; column-based analyzers
    /// override it to include the column position.
    fn metric_key(&self) -> String {
        self.name().to_string()
    }

    /// Returns the column indices this analyzer operates on, if any.
    fn columns(&self) -> Vec<usize> {
        vec![]
    }
}

/// Trait for analyzer state that supports incremental computation.
///
/// States must be serializable to support caching of intermediate results.
pub trait AnalyzerState:
    Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Merges multiple states into a single state.
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self>
    where
        Self: Sized;

    /// Returns whether this state represents an empty computation.
    fn is_empty(&self) -> bool {
        false
    }
}
