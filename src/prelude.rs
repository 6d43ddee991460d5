//! Prelude for commonly used types in tabular-analytics.

pub use crate::analyzers::{
    CategoryBucket, ColumnKind, CorrelationMatrix, Distribution, HistogramBucket, Statistics,
};
pub use crate::error::{AnalyticsError, Result};
pub use crate::logging::LoggingConfig;
pub use crate::report::{AnalyticsReport, ColumnDistribution, ColumnStatistics, TabularAnalytics};
pub use crate::session::{AnalyticsSession, LoadToken};
pub use crate::table::Table;
