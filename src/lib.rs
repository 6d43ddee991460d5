//! # tabular-analytics
//!
//! Tabular analytics turns a rectangular table of string cells into three
//! derived views, leaving rendering and file handling to the embedding
//! application:
//!
//! - **Column statistics** — count, mean, population standard deviation,
//!   min, nearest-rank quartiles, median, max, and mode for every column
//!   with at least one numeric cell
//! - **Distributions** — a 10-bin equal-width histogram for numeric columns,
//!   exact category counts for everything else
//! - **Correlation matrix** — pairwise Pearson correlation over the
//!   all-numeric columns, exactly symmetric with a unit diagonal
//!
//! Data loads through a deliberately naive comma/newline split (no quoting
//! support); the first line holds the column names. A table replaces any
//! prior table wholesale and every view is recomputed from scratch through
//! an explicit [`recompute`](report::TabularAnalytics::recompute) call — no
//! hidden memoization.
//!
//! ## Modules
//!
//! - [`table`] — string-cell table model, ingestion, preview, registration
//! - [`analyzers`] — the analyzer framework and the three metric analyzers
//! - [`report`] — `recompute(table) -> AnalyticsReport` orchestration
//! - [`session`] — upload lifecycle with stale-completion protection
//! - [`error`] — error types
//! - [`logging`] — opt-in tracing setup for embedding applications
//!
//! ## Quick Start
//!
//! ```
//! use tabular_analytics::prelude::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let csv = "age,city\n31,Lisbon\n42,Osaka\n31,Lisbon\n";
//! let table = Table::parse(csv).unwrap();
//!
//! let report = TabularAnalytics::new().recompute(&table).await.unwrap();
//!
//! // "age" is all-numeric, "city" is categorical.
//! assert_eq!(report.statistics.len(), 1);
//! assert_eq!(report.statistics[0].column, "age");
//! assert_eq!(report.statistics[0].statistics.mode, 31.0);
//!
//! assert_eq!(report.distributions.len(), 2);
//! assert_eq!(report.correlation.columns, vec!["age".to_string()]);
//! assert_eq!(report.correlation.get(0, 0), Some(Some(1.0)));
//! # });
//! ```

pub mod analyzers;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod session;
pub mod table;
