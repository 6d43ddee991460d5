//! Metric types produced by the analyzers.
//!
//! All numeric fields carry full `f64` precision. Display rounding to two
//! decimal places happens only through the explicit `rounded()` views, so a
//! consumer that feeds these values into further computation never loses
//! precision.

use serde::{Deserialize, Serialize};

/// Rounds a value to two decimal places for presentation.
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Descriptive statistics for the numeric cells of a column.
///
/// Quartiles use the nearest-rank method (indexing the sorted values at a
/// fixed fractional position, no interpolation) and the standard deviation is
/// the population form (divisor = count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of numeric cells that contributed.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// First quartile, `sorted[⌊count × 0.25⌋]`.
    pub q1: f64,
    /// Median: central element, or the mean of the two central elements when
    /// the count is even.
    pub median: f64,
    /// Third quartile, `sorted[⌊count × 0.75⌋]`.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
    /// Most frequent value; ties go to the first value in sorted order.
    pub mode: f64,
}

impl Statistics {
    /// Returns a copy with every value rounded to two decimal places.
    pub fn rounded(&self) -> Self {
        Self {
            count: self.count,
            mean: round2(self.mean),
            std: round2(self.std),
            min: round2(self.min),
            q1: round2(self.q1),
            median: round2(self.median),
            q3: round2(self.q3),
            max: round2(self.max),
            mode: round2(self.mode),
        }
    }
}

/// A single bin of a numeric histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// Lower bound of the bucket (inclusive).
    pub lower_bound: f64,
    /// Upper bound of the bucket (inclusive for the last bucket, exclusive
    /// otherwise).
    pub upper_bound: f64,
    /// Count of values in this bucket.
    pub count: u64,
}

impl HistogramBucket {
    /// Creates a new histogram bucket.
    pub fn new(lower_bound: f64, upper_bound: f64, count: u64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            count,
        }
    }

    /// Returns the width of the bucket.
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Returns the numeric range label for this bucket.
    pub fn label(&self) -> String {
        format!(
            "{:.2} - {:.2}",
            round2(self.lower_bound),
            round2(self.upper_bound)
        )
    }
}

/// A single bucket of a categorical distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    /// The exact cell value (case- and whitespace-sensitive).
    pub value: String,
    /// Count of occurrences.
    pub count: u64,
}

impl CategoryBucket {
    /// Creates a new category bucket.
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Value distribution of a column.
///
/// Numeric columns get an equal-width histogram in increasing range order;
/// every other column gets one bucket per distinct value in first-appearance
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "buckets")]
pub enum Distribution {
    /// Equal-width histogram over the parsed numeric values.
    Numeric(Vec<HistogramBucket>),
    /// Exact-match category counts.
    Categorical(Vec<CategoryBucket>),
}

impl Distribution {
    /// Returns the number of buckets in the distribution.
    pub fn bucket_count(&self) -> usize {
        match self {
            Distribution::Numeric(buckets) => buckets.len(),
            Distribution::Categorical(buckets) => buckets.len(),
        }
    }

    /// Returns the total count across all buckets.
    pub fn total_count(&self) -> u64 {
        match self {
            Distribution::Numeric(buckets) => buckets.iter().map(|b| b.count).sum(),
            Distribution::Categorical(buckets) => buckets.iter().map(|b| b.count).sum(),
        }
    }
}

/// A labeled, square, symmetric Pearson correlation matrix.
///
/// Indexed row-major over the all-numeric columns of a table. The diagonal is
/// exactly `Some(1.0)`; an off-diagonal entry is `None` when either column
/// has zero variance, so non-finite values never propagate downstream. Each
/// unordered pair is computed once and mirrored, making the matrix exactly
/// symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Header names of the numeric columns, in table order.
    pub columns: Vec<String>,
    /// Row-major coefficient grid, `values[i][j]` in `[-1, 1]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Creates an empty matrix over no columns.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Returns the number of columns (and rows) of the matrix.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the matrix covers no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the coefficient at `(row, col)`, if both indices are in range.
    pub fn get(&self, row: usize, col: usize) -> Option<Option<f64>> {
        self.values.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns a copy with every defined coefficient rounded to two decimal
    /// places.
    pub fn rounded(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            values: self
                .values
                .iter()
                .map(|row| row.iter().map(|v| v.map(round2)).collect())
                .collect(),
        }
    }
}
