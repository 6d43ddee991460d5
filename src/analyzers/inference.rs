//! Numeric classification of cells and columns.
//!
//! Classification is all-or-nothing: a column counts as numeric only when
//! every one of its cells parses as a finite number, so a single bad cell
//! demotes the whole column to categorical. It is re-evaluated from the raw
//! cells on every derived view rather than cached on the table.

use serde::{Deserialize, Serialize};

/// The analytic kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Every cell parses as a finite number.
    Numeric,
    /// At least one cell is non-numeric, or the column has no cells.
    Categorical,
}

/// Returns true iff the cell holds a finite number.
///
/// The cell is trimmed before parsing; an empty or whitespace-only cell is
/// non-numeric, and so are literals that parse to non-finite values such as
/// `NaN` or `inf`.
pub fn is_numeric_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Classifies a column from its raw cells.
///
/// A column with zero cells classifies as categorical: there is no numeric
/// evidence, and the vacuous case would otherwise surface empty statistics.
pub fn classify<'a, I>(cells: I) -> ColumnKind
where
    I: IntoIterator<Item = &'a str>,
{
    let mut saw_any = false;
    for cell in cells {
        saw_any = true;
        if !is_numeric_cell(cell) {
            return ColumnKind::Categorical;
        }
    }
    if saw_any {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Parses the numeric cells of a column, dropping everything else.
///
/// Order is preserved, so index-based statistics computed on the sorted copy
/// relate to the numeric-filtered sequence, not the original column.
pub fn numeric_values<'a, I>(cells: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    cells
        .into_iter()
        .filter_map(|cell| {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        })
        .collect()
}
