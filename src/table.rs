//! Tabular data model and ingestion.
//!
//! A [`Table`] is an ordered sequence of column names paired with rows of
//! string cells. Ingestion is deliberately naive: lines split on newlines,
//! cells split on commas, first line is the header. Quoting and escaping are
//! out of scope, so a comma inside a quoted field is treated as a delimiter.
//!
//! A table replaces any prior table wholesale; derived views are recomputed
//! from scratch whenever the table changes and nothing is cached on the table
//! itself.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyticsError, Result};

/// Default name a table registers under in a session context.
pub const DEFAULT_TABLE_NAME: &str = "data";

/// A rectangular table of string cells.
///
/// Invariant: every row has exactly `headers().len()` cells. Ingestion
/// normalizes malformed rows to keep it (short rows are padded with empty
/// cells, long rows truncated). Column names are not required to be unique;
/// columns are addressed positionally throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses raw text content into a table.
    ///
    /// The first non-empty line holds the column names, all following lines
    /// are data rows. Lines that are empty after stripping a trailing `\r`
    /// are skipped, which also absorbs trailing blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EmptyInput`] when the content yields zero
    /// parseable lines.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty());

        let header_line = lines.next().ok_or(AnalyticsError::EmptyInput)?;
        let headers: Vec<String> = header_line.split(',').map(str::to_string).collect();
        let width = headers.len();

        let rows: Vec<Vec<String>> = lines
            .map(|line| {
                let mut cells: Vec<String> = line.split(',').map(str::to_string).collect();
                // Normalize malformed rows to the header width: pads short
                // rows with empty cells, truncates long ones.
                cells.resize(width, String::new());
                cells
            })
            .collect();

        debug!(columns = width, rows = rows.len(), "parsed table");
        Ok(Self { headers, rows })
    }

    /// Reads a file and parses its content into a table.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Io`] when the read fails, or any error
    /// [`Table::parse`] produces.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Returns the ordered column names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns all data rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns the cells of the column at `index`, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::ColumnNotFound`] when the index is out of
    /// bounds.
    pub fn column(&self, index: usize) -> Result<Vec<&str>> {
        if index >= self.headers.len() {
            return Err(AnalyticsError::column_not_found(index, self.headers.len()));
        }
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Returns the first `count` rows, for preview rendering.
    ///
    /// Any non-negative count is accepted; callers bound it as they see fit.
    pub fn preview(&self, count: usize) -> &[Vec<String>] {
        &self.rows[..count.min(self.rows.len())]
    }

    /// Registers the table with a DataFusion session context.
    ///
    /// Columns become non-nullable Utf8 fields under synthetic names
    /// (`c0`, `c1`, ...), so duplicate or unusual headers never reach the SQL
    /// layer; display names stay on the table. The data lands in a single
    /// partition, preserving row order for order-sensitive metrics.
    pub fn register(&self, ctx: &SessionContext, table_name: &str) -> Result<()> {
        let fields: Vec<Field> = (0..self.headers.len())
            .map(|i| Field::new(format!("c{i}"), DataType::Utf8, false))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let arrays: Vec<ArrayRef> = (0..self.headers.len())
            .map(|i| {
                let cells: Vec<&str> = self.rows.iter().map(|row| row[i].as_str()).collect();
                Arc::new(StringArray::from(cells)) as ArrayRef
            })
            .collect();

        let batch = RecordBatch::try_new(schema.clone(), arrays)?;
        let provider = MemTable::try_new(schema, vec![vec![batch]])?;
        ctx.register_table(table_name, Arc::new(provider))?;

        debug!(table = table_name, "registered table");
        Ok(())
    }
}
