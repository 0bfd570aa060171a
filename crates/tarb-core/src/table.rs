// TARB - Table Artifact Robustness Benchmark
//
// Copyright (c) 2026 the TARB contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Immutable header/row table snapshots and their canonical CSV rendering.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Textual spellings that count as a missing value.
///
/// Cells are pre-rendered strings, so "missing" has more than one spelling
/// depending on what produced the snapshot. All of these compare equal to
/// each other during diffing.
const MISSING_SPELLINGS: &[&str] = &["", "NaN", "nan", "NA", "N/A", "null", "None"];

/// Returns true if the cell text denotes a missing value.
pub fn is_missing_cell(cell: &str) -> bool {
    MISSING_SPELLINGS.contains(&cell)
}

/// An ordered table snapshot: column names plus rows of pre-rendered
/// string cells.
///
/// Invariants, enforced by [`Table::new`] and re-checkable with
/// [`Table::validate`]:
///
/// - headers are unique and order-significant;
/// - every row has exactly `headers.len()` cells.
///
/// Wire shape: `{"headers": [string], "rows": [[string]]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, order-significant.
    pub headers: Vec<String>,
    /// Row data, aligned positionally to `headers`.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table, validating the header and row-width invariants.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let table = Self { headers, rows };
        table.validate()?;
        Ok(table)
    }

    /// Re-check the invariants (useful after deserialization).
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &self.headers {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::DuplicateHeader { name: name.clone() });
            }
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.headers.len() {
                return Err(CoreError::WidthMismatch {
                    expected: self.headers.len(),
                    actual: row.len(),
                    row: i,
                });
            }
        }
        Ok(())
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.headers.len()
    }

    /// Positional index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| self.unknown_column(name))?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// A single cell by row index and column name.
    pub fn cell(&self, row: usize, col: &str) -> Option<&str> {
        let idx = self.column_index(col)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Overwrite a single cell. Errors on an unknown column; out-of-range
    /// rows are a no-op, matching the applier's tolerance.
    pub fn set_cell(&mut self, row: usize, col: &str, value: impl Into<String>) -> Result<()> {
        let idx = self
            .column_index(col)
            .ok_or_else(|| self.unknown_column(col))?;
        if let Some(r) = self.rows.get_mut(row) {
            r[idx] = value.into();
        }
        Ok(())
    }

    /// Project onto a subset of columns, in the given order.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Table> {
        let mut indices = Vec::with_capacity(columns.len());
        for col in columns {
            let idx = self
                .column_index(col.as_ref())
                .ok_or_else(|| self.unknown_column(col.as_ref()))?;
            indices.push(idx);
        }
        let headers = indices.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Table { headers, rows })
    }

    /// The first `n` rows (all rows if `n` exceeds the row count).
    pub fn head(&self, n: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// A copy without the rows at the given indices.
    pub fn without_rows(&self, indices: &BTreeSet<usize>) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .filter(|(i, _)| !indices.contains(i))
                .map(|(_, row)| row.clone())
                .collect(),
        }
    }

    /// Render to the canonical CSV flattening: header line first,
    /// `QuoteStyle::Necessary`, `\n` terminator, missing values as empty
    /// fields. This is the byte-for-byte representation the transform
    /// inferrer diffs on.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| CoreError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|_| CoreError::InvalidUtf8 {
            context: "CSV rendering".to_string(),
        })
    }

    /// Parse a table from CSV text with a header line.
    pub fn from_csv(text: &str) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Table::new(headers, rows)
    }

    /// Cell-wise equality up to missing-value spelling: two cells match if
    /// they are byte-equal or both missing.
    pub fn content_eq(&self, other: &Table) -> bool {
        if self.headers != other.headers || self.rows.len() != other.rows.len() {
            return false;
        }
        self.rows.iter().zip(&other.rows).all(|(a, b)| {
            a.iter()
                .zip(b)
                .all(|(x, y)| x == y || (is_missing_cell(x) && is_missing_cell(y)))
        })
    }

    pub(crate) fn unknown_column(&self, col: &str) -> CoreError {
        CoreError::UnknownColumn {
            col: col.to_string(),
            available: self.headers.join(", "),
        }
    }
}
