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

//! Error types for table snapshots and the transform engine.

use thiserror::Error;

/// Errors produced by table construction, the transform applier, and the
/// transform inferrer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A header name appears more than once in a table.
    #[error("Duplicate header: {name}")]
    DuplicateHeader {
        /// The repeated column name.
        name: String,
    },

    /// A row does not have exactly one cell per header.
    #[error("Row width mismatch: expected {expected} cells, got {actual} in row {row}")]
    WidthMismatch {
        /// Expected number of cells.
        expected: usize,
        /// Actual number of cells in the row.
        actual: usize,
        /// Row index (0-based).
        row: usize,
    },

    /// An overwrite references a column the table does not have.
    ///
    /// Unlike out-of-range row indices, which are tolerated, this always
    /// fails: the caller handed a spec that belongs to a different table.
    #[error("Unknown column '{col}' (available: {available})")]
    UnknownColumn {
        /// The missing column name.
        col: String,
        /// Comma-separated list of columns the table does have.
        available: String,
    },

    /// Source and target tables do not share the same header sequence.
    #[error("Header mismatch: source {source_headers:?} vs target {target_headers:?}")]
    HeaderMismatch {
        /// Headers of the source table.
        source_headers: Vec<String>,
        /// Headers of the target table.
        target_headers: Vec<String>,
    },

    /// The target table contains rows the source does not.
    ///
    /// The delta language only expresses deletions and overwrites of
    /// existing source rows, so an insertion cannot be encoded.
    #[error("Target inserts {count} row(s) at source index {at}; insertions are not representable")]
    RowInsertion {
        /// Source index where the extra rows would sit.
        at: usize,
        /// Number of unexplained target rows.
        count: usize,
    },

    /// A cell contains a line break, which the line-oriented canonical
    /// rendering cannot diff.
    #[error("Cell at row {row}, column '{col}' contains a line break")]
    EmbeddedNewline {
        /// Row index (0-based).
        row: usize,
        /// Column name.
        col: String,
    },

    /// Error from the underlying CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error during CSV rendering.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8 in rendered CSV output.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// Context where the invalid UTF-8 was encountered.
        context: String,
    },
}

/// Convenience type alias for `Result` with [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
