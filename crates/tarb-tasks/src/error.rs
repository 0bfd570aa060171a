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

//! Error types for the task layer.

use thiserror::Error;

/// Errors produced by perturbation functions, task instances, and the
/// sampling helpers.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Error from the transform engine.
    #[error(transparent)]
    Core(#[from] tarb_core::CoreError),

    /// A perturbation produced a different number of recovered tables and
    /// delta specs.
    #[error("Recovered table/spec count mismatch: {tables} tables, {specs} specs")]
    RecoveryMismatch {
        /// Number of recovered tables.
        tables: usize,
        /// Number of delta specs.
        specs: usize,
    },

    /// Not enough rows left to satisfy a sampling request.
    #[error("Not enough rows: needed {needed}, only {available} available")]
    InsufficientRows {
        /// Rows the request needs.
        needed: usize,
        /// Rows actually available.
        available: usize,
    },

    /// A cell expected to hold a number did not parse as one.
    #[error("Cell at row {row}, column '{col}' is not numeric: '{value}'")]
    NonNumericCell {
        /// Row index (0-based).
        row: usize,
        /// Column name.
        col: String,
        /// The offending cell text.
        value: String,
    },

    /// A column has no usable values for the requested statistic.
    #[error("Column '{col}' has no usable values")]
    EmptyColumn {
        /// Column name.
        col: String,
    },

    /// A persisted instance's recorded shape disagrees with its table.
    #[error("Instance records {field} = {recorded}, but the table has {actual}")]
    ShapeMismatch {
        /// Which recorded field disagrees.
        field: &'static str,
        /// The recorded value.
        recorded: usize,
        /// The value derived from the table.
        actual: usize,
    },

    /// The predicted answer text carries no extractable answer.
    #[error("No answer marker found in response")]
    MissingAnswerMarker,

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result` with [`TaskError`].
pub type Result<T> = std::result::Result<T, TaskError>;
