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

//! Error types for the build pipeline.

use thiserror::Error;

/// Errors produced while sizing tables and building task instances.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Error from the transform engine.
    #[error(transparent)]
    Core(#[from] tarb_core::CoreError),

    /// Error from the task layer.
    #[error(transparent)]
    Task(#[from] tarb_tasks::TaskError),

    /// A column budget below what the task metadata requires.
    #[error("Requested {requested} columns, but the task requires at least {minimum}")]
    NotEnoughColumns {
        /// Columns requested.
        requested: usize,
        /// Minimum imposed by metadata (kept + id columns).
        minimum: usize,
    },

    /// A column budget above what the dataset offers.
    #[error("Requested {requested} columns, but the table only has {available}")]
    TooManyColumns {
        /// Columns requested.
        requested: usize,
        /// Columns available.
        available: usize,
    },

    /// A row budget above what the dataset offers.
    #[error("Cannot sample {requested} rows from a table with {available}")]
    NotEnoughRows {
        /// Rows requested.
        requested: usize,
        /// Rows available.
        available: usize,
    },

    /// The registry has no answer function for a task that needs one.
    #[error("No answer function registered for task '{task_id}'")]
    NoAnswerFunction {
        /// The task missing a function.
        task_id: String,
    },

    /// I/O error reading or writing task files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience type alias for `Result` with [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;
