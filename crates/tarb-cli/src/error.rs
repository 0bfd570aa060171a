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

//! Error type for the command-line interface.

use thiserror::Error;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the transform engine.
    #[error(transparent)]
    Core(#[from] tarb_core::CoreError),

    /// Error from the task layer.
    #[error(transparent)]
    Task(#[from] tarb_tasks::TaskError),

    /// Error from the build pipeline.
    #[error(transparent)]
    Build(#[from] tarb_build::BuildError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A re-derived spec did not reproduce its recovered table.
    #[error("Spec {index} does not reproduce its recovered table")]
    RoundTripMismatch {
        /// Index of the failing spec within the instance.
        index: usize,
    },

    /// One or more files failed verification.
    #[error("{failed} of {total} instance file(s) failed verification")]
    VerificationFailed {
        /// Files that failed.
        failed: usize,
        /// Files checked.
        total: usize,
    },
}

/// Convenience type alias for `Result` with [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
