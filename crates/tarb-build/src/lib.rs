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

//! Build pipeline for TARB: sized table variants, perturbation fan-out,
//! and task-instance file I/O.
//!
//! The pipeline resamples columns and rows of a clean table to hit target
//! token buckets, then invokes every registered perturbation function on
//! each sized variant. Each (variant x artifact family) combination
//! becomes one persisted task instance whose delta specs come verbatim
//! from the transform inferrer.

mod error;
pub mod io;
pub mod pipeline;
pub mod sample;
pub mod size;

pub use error::{BuildError, Result};
pub use pipeline::{add_perturbations_from_table, build_task_instances};
pub use sample::{sample_columns, sample_table};
pub use size::{build_sized_variants, count_tokens, fit_rows_to_token_budget, SizedVariant};
