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

//! Table snapshots, reversible delta specs, and the transform engine.
//!
//! This crate is the core of TARB: it describes a reversible edit between
//! two table snapshots ([`TableDeltaSpec`]), infers such a transform from
//! two arbitrary snapshots ([`generate_transform_spec_delete_overwrite`]),
//! and replays a transform to deterministically reconstruct a table
//! ([`apply_transform_spec`]).
//!
//! The invariant everything downstream depends on: for any source table
//! `S` and any target `T` reachable from `S` by deleting rows and/or
//! overwriting existing cells (no insertions, no reordering),
//!
//! ```text
//! apply_transform_spec(S, &generate_transform_spec_delete_overwrite(S, T)?)? == T
//! ```
//!
//! cell-for-cell, up to missing-value spelling.
//!
//! All operations are synchronous, CPU-bound, and free of shared mutable
//! state; independent `(table, spec)` pairs can be processed concurrently
//! without locking.

mod delta;
mod diff;
mod error;
mod infer;
mod table;

pub use delta::{apply_transform_spec, CellValue, OverwriteCell, TableDeltaSpec};
pub use diff::{opcodes, OpTag, Opcode};
pub use error::{CoreError, Result};
pub use infer::generate_transform_spec_delete_overwrite;
pub use table::{is_missing_cell, Table};
