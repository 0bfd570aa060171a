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

//! Static task description loaded alongside each dataset.

use serde::{Deserialize, Serialize};

/// Metadata for a task: the question asked over the table and the column
/// constraints the build pipeline must respect when resampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetadata {
    /// Stable task identifier, also the registry key.
    pub task_id: String,
    /// The natural-language query posed over the table.
    pub query: String,
    /// Columns the query's answer depends on.
    pub query_cols: Vec<String>,
    /// Columns every sized variant must retain.
    pub minimum_columns: Vec<String>,
    /// Where the clean dataset came from.
    #[serde(default)]
    pub dataset_source: Option<String>,
    /// Columns that must stay on the left edge of the table.
    #[serde(default)]
    pub id_columns: Option<Vec<String>>,
}

impl TaskMetadata {
    /// Id columns, defaulting to none.
    pub fn id_columns(&self) -> &[String] {
        self.id_columns.as_deref().unwrap_or(&[])
    }

    /// Smallest column count any sized variant may have.
    pub fn min_column_count(&self) -> usize {
        self.minimum_columns.len() + self.id_columns().len()
    }
}
