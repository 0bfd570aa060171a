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

//! The persisted task instance: one perturbed table, its metadata, its
//! delta specs, and the expected answer.
//!
//! Instances are created once at build time and never mutated. Recovered
//! tables are not persisted; [`TaskInstance::recovered_tables`] replays
//! the stored specs against the stored table on every call, so there is
//! no cache to fall out of sync with the value it was derived from.

use crate::artifact::{ArtifactScope, ArtifactType};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use tarb_core::{apply_transform_spec, OverwriteCell, Table, TableDeltaSpec};

/// One persisted (table + metadata + answer) unit evaluated against a
/// language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInstance {
    /// Task identifier (registry key).
    pub task_id: String,
    /// The natural-language query.
    pub query: String,
    /// Artifact family injected into `table`.
    pub artifact_type: ArtifactType,
    /// Column span of the artifact's reasoning.
    pub artifact_scope: ArtifactScope,
    /// Columns the query depends on.
    pub query_cols: Vec<String>,
    /// Columns relevant to reasoning about the artifact.
    pub artifact_reasoning_cols: Vec<String>,
    /// The perturbed table presented to the model.
    pub table: Table,
    /// Rows in `table`.
    pub num_rows: usize,
    /// Columns in `table`.
    pub num_cols: usize,
    /// Token count of the sized clean table this instance was built from.
    pub base_data_num_tokens: usize,
    /// Token bucket the sizing aimed for.
    pub base_data_token_bucket: usize,
    /// One spec per recovered table, with `table` as source. Accepts the
    /// legacy dict-of-lists shape on input; always serializes as a list.
    #[serde(deserialize_with = "deserialize_spec_list")]
    pub recovered_tables_transform_spec: Vec<TableDeltaSpec>,
    /// Expected answer(s); a list when several recoveries are valid.
    #[serde(default)]
    pub answer: Option<serde_json::Value>,
    /// Optional note from the perturbation function.
    #[serde(default)]
    pub perturbation_note: Option<String>,
}

impl TaskInstance {
    /// The unique identifier instance files are named by.
    pub fn instance_id(&self) -> String {
        format!(
            "tid={}__artifact-type={}__ncols={}__token-bucket={}",
            self.task_id, self.artifact_type, self.num_cols, self.base_data_token_bucket
        )
    }

    /// Recompute the recovered table(s) by replaying each stored spec
    /// against the stored table. Purely derived; nothing is cached.
    pub fn recovered_tables(&self) -> Result<Vec<Table>> {
        self.recovered_tables_transform_spec
            .iter()
            .map(|spec| apply_transform_spec(&self.table, spec).map_err(Into::into))
            .collect()
    }

    /// The table rendered for prompting, plus the question.
    pub fn prompt_info(&self) -> Result<PromptInfo> {
        Ok(PromptInfo {
            table_csv: self.table.to_csv().map_err(crate::error::TaskError::from)?,
            question: self.query.clone(),
        })
    }

    /// Re-check invariants after deserialization: table shape, and the
    /// recorded row/column counts.
    pub fn validate(&self) -> Result<()> {
        self.table.validate().map_err(crate::error::TaskError::from)?;
        if self.table.num_rows() != self.num_rows {
            return Err(crate::error::TaskError::ShapeMismatch {
                field: "num_rows",
                recorded: self.num_rows,
                actual: self.table.num_rows(),
            });
        }
        if self.table.num_cols() != self.num_cols {
            return Err(crate::error::TaskError::ShapeMismatch {
                field: "num_cols",
                recorded: self.num_cols,
                actual: self.table.num_cols(),
            });
        }
        Ok(())
    }
}

/// What a prompting baseline needs from an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    /// Canonical CSV rendering of the perturbed table.
    pub table_csv: String,
    /// The query to pose.
    pub question: String,
}

/// Wire shapes the spec list arrives in. Older files store one dict of
/// parallel lists instead of a list of spec objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum SpecListRepr {
    List(Vec<TableDeltaSpec>),
    DictOfLists {
        drop_rows: Vec<Vec<usize>>,
        overwrite_cells: Vec<Vec<OverwriteCell>>,
    },
}

/// Normalize the legacy dict-of-lists shape into the list shape: entry
/// `i` of every parallel list becomes field `i` of spec `i`.
fn deserialize_spec_list<'de, D>(deserializer: D) -> std::result::Result<Vec<TableDeltaSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    match SpecListRepr::deserialize(deserializer)? {
        SpecListRepr::List(specs) => Ok(specs),
        SpecListRepr::DictOfLists {
            drop_rows,
            overwrite_cells,
        } => {
            if drop_rows.len() != overwrite_cells.len() {
                return Err(serde::de::Error::custom(format!(
                    "parallel lists must have the same length: {} drop_rows vs {} overwrite_cells",
                    drop_rows.len(),
                    overwrite_cells.len()
                )));
            }
            Ok(drop_rows
                .into_iter()
                .zip(overwrite_cells)
                .map(|(drop_rows, overwrite_cells)| TableDeltaSpec {
                    drop_rows,
                    overwrite_cells,
                })
                .collect())
        }
    }
}
