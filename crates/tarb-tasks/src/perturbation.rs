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

//! The contract every domain perturbation function fulfills.
//!
//! A perturbation function takes a clean table and returns a
//! [`PerturbationArtifact`]: the perturbed table, one or more recovered
//! tables (plural when the injected defect admits several equally valid
//! recoveries), and one delta spec per recovered table. Specs are always
//! derived through the transform inferrer, never hand-authored — that is
//! what keeps every persisted spec verifiably consistent with the two
//! tables it relates.

use crate::artifact::{ArtifactScope, ArtifactType};
use crate::error::{Result, TaskError};
use tarb_core::{generate_transform_spec_delete_overwrite, Table, TableDeltaSpec};

/// Everything a perturbation function must hand back to the pipeline.
#[derive(Debug, Clone)]
pub struct PerturbationArtifact {
    /// The perturbed table.
    pub table: Table,
    /// Ground-truth recoveries; more than one when the defect is
    /// ambiguous.
    pub recovered_tables: Vec<Table>,
    /// One spec per recovered table, with the perturbed table as source.
    pub recovered_delta_specs: Vec<TableDeltaSpec>,
    /// Which artifact family was injected.
    pub artifact_type: ArtifactType,
    /// How many columns the artifact's reasoning spans.
    pub artifact_scope: ArtifactScope,
    /// Columns relevant to reasoning about the artifact.
    pub artifact_reasoning_cols: Vec<String>,
    /// Optional human-readable note about the injection.
    pub perturbation_note: Option<String>,
}

impl PerturbationArtifact {
    /// Assemble an artifact from a perturbed table and its recoveries,
    /// deriving one delta spec per recovered table through the inferrer.
    pub fn from_recovered(
        table: Table,
        recovered_tables: Vec<Table>,
        artifact_type: ArtifactType,
        artifact_scope: ArtifactScope,
        artifact_reasoning_cols: Vec<String>,
        perturbation_note: Option<String>,
    ) -> Result<Self> {
        let recovered_delta_specs = recovered_tables
            .iter()
            .map(|recovered| generate_transform_spec_delete_overwrite(&table, recovered))
            .collect::<tarb_core::Result<Vec<_>>>()?;
        Ok(Self {
            table,
            recovered_tables,
            recovered_delta_specs,
            artifact_type,
            artifact_scope,
            artifact_reasoning_cols,
            perturbation_note,
        })
    }

    /// The identity case: nothing injected, the table recovers to itself.
    pub fn clean(table: Table) -> Result<Self> {
        let recovered = table.clone();
        Self::from_recovered(
            table,
            vec![recovered],
            ArtifactType::Clean,
            ArtifactScope::Clean,
            Vec::new(),
            None,
        )
    }

    /// Check the one-spec-per-recovery invariant.
    pub fn validate(&self) -> Result<()> {
        if self.recovered_tables.len() != self.recovered_delta_specs.len() {
            return Err(TaskError::RecoveryMismatch {
                tables: self.recovered_tables.len(),
                specs: self.recovered_delta_specs.len(),
            });
        }
        Ok(())
    }
}

/// A domain perturbation function: clean table in, artifact out.
pub type PerturbationFn = Box<dyn Fn(&Table) -> Result<PerturbationArtifact> + Send + Sync>;

/// An answer function: table in, ground-truth answer out.
pub type AnswerFn = Box<dyn Fn(&Table) -> Result<serde_json::Value> + Send + Sync>;
