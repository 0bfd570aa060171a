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

//! The perturbation pipeline: sized variants crossed with artifact
//! families, each combination becoming one task instance.
//!
//! Every invocation of the transform engine is independent — each sized
//! variant owns its table copy and row indices are always local to it —
//! so variants fan out across threads with no shared mutable state.

use crate::error::{BuildError, Result};
use crate::size::SizedVariant;
use rayon::prelude::*;
use tarb_core::Table;
use tarb_tasks::{
    ArtifactType, PerturbationArtifact, TaskInstance, TaskMetadata, TaskRegistry,
};
use tracing::{debug, info};

/// Build the task instances for one sized variant: a clean instance
/// first, then one per registered perturbable artifact family.
pub fn add_perturbations_from_table(
    table: &Table,
    num_tokens: usize,
    token_bucket: usize,
    metadata: &TaskMetadata,
    registry: &TaskRegistry,
) -> Result<Vec<TaskInstance>> {
    let answer_fn = registry
        .answer_fn(&metadata.task_id)
        .ok_or_else(|| BuildError::NoAnswerFunction {
            task_id: metadata.task_id.clone(),
        })?;

    let mut instances = Vec::new();

    let clean = PerturbationArtifact::clean(table.clone())?;
    let clean_answer = answer_fn(table)?;
    instances.push(instance_from_artifact(
        clean,
        Some(clean_answer),
        num_tokens,
        token_bucket,
        metadata,
    ));

    for artifact_type in ArtifactType::perturbable() {
        let Some(perturb_fn) = registry.perturbation_fn(&metadata.task_id, artifact_type) else {
            continue;
        };
        let artifact = perturb_fn(table)?;
        artifact.validate()?;

        // Ground truth comes from the recovered table(s): one answer for
        // an unambiguous recovery, a list of per-recovery answers (with
        // list answers flattened) otherwise.
        let answer = if artifact.recovered_tables.len() == 1 {
            answer_fn(&artifact.recovered_tables[0])?
        } else {
            let answers = artifact
                .recovered_tables
                .iter()
                .map(|recovered| answer_fn(recovered))
                .collect::<tarb_tasks::Result<Vec<_>>>()?;
            if answers.iter().all(serde_json::Value::is_array) {
                serde_json::Value::Array(
                    answers
                        .into_iter()
                        .flat_map(|a| a.as_array().cloned().unwrap_or_default())
                        .collect(),
                )
            } else {
                serde_json::Value::Array(answers)
            }
        };

        debug!(
            task_id = %metadata.task_id,
            artifact_type = %artifact_type,
            rows = artifact.table.num_rows(),
            "perturbation injected"
        );
        instances.push(instance_from_artifact(
            artifact,
            Some(answer),
            num_tokens,
            token_bucket,
            metadata,
        ));
    }
    Ok(instances)
}

/// Build instances for every sized variant, fanning out across threads.
pub fn build_task_instances(
    variants: &[SizedVariant],
    metadata: &TaskMetadata,
    registry: &TaskRegistry,
) -> Result<Vec<TaskInstance>> {
    info!(
        task_id = %metadata.task_id,
        variants = variants.len(),
        "building task instances"
    );
    let nested: Vec<Vec<TaskInstance>> = variants
        .par_iter()
        .map(|variant| {
            add_perturbations_from_table(
                &variant.table,
                variant.num_tokens,
                variant.token_bucket,
                metadata,
                registry,
            )
        })
        .collect::<Result<_>>()?;
    let instances: Vec<TaskInstance> = nested.into_iter().flatten().collect();
    info!(
        task_id = %metadata.task_id,
        instances = instances.len(),
        "task instances built"
    );
    Ok(instances)
}

fn instance_from_artifact(
    artifact: PerturbationArtifact,
    answer: Option<serde_json::Value>,
    num_tokens: usize,
    token_bucket: usize,
    metadata: &TaskMetadata,
) -> TaskInstance {
    let num_rows = artifact.table.num_rows();
    let num_cols = artifact.table.num_cols();
    TaskInstance {
        task_id: metadata.task_id.clone(),
        query: metadata.query.clone(),
        artifact_type: artifact.artifact_type,
        artifact_scope: artifact.artifact_scope,
        query_cols: metadata.query_cols.clone(),
        artifact_reasoning_cols: artifact.artifact_reasoning_cols,
        table: artifact.table,
        num_rows,
        num_cols,
        base_data_num_tokens: num_tokens,
        base_data_token_bucket: token_bucket,
        recovered_tables_transform_spec: artifact.recovered_delta_specs,
        answer,
        perturbation_note: artifact.perturbation_note,
    }
}

/// True when `a` and `b` differ by more than `percent` percent of `a`.
pub fn is_percent_difference_exceeded(a: f64, b: f64, percent: f64) -> bool {
    if a == 0.0 && b == 0.0 {
        return false;
    }
    if a == 0.0 || b == 0.0 {
        return true;
    }
    ((a - b).abs() / a.abs()) * 100.0 > percent
}
