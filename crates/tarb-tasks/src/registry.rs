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

//! Explicit registry of per-task answer and perturbation functions.
//!
//! The registry is a plain value constructed by an initialization routine
//! and passed by reference wherever lookups happen. There is no global
//! state and no registration-at-import magic, so the set of registered
//! functions is exactly what the constructing code put there.

use crate::artifact::ArtifactType;
use crate::perturbation::{AnswerFn, PerturbationFn};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Per-task function registry.
#[derive(Default)]
pub struct TaskRegistry {
    answers: HashMap<String, AnswerFn>,
    perturbations: HashMap<(String, ArtifactType), PerturbationFn>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the answer function for a task.
    pub fn register_answer(&mut self, task_id: impl Into<String>, f: AnswerFn) {
        self.answers.insert(task_id.into(), f);
    }

    /// Register a perturbation function for a task and artifact family.
    pub fn register_perturbation(
        &mut self,
        task_id: impl Into<String>,
        artifact_type: ArtifactType,
        f: PerturbationFn,
    ) {
        self.perturbations.insert((task_id.into(), artifact_type), f);
    }

    /// Look up a task's answer function. Logs a warning when absent.
    pub fn answer_fn(&self, task_id: &str) -> Option<&AnswerFn> {
        let f = self.answers.get(task_id);
        if f.is_none() {
            warn!(task_id, "no answer function registered");
        }
        f
    }

    /// Look up a task's perturbation function for one artifact family.
    /// Logs a warning when absent.
    pub fn perturbation_fn(
        &self,
        task_id: &str,
        artifact_type: ArtifactType,
    ) -> Option<&PerturbationFn> {
        let f = self
            .perturbations
            .get(&(task_id.to_string(), artifact_type));
        if f.is_none() {
            warn!(
                task_id,
                artifact_type = %artifact_type,
                "no perturbation function registered"
            );
        }
        f
    }

    /// All task ids with at least one registered function, sorted.
    pub fn task_ids(&self) -> Vec<String> {
        let mut ids: BTreeSet<&str> = self.answers.keys().map(String::as_str).collect();
        ids.extend(self.perturbations.keys().map(|(id, _)| id.as_str()));
        ids.into_iter().map(str::to_string).collect()
    }
}

impl std::fmt::Debug for TaskRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRegistry")
            .field("answers", &self.answers.len())
            .field("perturbations", &self.perturbations.len())
            .finish()
    }
}
