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

//! File I/O for task directories and persisted instances.
//!
//! A task directory holds `data.csv` (the clean table) and
//! `metadata.yaml`. Built instances land one file per (task, artifact
//! type, size) combination, named by the instance id.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tarb_core::Table;
use tarb_tasks::{TaskInstance, TaskMetadata};
use tracing::info;

/// Load the clean table from a task directory's `data.csv`.
pub fn load_clean_table(task_dir: &Path) -> Result<Table> {
    let text = fs::read_to_string(task_dir.join("data.csv"))?;
    Ok(Table::from_csv(&text)?)
}

/// Load a task's `metadata.yaml`.
pub fn load_metadata(task_dir: &Path) -> Result<TaskMetadata> {
    let text = fs::read_to_string(task_dir.join("metadata.yaml"))?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Write one pretty-printed JSON file per instance into `out_dir`,
/// creating it if needed. Returns the written paths.
pub fn write_task_instances(out_dir: &Path, instances: &[TaskInstance]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut paths = Vec::with_capacity(instances.len());
    for instance in instances {
        let path = out_dir.join(format!("{}.json", instance.instance_id()));
        fs::write(&path, serde_json::to_string_pretty(instance)?)?;
        paths.push(path);
    }
    info!(count = paths.len(), dir = %out_dir.display(), "task instances written");
    Ok(paths)
}

/// Read one persisted instance back, normalizing legacy spec shapes and
/// re-checking the table invariants.
pub fn read_task_instance(path: &Path) -> Result<TaskInstance> {
    let text = fs::read_to_string(path)?;
    let instance: TaskInstance = serde_json::from_str(&text)?;
    instance.validate()?;
    Ok(instance)
}
