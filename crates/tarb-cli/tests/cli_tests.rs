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

//! Integration tests for the `tarb` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tarb_build::io::write_task_instances;
use tarb_build::pipeline::add_perturbations_from_table;
use tarb_tasks::funcs::{builtin_registry, demo_table, WEEKLY_CLINIC_VISITS};
use tarb_tasks::TaskMetadata;

fn metadata() -> TaskMetadata {
    TaskMetadata {
        task_id: WEEKLY_CLINIC_VISITS.to_string(),
        query: "What is the median number of visits?".to_string(),
        query_cols: vec!["Visits 25-64".to_string()],
        minimum_columns: vec![
            "Visits 25-49".to_string(),
            "Visits 50-64".to_string(),
            "Visits 25-64".to_string(),
        ],
        dataset_source: None,
        id_columns: Some(vec!["Week".to_string()]),
    }
}

fn write_instances(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
    let table = demo_table(40);
    let registry = builtin_registry();
    let instances =
        add_perturbations_from_table(&table, 500, 512, &metadata(), &registry).unwrap();
    write_task_instances(dir, &instances).unwrap()
}

#[test]
fn verify_accepts_built_instances() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_instances(dir.path());

    let mut cmd = Command::cargo_bin("tarb").unwrap();
    cmd.arg("verify");
    for path in &paths {
        cmd.arg(path);
    }
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("✓").count(paths.len()));
}

#[test]
fn verify_rejects_tampered_spec() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_instances(dir.path());

    // Point an overwrite at a column the table does not have.
    let text = std::fs::read_to_string(&paths[1]).unwrap();
    let tampered = text.replace("\"col\": \"Visits 25-64\"", "\"col\": \"No Such Column\"");
    std::fs::write(&paths[1], tampered).unwrap();

    Command::cargo_bin("tarb")
        .unwrap()
        .arg("verify")
        .arg(&paths[1])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗"));
}

#[test]
fn inspect_summarizes_instance() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_instances(dir.path());

    Command::cargo_bin("tarb")
        .unwrap()
        .arg("inspect")
        .arg(&paths[0])
        .assert()
        .success()
        .stdout(predicate::str::contains("artifact-type=clean"))
        .stdout(predicate::str::contains("weekly-clinic-visits"));
}
