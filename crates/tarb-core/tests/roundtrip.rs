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

//! End-to-end round-trip scenarios over the infer/apply pair.

use tarb_core::{
    apply_transform_spec, generate_transform_spec_delete_overwrite, CellValue, OverwriteCell,
    Table, TableDeltaSpec,
};

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn roundtrip_deletes_and_overwrites() {
    let source = table(
        &["week", "region", "cases"],
        &[
            &["1", "north", "10"],
            &["2", "north", "12"],
            &["3", "south", "7"],
            &["4", "south", "9"],
        ],
    );
    let target = table(
        &["week", "region", "cases"],
        &[
            &["1", "north", "10"],
            &["3", "south", "70"],
            &["4", "south", "9"],
        ],
    );
    let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
    let replayed = apply_transform_spec(&source, &spec).unwrap();
    assert_eq!(replayed, target);
}

#[test]
fn roundtrip_identity() {
    let source = table(&["a", "b"], &[&["1", "2"], &["3", "4"]]);
    let spec = generate_transform_spec_delete_overwrite(&source, &source).unwrap();
    assert!(spec.is_identity());
    assert_eq!(apply_transform_spec(&source, &spec).unwrap(), source);
}

#[test]
fn roundtrip_delete_everything() {
    let source = table(&["a"], &[&["1"], &["2"], &["3"]]);
    let target = table(&["a"], &[]);
    let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
    assert_eq!(spec.drop_rows, vec![0, 1, 2]);
    assert_eq!(apply_transform_spec(&source, &spec).unwrap(), target);
}

#[test]
fn roundtrip_overwrite_into_missing() {
    let source = table(&["name", "value"], &[&["a", "1"], &["b", "2"]]);
    let target = table(&["name", "value"], &[&["a", ""], &["b", "2"]]);
    let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
    assert_eq!(spec.overwrite_cells.len(), 1);
    assert_eq!(spec.overwrite_cells[0].new_value, None);
    assert_eq!(apply_transform_spec(&source, &spec).unwrap(), target);
}

#[test]
fn roundtrip_adjacent_edit_and_delete() {
    // A deleted row adjacent to an edited row: the edit must charge the
    // edited row, not its deleted neighbor.
    let source = table(&["n", "v"], &[&["a", "1"], &["b", "2"], &["c", "3"]]);
    let target = table(&["n", "v"], &[&["a", "1"], &["c", "9"]]);
    let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
    assert_eq!(spec.drop_rows, vec![1]);
    assert_eq!(
        spec.overwrite_cells,
        vec![OverwriteCell {
            row: 2,
            col: "v".to_string(),
            new_value: Some(CellValue::String("9".to_string())),
        }]
    );
    assert_eq!(apply_transform_spec(&source, &spec).unwrap(), target);
}

#[test]
fn tolerant_replay_against_shrunken_source() {
    // A spec computed against the full table replays without error
    // against a shorter variant; out-of-range operations are skipped.
    let full = table(&["n", "v"], &[&["a", "1"], &["b", "2"], &["c", "3"], &["d", "4"]]);
    let target = table(&["n", "v"], &[&["a", "1"], &["b", "9"], &["c", "3"]]);
    let spec = generate_transform_spec_delete_overwrite(&full, &target).unwrap();

    let shrunk = full.head(2);
    let replayed = apply_transform_spec(&shrunk, &spec).unwrap();
    assert_eq!(replayed.num_rows(), 2);
    assert_eq!(replayed.rows[1], vec!["b", "9"]);
}

#[test]
fn multiple_recovered_targets_from_one_source() {
    // One perturbed table, two equally valid recoveries: one spec each,
    // both independently satisfying the round-trip law.
    let perturbed = table(
        &["week", "cases"],
        &[&["1", "10"], &["2", "999999"], &["3", "12"]],
    );
    let recovered_fixed = table(
        &["week", "cases"],
        &[&["1", "10"], &["2", "11"], &["3", "12"]],
    );
    let recovered_dropped = table(&["week", "cases"], &[&["1", "10"], &["3", "12"]]);

    let specs: Vec<TableDeltaSpec> = [&recovered_fixed, &recovered_dropped]
        .iter()
        .map(|t| generate_transform_spec_delete_overwrite(&perturbed, t).unwrap())
        .collect();
    assert_eq!(specs.len(), 2);
    assert_ne!(specs[0], specs[1]);
    assert_eq!(
        apply_transform_spec(&perturbed, &specs[0]).unwrap(),
        recovered_fixed
    );
    assert_eq!(
        apply_transform_spec(&perturbed, &specs[1]).unwrap(),
        recovered_dropped
    );
}

#[test]
fn spec_survives_json_round_trip() {
    let source = table(&["n", "v"], &[&["a", "1"], &["b", "2"], &["c", "3"]]);
    let target = table(&["n", "v"], &[&["a", "5"], &["c", "3"]]);
    let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    let back: TableDeltaSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
    assert_eq!(apply_transform_spec(&source, &back).unwrap(), target);
}
