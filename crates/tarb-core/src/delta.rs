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

//! The reversible-edit descriptor relating two table snapshots, and the
//! applier that replays it.
//!
//! A [`TableDeltaSpec`] says: apply these cell overwrites to the source
//! table, then delete these rows (by original index), to obtain the target
//! table. Specs are generated against exactly one `(source, target)` pair
//! and are only valid for replay against that same source.

use crate::error::{CoreError, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// A scalar value carried by an overwrite.
///
/// Persisted specs may hold JSON numbers and booleans as well as strings;
/// all variants render to the cell string the applier writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    String(String),
}

impl CellValue {
    /// Render to the cell string stored in a table.
    pub fn render(&self) -> String {
        match self {
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

/// One cell overwrite within a [`TableDeltaSpec`].
///
/// `row` indexes into the *source* table's original, undeleted row
/// ordering. `None` as `new_value` writes the missing-value marker (an
/// empty cell).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverwriteCell {
    /// Source row index (pre-deletion ordering).
    pub row: usize,
    /// Column name; must exist in the table being modified.
    pub col: String,
    /// Replacement value, or `None` for missing.
    pub new_value: Option<CellValue>,
}

/// A set of row deletions plus an ordered sequence of cell overwrites.
///
/// The default spec is the identity transform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDeltaSpec {
    /// Rows to delete, indexed into the source table pre-deletion.
    #[serde(default)]
    pub drop_rows: Vec<usize>,
    /// Cell overwrites, applied before deletions.
    #[serde(default)]
    pub overwrite_cells: Vec<OverwriteCell>,
}

impl TableDeltaSpec {
    /// True if replaying this spec changes nothing.
    pub fn is_identity(&self) -> bool {
        self.drop_rows.is_empty() && self.overwrite_cells.is_empty()
    }
}

/// Replay a spec against a source table, producing the target table.
///
/// Overwrites are applied first, then deletions in descending index order
/// (ascending would shift the indices of later deletions). The result is
/// reindexed from 0. The input table is never modified.
///
/// Row indices out of range — in overwrites or in `drop_rows` — are
/// silently skipped: specs stored independently of their table tolerate
/// minor row-count drift. An unknown column name is a hard error
/// regardless of the row index; that spec belongs to a different table.
pub fn apply_transform_spec(table: &Table, spec: &TableDeltaSpec) -> Result<Table> {
    let mut out = table.clone();
    for overwrite in &spec.overwrite_cells {
        let idx = out
            .column_index(&overwrite.col)
            .ok_or_else(|| out.unknown_column(&overwrite.col))?;
        if let Some(row) = out.rows.get_mut(overwrite.row) {
            row[idx] = overwrite
                .new_value
                .as_ref()
                .map(CellValue::render)
                .unwrap_or_default();
        }
    }
    let mut drops = spec.drop_rows.clone();
    drops.sort_unstable_by(|a, b| b.cmp(a));
    drops.dedup();
    for row in drops {
        if row < out.rows.len() {
            out.rows.remove(row);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            vec!["name".to_string(), "count".to_string()],
            vec![
                vec!["a".to_string(), "1".to_string()],
                vec!["b".to_string(), "2".to_string()],
                vec!["c".to_string(), "3".to_string()],
                vec!["d".to_string(), "4".to_string()],
            ],
        )
        .unwrap()
    }

    fn overwrite(row: usize, col: &str, value: Option<CellValue>) -> OverwriteCell {
        OverwriteCell {
            row,
            col: col.to_string(),
            new_value: value,
        }
    }

    // ==================== Applier tests ====================

    #[test]
    fn test_identity_spec_is_noop() {
        let t = table();
        let spec = TableDeltaSpec::default();
        assert!(spec.is_identity());
        assert_eq!(apply_transform_spec(&t, &spec).unwrap(), t);
    }

    #[test]
    fn test_overwrite_then_delete() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![1],
            overwrite_cells: vec![overwrite(2, "count", Some(CellValue::String("9".into())))],
        };
        let out = apply_transform_spec(&t, &spec).unwrap();
        assert_eq!(out.rows.len(), 3);
        assert_eq!(out.rows[1], vec!["c", "9"]);
        assert_eq!(out.rows[2], vec!["d", "4"]);
    }

    #[test]
    fn test_null_overwrite_writes_missing_marker() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![],
            overwrite_cells: vec![overwrite(0, "count", None)],
        };
        let out = apply_transform_spec(&t, &spec).unwrap();
        assert_eq!(out.rows[0][1], "");
    }

    #[test]
    fn test_delete_order_independence() {
        let t = table();
        let forward = TableDeltaSpec {
            drop_rows: vec![0, 2, 3],
            overwrite_cells: vec![],
        };
        let shuffled = TableDeltaSpec {
            drop_rows: vec![3, 0, 2],
            overwrite_cells: vec![],
        };
        let a = apply_transform_spec(&t, &forward).unwrap();
        let b = apply_transform_spec(&t, &shuffled).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows, vec![vec!["b", "2"]]);
    }

    #[test]
    fn test_duplicate_drop_indices_collapse() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![1, 1, 1],
            overwrite_cells: vec![],
        };
        let out = apply_transform_spec(&t, &spec).unwrap();
        assert_eq!(out.rows.len(), 3);
    }

    #[test]
    fn test_source_table_not_modified() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![0],
            overwrite_cells: vec![overwrite(1, "name", Some("z".into()))],
        };
        let _ = apply_transform_spec(&t, &spec).unwrap();
        assert_eq!(t, table());
    }

    // ==================== Tolerance asymmetry tests ====================
    //
    // Out-of-range rows are skipped; unknown columns fail hard, even when
    // the row index is also out of range.

    #[test]
    fn test_out_of_range_overwrite_row_is_skipped() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![],
            overwrite_cells: vec![overwrite(100, "count", Some("9".into()))],
        };
        assert_eq!(apply_transform_spec(&t, &spec).unwrap(), t);
    }

    #[test]
    fn test_out_of_range_drop_row_is_skipped() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![100, 1],
            overwrite_cells: vec![],
        };
        let out = apply_transform_spec(&t, &spec).unwrap();
        assert_eq!(out.rows.len(), 3);
    }

    #[test]
    fn test_unknown_column_fails_even_with_out_of_range_row() {
        let t = table();
        let spec = TableDeltaSpec {
            drop_rows: vec![],
            overwrite_cells: vec![overwrite(100, "nope", Some("9".into()))],
        };
        assert!(matches!(
            apply_transform_spec(&t, &spec).unwrap_err(),
            CoreError::UnknownColumn { col, .. } if col == "nope"
        ));
    }

    // ==================== CellValue tests ====================

    #[test]
    fn test_cell_value_render() {
        assert_eq!(CellValue::Bool(true).render(), "true");
        assert_eq!(CellValue::Int(-7).render(), "-7");
        assert_eq!(CellValue::Float(2.5).render(), "2.5");
        assert_eq!(CellValue::String("x".to_string()).render(), "x");
    }

    #[test]
    fn test_cell_value_untagged_deserialization() {
        let values: Vec<Option<CellValue>> =
            serde_json::from_str(r#"[true, 3, 2.5, "x", null]"#).unwrap();
        assert_eq!(values[0], Some(CellValue::Bool(true)));
        assert_eq!(values[1], Some(CellValue::Int(3)));
        assert_eq!(values[2], Some(CellValue::Float(2.5)));
        assert_eq!(values[3], Some(CellValue::String("x".to_string())));
        assert_eq!(values[4], None);
    }

    #[test]
    fn test_spec_serde_wire_shape() {
        let spec = TableDeltaSpec {
            drop_rows: vec![1],
            overwrite_cells: vec![OverwriteCell {
                row: 2,
                col: "count".to_string(),
                new_value: Some(CellValue::String("9".to_string())),
            }],
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["drop_rows"][0], 1);
        assert_eq!(json["overwrite_cells"][0]["row"], 2);
        assert_eq!(json["overwrite_cells"][0]["new_value"], "9");
        let back: TableDeltaSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_spec_defaults_to_identity() {
        let spec: TableDeltaSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.is_identity());
    }
}
