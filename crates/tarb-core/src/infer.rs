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

//! Infers the delta spec relating two table snapshots.
//!
//! Both tables are rendered through the canonical CSV flattening and the
//! body lines are aligned with the LCS opcode engine, so the
//! reconciliation works on display-equivalent text. Diffing lines instead
//! of joining rows by value keeps the transform robust to duplicate rows
//! and needs no primary key.
//!
//! The target must be reachable from the source by deleting rows and/or
//! overwriting cells only — never by inserting or reordering rows. A
//! target that adds rows is rejected with [`CoreError::RowInsertion`].

use crate::delta::{CellValue, OverwriteCell, TableDeltaSpec};
use crate::diff::{opcodes, OpTag};
use crate::error::{CoreError, Result};
use crate::table::{is_missing_cell, Table};

/// Compute the minimal delete-and-overwrite spec transforming `source`
/// into `target`.
///
/// `apply_transform_spec(source, &spec)` reproduces `target` cell-for-cell
/// up to missing-value spelling. `infer(S, S)` is the identity spec.
///
/// # Errors
///
/// - [`CoreError::HeaderMismatch`] when the tables have different header
///   sequences; the alignment is meaningless across schemas.
/// - [`CoreError::RowInsertion`] when the target contains rows the source
///   lacks; the delta language cannot express insertions.
/// - [`CoreError::EmbeddedNewline`] when a cell contains a line break,
///   which the line-oriented flattening cannot align.
pub fn generate_transform_spec_delete_overwrite(
    source: &Table,
    target: &Table,
) -> Result<TableDeltaSpec> {
    if source.headers != target.headers {
        return Err(CoreError::HeaderMismatch {
            source_headers: source.headers.clone(),
            target_headers: target.headers.clone(),
        });
    }
    reject_embedded_newlines(source)?;
    reject_embedded_newlines(target)?;

    let source_text = source.to_csv()?;
    let target_text = target.to_csv()?;
    let source_lines: Vec<&str> = source_text.lines().skip(1).collect();
    let target_lines: Vec<&str> = target_text.lines().skip(1).collect();

    let mut drop_rows = Vec::new();
    let mut overwrite_cells = Vec::new();

    for op in opcodes(&source_lines, &target_lines) {
        match op.tag {
            OpTag::Equal => {}
            OpTag::Delete => drop_rows.extend(op.a_start..op.a_end),
            OpTag::Insert => {
                return Err(CoreError::RowInsertion {
                    at: op.a_start,
                    count: op.b_end - op.b_start,
                })
            }
            OpTag::Replace => {
                let source_len = op.a_end - op.a_start;
                let target_len = op.b_end - op.b_start;
                if target_len > source_len {
                    return Err(CoreError::RowInsertion {
                        at: op.a_end,
                        count: target_len - source_len,
                    });
                }
                let old_rows = (op.a_start..op.a_end)
                    .map(|i| parse_body_line(source_lines[i], source.num_cols()))
                    .collect::<Result<Vec<_>>>()?;
                let new_rows = (op.b_start..op.b_end)
                    .map(|j| parse_body_line(target_lines[j], source.num_cols()))
                    .collect::<Result<Vec<_>>>()?;
                // Pair every target row with a source row, minimizing the
                // number of overwrites; unpaired source rows are deletes.
                // Pairing the block's prefix blindly would charge a
                // neighbor's cells to the wrong row whenever a deleted row
                // sits next to an edited one.
                for (offset, assignment) in align_replace_block(&old_rows, &new_rows)
                    .into_iter()
                    .enumerate()
                {
                    let row = op.a_start + offset;
                    let Some(target_offset) = assignment else {
                        drop_rows.push(row);
                        continue;
                    };
                    let old_cells = &old_rows[offset];
                    let new_cells = &new_rows[target_offset];
                    for (col_idx, col) in source.headers.iter().enumerate() {
                        let old = &old_cells[col_idx];
                        let new = &new_cells[col_idx];
                        if is_missing_cell(old) && is_missing_cell(new) {
                            continue;
                        }
                        if old != new {
                            overwrite_cells.push(OverwriteCell {
                                row,
                                col: col.clone(),
                                new_value: if is_missing_cell(new) {
                                    None
                                } else {
                                    Some(CellValue::String(new.clone()))
                                },
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(TableDeltaSpec {
        drop_rows,
        overwrite_cells,
    })
}

/// Order-preserving assignment of target rows to source rows within one
/// replace block, minimizing total differing cells.
///
/// Returns, per source row, the target-row offset it pairs with (`None`
/// means the source row is deleted). Every target row is assigned;
/// callers guarantee there are at least as many source rows as target
/// rows. Ties prefer pairing over deleting, so equal-length blocks pair
/// positionally.
fn align_replace_block(old_rows: &[Vec<String>], new_rows: &[Vec<String>]) -> Vec<Option<usize>> {
    let m = old_rows.len();
    let n = new_rows.len();
    let cost = |i: usize, j: usize| -> usize {
        old_rows[i]
            .iter()
            .zip(&new_rows[j])
            .filter(|(old, new)| {
                !(is_missing_cell(old) && is_missing_cell(new)) && old != new
            })
            .count()
    };

    // dp[i][j]: cheapest alignment of the first i source rows against the
    // first j target rows; a source row is either paired or deleted.
    const UNREACHABLE: usize = usize::MAX / 2;
    let mut dp = vec![vec![UNREACHABLE; n + 1]; m + 1];
    dp[0][0] = 0;
    for i in 1..=m {
        dp[i][0] = 0;
        for j in 1..=n.min(i) {
            let paired = dp[i - 1][j - 1].saturating_add(cost(i - 1, j - 1));
            let deleted = dp[i - 1][j];
            dp[i][j] = paired.min(deleted);
        }
    }

    let mut assignment = vec![None; m];
    let (mut i, mut j) = (m, n);
    while i > 0 {
        if j > 0 && dp[i][j] == dp[i - 1][j - 1].saturating_add(cost(i - 1, j - 1)) {
            assignment[i - 1] = Some(j - 1);
            j -= 1;
        }
        i -= 1;
    }
    assignment
}

fn reject_embedded_newlines(table: &Table) -> Result<()> {
    for (row, cells) in table.rows.iter().enumerate() {
        for (col_idx, cell) in cells.iter().enumerate() {
            if cell.contains('\n') || cell.contains('\r') {
                return Err(CoreError::EmbeddedNewline {
                    row,
                    col: table.headers[col_idx].clone(),
                });
            }
        }
    }
    Ok(())
}

/// Parse one rendered body line back into its cells.
///
/// An all-empty single-column row renders as an empty line, which the CSV
/// reader yields no record for; that still means `width` empty cells.
fn parse_body_line(line: &str, width: usize) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());
    let cells: Vec<String> = match reader.records().next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => vec![String::new(); width],
    };
    if cells.len() != width {
        return Err(CoreError::WidthMismatch {
            expected: width,
            actual: cells.len(),
            row: 0,
        });
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::apply_transform_spec;

    fn table(rows: &[&[&str]]) -> Table {
        Table::new(
            vec!["name".to_string(), "count".to_string()],
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    // ==================== Inference tests ====================

    #[test]
    fn test_identity_yields_empty_spec() {
        let t = table(&[&["a", "1"], &["b", "2"]]);
        let spec = generate_transform_spec_delete_overwrite(&t, &t).unwrap();
        assert!(spec.is_identity());
    }

    #[test]
    fn test_pure_deletion() {
        let source = table(&[&["a", "1"], &["b", "2"], &["c", "3"]]);
        let target = table(&[&["a", "1"], &["c", "3"]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert_eq!(spec.drop_rows, vec![1]);
        assert!(spec.overwrite_cells.is_empty());
    }

    #[test]
    fn test_pure_overwrite() {
        let source = table(&[&["a", "1"], &["b", "2"]]);
        let target = table(&[&["a", "1"], &["b", "9"]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert!(spec.drop_rows.is_empty());
        assert_eq!(spec.overwrite_cells.len(), 1);
        assert_eq!(spec.overwrite_cells[0].row, 1);
        assert_eq!(spec.overwrite_cells[0].col, "count");
        assert_eq!(
            spec.overwrite_cells[0].new_value,
            Some(CellValue::String("9".to_string()))
        );
    }

    #[test]
    fn test_delete_and_overwrite_scenario() {
        // Row "b" deleted, row "c"'s second cell changed 3 -> 9.
        let source = table(&[&["a", "1"], &["b", "2"], &["c", "3"]]);
        let target = table(&[&["a", "1"], &["c", "9"]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert_eq!(spec.drop_rows, vec![1]);
        assert_eq!(spec.overwrite_cells.len(), 1);
        assert_eq!(spec.overwrite_cells[0].row, 2);
        assert_eq!(spec.overwrite_cells[0].col, "count");
        assert_eq!(
            spec.overwrite_cells[0].new_value,
            Some(CellValue::String("9".to_string()))
        );
        let replayed = apply_transform_spec(&source, &spec).unwrap();
        assert_eq!(replayed, target);
    }

    #[test]
    fn test_overwrite_to_missing_emits_null() {
        let source = table(&[&["a", "1"]]);
        let target = table(&[&["a", ""]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert_eq!(spec.overwrite_cells.len(), 1);
        assert_eq!(spec.overwrite_cells[0].new_value, None);
    }

    #[test]
    fn test_both_missing_is_not_a_change() {
        // Same cell, different missing spellings: no overwrite.
        let source = table(&[&["a", ""], &["b", "2"]]);
        let target = table(&[&["a", "NaN"], &["b", "2"]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert!(spec.overwrite_cells.is_empty());
        assert!(spec.drop_rows.is_empty());
    }

    #[test]
    fn test_replace_block_with_extra_source_rows() {
        // Last two source rows align against one changed target row: the
        // cheaper pairing becomes an overwrite, the other row a delete.
        let source = table(&[&["a", "1"], &["b", "2"], &["c", "3"]]);
        let target = table(&[&["a", "1"], &["b", "9"]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        let replayed = apply_transform_spec(&source, &spec).unwrap();
        assert_eq!(replayed, target);
        assert_eq!(spec.drop_rows, vec![2]);
        assert_eq!(spec.overwrite_cells.len(), 1);
    }

    #[test]
    fn test_multiple_columns_changed_in_one_row() {
        let source = table(&[&["a", "1"]]);
        let target = table(&[&["z", "9"]]);
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert_eq!(spec.overwrite_cells.len(), 2);
        let cols: Vec<&str> = spec
            .overwrite_cells
            .iter()
            .map(|o| o.col.as_str())
            .collect();
        assert_eq!(cols, vec!["name", "count"]);
    }

    #[test]
    fn test_quoted_cells_survive_inference() {
        let source = Table::new(
            vec!["text".to_string(), "n".to_string()],
            vec![vec!["hello, world".to_string(), "1".to_string()]],
        )
        .unwrap();
        let target = Table::new(
            vec!["text".to_string(), "n".to_string()],
            vec![vec!["hello, world".to_string(), "2".to_string()]],
        )
        .unwrap();
        let spec = generate_transform_spec_delete_overwrite(&source, &target).unwrap();
        assert_eq!(spec.overwrite_cells.len(), 1);
        assert_eq!(spec.overwrite_cells[0].col, "n");
        let replayed = apply_transform_spec(&source, &spec).unwrap();
        assert_eq!(replayed, target);
    }

    // ==================== Rejection tests ====================

    #[test]
    fn test_header_mismatch_rejected() {
        let source = table(&[&["a", "1"]]);
        let target = Table::new(
            vec!["other".to_string(), "count".to_string()],
            vec![vec!["a".to_string(), "1".to_string()]],
        )
        .unwrap();
        assert!(matches!(
            generate_transform_spec_delete_overwrite(&source, &target).unwrap_err(),
            CoreError::HeaderMismatch { .. }
        ));
    }

    #[test]
    fn test_row_insertion_rejected() {
        let source = table(&[&["a", "1"]]);
        let target = table(&[&["a", "1"], &["b", "2"]]);
        assert!(matches!(
            generate_transform_spec_delete_overwrite(&source, &target).unwrap_err(),
            CoreError::RowInsertion { .. }
        ));
    }

    #[test]
    fn test_embedded_newline_rejected() {
        let source = Table::new(
            vec!["text".to_string()],
            vec![vec!["line1\nline2".to_string()]],
        )
        .unwrap();
        assert!(matches!(
            generate_transform_spec_delete_overwrite(&source, &source).unwrap_err(),
            CoreError::EmbeddedNewline { row: 0, .. }
        ));
    }

    // ==================== Line parsing tests ====================

    #[test]
    fn test_parse_body_line_empty_single_column() {
        assert_eq!(parse_body_line("", 1).unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_parse_body_line_empty_fields() {
        assert_eq!(parse_body_line(",,", 3).unwrap(), vec!["", "", ""]);
    }

    #[test]
    fn test_parse_body_line_quoted() {
        assert_eq!(
            parse_body_line("\"a,b\",c", 2).unwrap(),
            vec!["a,b", "c"]
        );
    }
}
