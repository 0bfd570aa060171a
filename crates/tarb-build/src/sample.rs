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

//! Column and row sampling for sized table variants.
//!
//! Column layout of a sampled variant: id columns pinned to the left
//! edge, the kept columns contiguous, and the randomly chosen extras
//! split between their left and right. Row sampling is a plain prefix.

use crate::error::{BuildError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tarb_core::Table;

/// Choose the column layout for a sampled variant.
///
/// `keep_columns` always appear (contiguously, in their given order);
/// `id_columns` are pinned to the left edge; the remaining budget is
/// filled with randomly selected other columns, split randomly to the
/// left and right of the kept block.
pub fn sample_columns(
    table: &Table,
    keep_columns: &[String],
    total_columns: usize,
    id_columns: &[String],
    rng: &mut StdRng,
) -> Result<Vec<String>> {
    for col in keep_columns.iter().chain(id_columns) {
        if table.column_index(col).is_none() {
            return Err(tarb_core::CoreError::UnknownColumn {
                col: col.clone(),
                available: table.headers.join(", "),
            }
            .into());
        }
    }

    let pinned: HashSet<&str> = keep_columns
        .iter()
        .chain(id_columns)
        .map(String::as_str)
        .collect();
    let mut remaining: Vec<&String> = table
        .headers
        .iter()
        .filter(|h| !pinned.contains(h.as_str()))
        .collect();
    let extra_budget = total_columns - keep_columns.len() - id_columns.len();

    remaining.shuffle(rng);
    let mut extras: Vec<String> = remaining
        .into_iter()
        .take(extra_budget)
        .cloned()
        .collect();
    let num_left = rng.gen_range(0..=extras.len());
    let right: Vec<String> = extras.split_off(num_left);

    let mut selected = Vec::with_capacity(total_columns);
    selected.extend(id_columns.iter().cloned());
    selected.extend(extras);
    selected.extend(keep_columns.iter().cloned());
    selected.extend(right);
    Ok(selected)
}

/// Sample a sized variant: `total_columns` columns laid out by
/// [`sample_columns`], then the first `num_rows` rows.
pub fn sample_table(
    table: &Table,
    keep_columns: &[String],
    total_columns: usize,
    num_rows: usize,
    id_columns: &[String],
    seed: u64,
) -> Result<Table> {
    if total_columns < keep_columns.len() + id_columns.len() {
        return Err(BuildError::NotEnoughColumns {
            requested: total_columns,
            minimum: keep_columns.len() + id_columns.len(),
        });
    }
    if total_columns > table.num_cols() {
        return Err(BuildError::TooManyColumns {
            requested: total_columns,
            available: table.num_cols(),
        });
    }
    if num_rows > table.num_rows() {
        return Err(BuildError::NotEnoughRows {
            requested: num_rows,
            available: table.num_rows(),
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let columns = sample_columns(table, keep_columns, total_columns, id_columns, &mut rng)?;
    Ok(table.select(&columns)?.head(num_rows))
}
