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

//! Token-budget sizing of table variants.
//!
//! Uses tiktoken-rs (cl100k_base) for tokenization, cached behind a
//! `Lazy` so the vocabulary loads once per process. Sizing functions are
//! generic over the counting function so tests can stay tokenizer-free.

use crate::error::Result;
use crate::sample::sample_table;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tarb_core::Table;
use tarb_tasks::TaskMetadata;
use tiktoken_rs::{cl100k_base, CoreBPE};

static TOKENIZER: Lazy<CoreBPE> =
    Lazy::new(|| cl100k_base().expect("Failed to load cl100k_base tokenizer"));

/// Count tokens in a text string using the cl100k_base tokenizer.
pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

/// One sized variant of the clean table.
#[derive(Debug, Clone)]
pub struct SizedVariant {
    /// Column count of the variant.
    pub num_cols: usize,
    /// Token bucket the sizing aimed for.
    pub token_bucket: usize,
    /// Token count actually reached.
    pub num_tokens: usize,
    /// The sized table.
    pub table: Table,
}

/// Find the row-prefix whose CSV rendering comes closest to
/// `token_bucket` tokens, never going below `min_rows`. Returns the
/// prefix and its token count; a table that never reaches the bucket is
/// returned whole.
pub fn fit_rows_to_token_budget<F>(
    table: &Table,
    token_bucket: usize,
    min_rows: usize,
    count: F,
) -> Result<(Table, usize)>
where
    F: Fn(&str) -> usize,
{
    let mut low = min_rows;
    let mut high = table.num_rows();
    let mut best: Option<(usize, usize, usize)> = None; // (rows, tokens, diff)

    while low <= high {
        let mid = (low + high) / 2;
        let tokens = count(&table.head(mid).to_csv()?);
        let diff = tokens.abs_diff(token_bucket);
        if mid >= min_rows && best.map_or(true, |(_, _, best_diff)| diff < best_diff) {
            best = Some((mid, tokens, diff));
        }
        if tokens < token_bucket {
            low = mid + 1;
        } else {
            if mid == 0 {
                break;
            }
            high = mid - 1;
        }
    }

    match best {
        Some((rows, tokens, _)) => Ok((table.head(rows), tokens)),
        None => {
            let tokens = count(&table.to_csv()?);
            Ok((table.clone(), tokens))
        }
    }
}

/// Build one column-sampled variant of the clean table per requested
/// column count, all rows retained. Column layouts are deterministic per
/// count.
pub fn sample_column_variants(
    table: &Table,
    metadata: &TaskMetadata,
    num_cols: &[usize],
) -> Result<BTreeMap<usize, Table>> {
    let minimum = metadata.min_column_count();
    if let Some(&smallest) = num_cols.iter().min() {
        if smallest < minimum {
            return Err(crate::error::BuildError::NotEnoughColumns {
                requested: smallest,
                minimum,
            });
        }
    }
    if let Some(&largest) = num_cols.iter().max() {
        if largest > table.num_cols() {
            return Err(crate::error::BuildError::TooManyColumns {
                requested: largest,
                available: table.num_cols(),
            });
        }
    }

    let mut variants = BTreeMap::new();
    for &count in num_cols {
        if variants.contains_key(&count) {
            continue;
        }
        let variant = sample_table(
            table,
            &metadata.minimum_columns,
            count,
            table.num_rows(),
            metadata.id_columns(),
            42,
        )?;
        variants.insert(count, variant);
    }
    Ok(variants)
}

/// Cross every column variant with every token bucket.
pub fn build_sized_variants<F>(
    table: &Table,
    metadata: &TaskMetadata,
    num_cols: &[usize],
    token_buckets: &[usize],
    min_rows: usize,
    count: F,
) -> Result<Vec<SizedVariant>>
where
    F: Fn(&str) -> usize,
{
    let variants = sample_column_variants(table, metadata, num_cols)?;
    let mut sized = Vec::with_capacity(variants.len() * token_buckets.len());
    for (&cols, variant) in &variants {
        for &bucket in token_buckets {
            let (fitted, num_tokens) = fit_rows_to_token_budget(variant, bucket, min_rows, &count)?;
            sized.push(SizedVariant {
                num_cols: cols,
                token_bucket: bucket,
                num_tokens,
                table: fitted,
            });
        }
    }
    Ok(sized)
}
