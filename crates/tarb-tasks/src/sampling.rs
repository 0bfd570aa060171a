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

//! Seeded helpers perturbation functions build on: row selection,
//! outlier fabrication, and value reformatting.
//!
//! Everything here is deterministic per seed. Helpers are pure functions
//! over row counts and cell values; callers apply the results to their
//! own table copies.

use crate::error::{Result, TaskError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tarb_core::{is_missing_cell, Table};

/// Default seed for perturbation sampling.
pub const DEFAULT_SEED: u64 = 42;

/// Select `max(1, floor(num_rows * percentage))` distinct row indices.
pub fn random_indices(num_rows: usize, percentage: f64, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let amount = sample_size(num_rows, percentage).min(num_rows);
    let mut picked = rand::seq::index::sample(&mut rng, num_rows, amount).into_vec();
    picked.sort_unstable();
    picked
}

/// Row indices where every one of `columns` holds a non-missing value.
pub fn valid_indices(table: &Table, columns: &[String]) -> Result<Vec<usize>> {
    let mut col_indices = Vec::with_capacity(columns.len());
    for col in columns {
        let idx = table
            .column_index(col)
            .ok_or_else(|| tarb_core::CoreError::UnknownColumn {
                col: col.clone(),
                available: table.headers.join(", "),
            })?;
        col_indices.push(idx);
    }
    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| col_indices.iter().all(|&i| !is_missing_cell(&row[i])))
        .map(|(i, _)| i)
        .collect())
}

/// Draw several non-overlapping groups of row indices, one group per
/// percentage. Group sizes are computed against the pool as it shrinks.
///
/// `include` restricts the pool to the given indices; `exclude` removes
/// indices from it. Errors when a group cannot be filled.
pub fn non_overlapping_random_indices(
    num_rows: usize,
    percentages: &[f64],
    include: Option<&BTreeSet<usize>>,
    exclude: Option<&BTreeSet<usize>>,
    seed: u64,
) -> Result<Vec<Vec<usize>>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool: BTreeSet<usize> = match include {
        Some(set) => set.iter().copied().filter(|&i| i < num_rows).collect(),
        None => (0..num_rows).collect(),
    };
    if let Some(excluded) = exclude {
        pool.retain(|i| !excluded.contains(i));
    }

    let mut groups = Vec::with_capacity(percentages.len());
    for &percentage in percentages {
        let amount = sample_size(pool.len(), percentage);
        if amount > pool.len() {
            return Err(TaskError::InsufficientRows {
                needed: amount,
                available: pool.len(),
            });
        }
        let candidates: Vec<usize> = pool.iter().copied().collect();
        let mut picked: Vec<usize> = rand::seq::index::sample(&mut rng, candidates.len(), amount)
            .into_iter()
            .map(|i| candidates[i])
            .collect();
        picked.sort_unstable();
        for &i in &picked {
            pool.remove(&i);
        }
        groups.push(picked);
    }
    Ok(groups)
}

fn sample_size(pool: usize, percentage: f64) -> usize {
    ((pool as f64 * percentage) as usize).max(1)
}

/// Scale a value up past `threshold`, keeping the multiplier random but
/// bounded. Returns the scaled value and the multiplier used, or `None`
/// when the value already sits at or above the threshold.
pub fn scale_above_threshold(value: f64, threshold: f64, rng: &mut StdRng) -> Option<(i64, f64)> {
    if value >= threshold || value <= 0.0 {
        return None;
    }
    let min_multiplier = threshold / value;
    let multiplier = min_multiplier + rng.gen::<f64>();
    Some(((value * multiplier) as i64, multiplier))
}

/// Scale a value down below `threshold`. Returns the scaled value and the
/// divisor used, or `None` when the value already sits at or below it.
pub fn scale_below_threshold(value: f64, threshold: f64, rng: &mut StdRng) -> Option<(i64, f64)> {
    if value <= threshold || threshold <= 0.0 {
        return None;
    }
    let min_divisor = value / threshold;
    let divisor = min_divisor + rng.gen::<f64>();
    Some(((value / divisor) as i64, divisor))
}

/// Parse a cell as a number, reporting the offending cell on failure.
pub fn numeric_cell(table: &Table, row: usize, col: &str) -> Result<f64> {
    let cell = table
        .cell(row, col)
        .ok_or_else(|| tarb_core::CoreError::UnknownColumn {
            col: col.to_string(),
            available: table.headers.join(", "),
        })?;
    cell.trim()
        .parse::<f64>()
        .map_err(|_| TaskError::NonNumericCell {
            row,
            col: col.to_string(),
            value: cell.to_string(),
        })
}

/// Render an integer with thousands separators ("1,234,567").
pub fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Spell out a non-negative integer in English words.
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    const ONES: [&str; 10] = [
        "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    const TEENS: [&str; 10] = [
        "ten",
        "eleven",
        "twelve",
        "thirteen",
        "fourteen",
        "fifteen",
        "sixteen",
        "seventeen",
        "eighteen",
        "nineteen",
    ];
    const TENS: [&str; 10] = [
        "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    ];

    fn two(n: u64) -> String {
        match n {
            0 => String::new(),
            1..=9 => ONES[n as usize].to_string(),
            10..=19 => TEENS[(n - 10) as usize].to_string(),
            _ => {
                let rest = n % 10;
                if rest == 0 {
                    TENS[(n / 10) as usize].to_string()
                } else {
                    format!("{}-{}", TENS[(n / 10) as usize], ONES[rest as usize])
                }
            }
        }
    }

    fn three(n: u64) -> String {
        let hundreds = n / 100;
        let rest = n % 100;
        match (hundreds, rest) {
            (0, r) => two(r),
            (h, 0) => format!("{} hundred", ONES[h as usize]),
            (h, r) => format!("{} hundred {}", ONES[h as usize], two(r)),
        }
    }

    let billions = n / 1_000_000_000;
    let millions = (n / 1_000_000) % 1_000;
    let thousands = (n / 1_000) % 1_000;
    let remainder = n % 1_000;

    let mut parts = Vec::new();
    if billions > 0 {
        parts.push(format!("{} billion", three(billions)));
    }
    if millions > 0 {
        parts.push(format!("{} million", three(millions)));
    }
    if thousands > 0 {
        parts.push(format!("{} thousand", three(thousands)));
    }
    if remainder > 0 {
        parts.push(three(remainder));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            vec!["week".to_string(), "cases".to_string()],
            vec![
                vec!["1".to_string(), "10".to_string()],
                vec!["2".to_string(), "".to_string()],
                vec!["3".to_string(), "12".to_string()],
                vec!["4".to_string(), "13".to_string()],
                vec!["5".to_string(), "NaN".to_string()],
            ],
        )
        .unwrap()
    }

    // ==================== Index selection tests ====================

    #[test]
    fn test_random_indices_deterministic_per_seed() {
        let a = random_indices(100, 0.1, 7);
        let b = random_indices(100, 0.1, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
        assert!(a.iter().all(|&i| i < 100));
    }

    #[test]
    fn test_random_indices_at_least_one() {
        assert_eq!(random_indices(50, 0.001, 1).len(), 1);
    }

    #[test]
    fn test_valid_indices_skips_missing() {
        let t = table();
        let valid = valid_indices(&t, &["cases".to_string()]).unwrap();
        assert_eq!(valid, vec![0, 2, 3]);
    }

    #[test]
    fn test_valid_indices_unknown_column() {
        let t = table();
        assert!(valid_indices(&t, &["nope".to_string()]).is_err());
    }

    #[test]
    fn test_non_overlapping_groups_disjoint() {
        let groups =
            non_overlapping_random_indices(100, &[0.2, 0.2, 0.2], None, None, 42).unwrap();
        assert_eq!(groups.len(), 3);
        let mut seen = BTreeSet::new();
        for group in &groups {
            for &i in group {
                assert!(seen.insert(i), "index {i} appears in two groups");
            }
        }
    }

    #[test]
    fn test_non_overlapping_respects_exclude() {
        let exclude: BTreeSet<usize> = (0..95).collect();
        let groups =
            non_overlapping_random_indices(100, &[0.5], None, Some(&exclude), 42).unwrap();
        assert!(groups[0].iter().all(|&i| i >= 95));
    }

    #[test]
    fn test_non_overlapping_errors_when_pool_exhausted() {
        let err =
            non_overlapping_random_indices(2, &[1.0, 1.0], None, None, 42).unwrap_err();
        assert!(matches!(err, TaskError::InsufficientRows { .. }));
    }

    // ==================== Scaling tests ====================

    #[test]
    fn test_scale_above_threshold() {
        let mut rng = StdRng::seed_from_u64(0);
        let (scaled, multiplier) = scale_above_threshold(120.0, 30_000.0, &mut rng).unwrap();
        assert!(scaled >= 30_000);
        assert!(multiplier >= 250.0);
    }

    #[test]
    fn test_scale_above_threshold_noop_when_already_large() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(scale_above_threshold(50_000.0, 30_000.0, &mut rng).is_none());
    }

    #[test]
    fn test_scale_below_threshold() {
        let mut rng = StdRng::seed_from_u64(0);
        let (scaled, _) = scale_below_threshold(5_000.0, 30.0, &mut rng).unwrap();
        assert!(scaled <= 30);
        assert!(scaled >= 0);
    }

    #[test]
    fn test_numeric_cell() {
        let t = table();
        assert_eq!(numeric_cell(&t, 0, "cases").unwrap(), 10.0);
        assert!(matches!(
            numeric_cell(&t, 1, "cases").unwrap_err(),
            TaskError::NonNumericCell { row: 1, .. }
        ));
    }

    // ==================== Formatting tests ====================

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_678), "-45,678");
    }

    #[test]
    fn test_number_to_words() {
        assert_eq!(number_to_words(0), "zero");
        assert_eq!(number_to_words(7), "seven");
        assert_eq!(number_to_words(15), "fifteen");
        assert_eq!(number_to_words(42), "forty-two");
        assert_eq!(number_to_words(300), "three hundred");
        assert_eq!(number_to_words(512), "five hundred twelve");
        assert_eq!(number_to_words(1_001), "one thousand one");
        assert_eq!(
            number_to_words(2_000_030),
            "two million thirty"
        );
        assert_eq!(
            number_to_words(1_234_567),
            "one million two hundred thirty-four thousand five hundred sixty-seven"
        );
    }
}
