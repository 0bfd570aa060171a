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

//! Built-in example task: weekly clinic visits.
//!
//! A surveillance-style table of weekly visit counts split by age band,
//! with the commonsense relationship `Visits 25-64 = Visits 25-49 +
//! Visits 50-64`. The query asks for the median of `Visits 25-64`. Every
//! artifact family has a perturbation here, and the
//! inconsistent-commonsense-logic one is deliberately ambiguous: a broken
//! row can be repaired from the band columns or ignored, so it carries
//! two recovered tables.

use crate::artifact::{ArtifactScope, ArtifactType};
use crate::error::{Result, TaskError};
use crate::perturbation::PerturbationArtifact;
use crate::registry::TaskRegistry;
use crate::sampling::{
    self, group_thousands, non_overlapping_random_indices, numeric_cell, valid_indices,
    DEFAULT_SEED,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tarb_core::{is_missing_cell, Table};

/// Task id of the built-in example task.
pub const WEEKLY_CLINIC_VISITS: &str = "weekly-clinic-visits";

const COL_WEEK: &str = "Week";
const COL_REGION: &str = "Region";
const COL_VISITS_0_4: &str = "Visits 0-4";
const COL_VISITS_5_24: &str = "Visits 5-24";
const COL_VISITS_25_49: &str = "Visits 25-49";
const COL_VISITS_50_64: &str = "Visits 50-64";
const COL_VISITS_25_64: &str = "Visits 25-64";
const COL_TOTAL: &str = "Total";

const PERTURB_FRACTION: f64 = 0.05;

/// Build a registry with every built-in task registered.
pub fn builtin_registry() -> TaskRegistry {
    let mut registry = TaskRegistry::new();
    registry.register_answer(WEEKLY_CLINIC_VISITS, Box::new(median_visits_answer));
    registry.register_perturbation(
        WEEKLY_CLINIC_VISITS,
        ArtifactType::Missingness,
        Box::new(missing_visits),
    );
    registry.register_perturbation(
        WEEKLY_CLINIC_VISITS,
        ArtifactType::BadValues,
        Box::new(bad_visit_values),
    );
    registry.register_perturbation(
        WEEKLY_CLINIC_VISITS,
        ArtifactType::InconsistentFormatting,
        Box::new(reformatted_visits),
    );
    registry.register_perturbation(
        WEEKLY_CLINIC_VISITS,
        ArtifactType::InconsistentCommonsenseLogic,
        Box::new(broken_band_sum),
    );
    registry.register_perturbation(
        WEEKLY_CLINIC_VISITS,
        ArtifactType::Outliers,
        Box::new(outlier_visits),
    );
    registry
}

/// Deterministic clean table for the built-in task.
///
/// Week counts follow simple arithmetic progressions with
/// `Visits 25-64 = Visits 25-49 + Visits 50-64` holding on every row.
pub fn demo_table(num_rows: usize) -> Table {
    let headers = vec![
        COL_WEEK.to_string(),
        COL_REGION.to_string(),
        COL_VISITS_0_4.to_string(),
        COL_VISITS_5_24.to_string(),
        COL_VISITS_25_49.to_string(),
        COL_VISITS_50_64.to_string(),
        COL_VISITS_25_64.to_string(),
        COL_TOTAL.to_string(),
    ];
    let regions = ["north", "south", "east", "west"];
    let rows = (0..num_rows)
        .map(|i| {
            let young = 10 + (i * 3) % 50;
            let school = 30 + (i * 11) % 120;
            let mid = 40 + (i * 7) % 150;
            let older = 25 + (i * 5) % 90;
            let adult = mid + older;
            let total = young + school + adult;
            vec![
                (i + 1).to_string(),
                regions[i % regions.len()].to_string(),
                young.to_string(),
                school.to_string(),
                mid.to_string(),
                older.to_string(),
                adult.to_string(),
                total.to_string(),
            ]
        })
        .collect();
    Table::new(headers, rows).expect("demo table is well-formed")
}

/// Median of `Visits 25-64`, rounded to one decimal place.
fn median_visits_answer(table: &Table) -> Result<serde_json::Value> {
    let mut values = Vec::new();
    for (row, cell) in table.column(COL_VISITS_25_64)?.into_iter().enumerate() {
        if is_missing_cell(cell) {
            continue;
        }
        let value = cell
            .trim()
            .parse::<f64>()
            .map_err(|_| TaskError::NonNumericCell {
                row,
                col: COL_VISITS_25_64.to_string(),
                value: cell.to_string(),
            })?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(TaskError::EmptyColumn {
            col: COL_VISITS_25_64.to_string(),
        });
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    };
    Ok(serde_json::json!((median * 10.0).round() / 10.0))
}

fn missing_visits(table: &Table) -> Result<PerturbationArtifact> {
    let clean = table.clone();
    let mut perturbed = table.clone();
    let groups = non_overlapping_random_indices(
        table.num_rows(),
        &[PERTURB_FRACTION],
        None,
        None,
        DEFAULT_SEED,
    )?;
    for &row in &groups[0] {
        perturbed.set_cell(row, COL_VISITS_25_64, "")?;
    }
    PerturbationArtifact::from_recovered(
        perturbed,
        vec![clean],
        ArtifactType::Missingness,
        ArtifactScope::ConnectedMultiColumn,
        vec![
            COL_VISITS_25_64.to_string(),
            COL_VISITS_25_49.to_string(),
            COL_VISITS_50_64.to_string(),
        ],
        Some(format!(
            "Blanked {col}. Recoverable as {col} = {a} + {b}.",
            col = COL_VISITS_25_64,
            a = COL_VISITS_25_49,
            b = COL_VISITS_50_64
        )),
    )
}

fn bad_visit_values(table: &Table) -> Result<PerturbationArtifact> {
    let clean = table.clone();
    let mut perturbed = table.clone();
    let usable: BTreeSet<usize> = valid_indices(
        table,
        &[COL_VISITS_25_64.to_string(), COL_VISITS_25_49.to_string()],
    )?
    .into_iter()
    .collect();
    let groups = non_overlapping_random_indices(
        table.num_rows(),
        &[PERTURB_FRACTION],
        Some(&usable),
        None,
        DEFAULT_SEED,
    )?;
    for &row in &groups[0] {
        perturbed.set_cell(row, COL_VISITS_25_64, "-9999")?;
        perturbed.set_cell(row, COL_VISITS_25_49, "000000")?;
    }
    let recovered = clean.without_rows(&groups[0].iter().copied().collect());
    PerturbationArtifact::from_recovered(
        perturbed,
        vec![recovered],
        ArtifactType::BadValues,
        ArtifactScope::NaiveMultiColumn,
        vec![COL_VISITS_25_64.to_string(), COL_VISITS_25_49.to_string()],
        Some("Sentinel garbage in the adult visit counts. Affected rows must be ignored.".to_string()),
    )
}

fn reformatted_visits(table: &Table) -> Result<PerturbationArtifact> {
    let clean = table.clone();
    let mut perturbed = table.clone();
    let usable: BTreeSet<usize> = valid_indices(
        table,
        &[COL_VISITS_25_64.to_string(), COL_VISITS_25_49.to_string()],
    )?
    .into_iter()
    .collect();
    let groups = non_overlapping_random_indices(
        table.num_rows(),
        &[PERTURB_FRACTION, PERTURB_FRACTION],
        Some(&usable),
        None,
        DEFAULT_SEED,
    )?;
    for &row in &groups[0] {
        let value = numeric_cell(&perturbed, row, COL_VISITS_25_64)? as i64;
        perturbed.set_cell(
            row,
            COL_VISITS_25_64,
            format!("{} people", group_thousands(value)),
        )?;
    }
    for &row in &groups[1] {
        let value = numeric_cell(&perturbed, row, COL_VISITS_25_49)? as i64;
        perturbed.set_cell(
            row,
            COL_VISITS_25_49,
            format!("{} people", group_thousands(value)),
        )?;
    }
    PerturbationArtifact::from_recovered(
        perturbed,
        vec![clean],
        ArtifactType::InconsistentFormatting,
        ArtifactScope::NaiveMultiColumn,
        vec![COL_VISITS_25_64.to_string(), COL_VISITS_25_49.to_string()],
        Some("Some visit counts rendered as '1,234 people'. Values are still recoverable by parsing.".to_string()),
    )
}

/// Break the band-sum relationship on a few rows. Two recoveries are
/// equally valid: repair the broken cell from the band columns, or drop
/// the affected rows.
fn broken_band_sum(table: &Table) -> Result<PerturbationArtifact> {
    let clean = table.clone();
    let mut perturbed = table.clone();
    let usable: BTreeSet<usize> = valid_indices(
        table,
        &[
            COL_VISITS_25_64.to_string(),
            COL_VISITS_25_49.to_string(),
            COL_VISITS_50_64.to_string(),
        ],
    )?
    .into_iter()
    .collect();
    let groups = non_overlapping_random_indices(
        table.num_rows(),
        &[PERTURB_FRACTION],
        Some(&usable),
        None,
        DEFAULT_SEED,
    )?;
    for &row in &groups[0] {
        let mid = numeric_cell(&perturbed, row, COL_VISITS_25_49)? as i64;
        let older = numeric_cell(&perturbed, row, COL_VISITS_50_64)? as i64;
        // Always off the true sum, whatever the clean cell held.
        let broken = (mid + older) * 3 + 1;
        perturbed.set_cell(row, COL_VISITS_25_64, broken.to_string())?;
    }
    let dropped = clean.without_rows(&groups[0].iter().copied().collect());
    PerturbationArtifact::from_recovered(
        perturbed,
        vec![clean, dropped],
        ArtifactType::InconsistentCommonsenseLogic,
        ArtifactScope::ConnectedMultiColumn,
        vec![
            COL_VISITS_25_64.to_string(),
            COL_VISITS_25_49.to_string(),
            COL_VISITS_50_64.to_string(),
        ],
        Some(format!(
            "{sum} no longer equals {a} + {b} on some rows; repair the cell or drop the row.",
            sum = COL_VISITS_25_64,
            a = COL_VISITS_25_49,
            b = COL_VISITS_50_64
        )),
    )
}

fn outlier_visits(table: &Table) -> Result<PerturbationArtifact> {
    let clean = table.clone();
    let mut perturbed = table.clone();
    let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
    let usable: BTreeSet<usize> = valid_indices(
        table,
        &[
            COL_VISITS_25_64.to_string(),
            COL_VISITS_25_49.to_string(),
            COL_VISITS_50_64.to_string(),
        ],
    )?
    .into_iter()
    .collect();
    let groups = non_overlapping_random_indices(
        table.num_rows(),
        &[PERTURB_FRACTION],
        Some(&usable),
        None,
        DEFAULT_SEED,
    )?;
    for &row in &groups[0] {
        let value = numeric_cell(&perturbed, row, COL_VISITS_25_64)?;
        if let Some((scaled, _)) = sampling::scale_above_threshold(value, 30_000_000.0, &mut rng) {
            perturbed.set_cell(row, COL_VISITS_25_64, scaled.to_string())?;
            // Keep the band sum superficially consistent so the outlier
            // is only detectable by magnitude.
            let older = numeric_cell(&perturbed, row, COL_VISITS_50_64)? as i64;
            perturbed.set_cell(row, COL_VISITS_25_49, (scaled - older).to_string())?;
        }
    }
    let recovered = clean.without_rows(&groups[0].iter().copied().collect());
    PerturbationArtifact::from_recovered(
        perturbed,
        vec![recovered],
        ArtifactType::Outliers,
        ArtifactScope::NaiveMultiColumn,
        vec![COL_VISITS_25_64.to_string(), COL_VISITS_25_49.to_string()],
        Some("A few adult visit counts scaled into the tens of millions. Affected rows must be ignored.".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarb_core::apply_transform_spec;

    #[test]
    fn test_demo_table_band_sum_holds() {
        let t = demo_table(20);
        assert_eq!(t.num_rows(), 20);
        for row in 0..t.num_rows() {
            let mid = numeric_cell(&t, row, COL_VISITS_25_49).unwrap();
            let older = numeric_cell(&t, row, COL_VISITS_50_64).unwrap();
            let adult = numeric_cell(&t, row, COL_VISITS_25_64).unwrap();
            assert_eq!(adult, mid + older);
        }
    }

    #[test]
    fn test_answer_median_rounded() {
        let t = demo_table(21);
        let answer = median_visits_answer(&t).unwrap();
        let value = answer.as_f64().unwrap();
        assert!(value > 0.0);
        assert_eq!((value * 10.0).round() / 10.0, value);
    }

    #[test]
    fn test_answer_skips_missing_cells() {
        let mut t = demo_table(5);
        t.set_cell(0, COL_VISITS_25_64, "").unwrap();
        assert!(median_visits_answer(&t).is_ok());
    }

    #[test]
    fn test_every_perturbation_round_trips() {
        let clean = demo_table(40);
        let registry = builtin_registry();
        for artifact_type in ArtifactType::perturbable() {
            let f = registry
                .perturbation_fn(WEEKLY_CLINIC_VISITS, artifact_type)
                .unwrap();
            let artifact = f(&clean).unwrap();
            artifact.validate().unwrap();
            assert_eq!(artifact.artifact_type, artifact_type);
            for (recovered, spec) in artifact
                .recovered_tables
                .iter()
                .zip(&artifact.recovered_delta_specs)
            {
                let replayed = apply_transform_spec(&artifact.table, spec).unwrap();
                assert!(
                    replayed.content_eq(recovered),
                    "{artifact_type} spec does not replay to its recovered table"
                );
            }
        }
    }

    #[test]
    fn test_missingness_blanks_cells() {
        let clean = demo_table(40);
        let artifact = missing_visits(&clean).unwrap();
        let blanked = artifact
            .table
            .column(COL_VISITS_25_64)
            .unwrap()
            .iter()
            .filter(|c| c.is_empty())
            .count();
        assert_eq!(blanked, 2); // 5% of 40
        assert_eq!(artifact.recovered_tables[0], clean);
    }

    #[test]
    fn test_logic_perturbation_has_two_recoveries() {
        let clean = demo_table(40);
        let artifact = broken_band_sum(&clean).unwrap();
        assert_eq!(artifact.recovered_tables.len(), 2);
        assert_eq!(artifact.recovered_delta_specs.len(), 2);
        // First recovery repairs in place, second drops rows.
        assert_eq!(artifact.recovered_tables[0].num_rows(), clean.num_rows());
        assert!(artifact.recovered_tables[1].num_rows() < clean.num_rows());
        assert_ne!(
            artifact.recovered_delta_specs[0],
            artifact.recovered_delta_specs[1]
        );
    }

    #[test]
    fn test_outliers_are_huge() {
        let clean = demo_table(40);
        let artifact = outlier_visits(&clean).unwrap();
        let max = artifact
            .table
            .column(COL_VISITS_25_64)
            .unwrap()
            .iter()
            .map(|c| c.parse::<i64>().unwrap())
            .max()
            .unwrap();
        assert!(max >= 30_000_000);
    }

    #[test]
    fn test_bad_values_recovery_drops_rows() {
        let clean = demo_table(40);
        let artifact = bad_visit_values(&clean).unwrap();
        assert_eq!(artifact.recovered_tables[0].num_rows(), 38);
    }

    #[test]
    fn test_formatting_keeps_all_rows() {
        let clean = demo_table(40);
        let artifact = reformatted_visits(&clean).unwrap();
        assert_eq!(artifact.recovered_tables[0], clean);
        let formatted = artifact
            .table
            .column(COL_VISITS_25_64)
            .unwrap()
            .iter()
            .filter(|c| c.ends_with(" people"))
            .count();
        assert_eq!(formatted, 2);
    }

    #[test]
    fn test_perturbations_deterministic() {
        let clean = demo_table(40);
        let a = broken_band_sum(&clean).unwrap();
        let b = broken_band_sum(&clean).unwrap();
        assert_eq!(a.table, b.table);
        assert_eq!(a.recovered_delta_specs, b.recovered_delta_specs);
    }
}
