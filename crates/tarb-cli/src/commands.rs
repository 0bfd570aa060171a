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

//! Command implementations.

use crate::cli::{BuildArgs, InspectArgs, VerifyArgs};
use crate::error::{CliError, Result};
use colored::Colorize;
use tarb_build::{build_sized_variants, build_task_instances, count_tokens, io};
use tarb_core::{apply_transform_spec, generate_transform_spec_delete_overwrite};
use tarb_tasks::funcs::builtin_registry;

/// `tarb build`: load the task directory, size the clean table, inject
/// every registered perturbation, and write instance files.
pub fn build(args: &BuildArgs) -> Result<()> {
    let table = io::load_clean_table(&args.task_dir)?;
    let metadata = io::load_metadata(&args.task_dir)?;
    let registry = builtin_registry();

    let variants = build_sized_variants(
        &table,
        &metadata,
        &args.num_cols,
        &args.token_buckets,
        args.min_rows,
        count_tokens,
    )?;
    let instances = build_task_instances(&variants, &metadata, &registry)?;
    let paths = io::write_task_instances(&args.out, &instances)?;

    println!(
        "{} {} instance file(s) written to {}",
        "✓".green(),
        paths.len(),
        args.out.display()
    );
    Ok(())
}

/// `tarb verify`: replay every stored spec and re-derive it from the
/// reconstructed pair, checking the round-trip law cell-for-cell.
pub fn verify(args: &VerifyArgs) -> Result<()> {
    let mut failed = 0usize;
    for path in &args.files {
        match verify_one(path) {
            Ok(specs) => {
                println!(
                    "{} {} ({} spec(s))",
                    "✓".green(),
                    path.display(),
                    specs
                );
            }
            Err(err) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), path.display(), err);
            }
        }
    }
    if failed > 0 {
        return Err(CliError::VerificationFailed {
            failed,
            total: args.files.len(),
        });
    }
    Ok(())
}

fn verify_one(path: &std::path::Path) -> Result<usize> {
    let instance = io::read_task_instance(path)?;
    // Replaying the stored specs exercises the applier, including the
    // hard failure on unknown columns.
    let recovered = instance.recovered_tables()?;
    for (index, table) in recovered.iter().enumerate() {
        // Re-derive from the reconstructed pair; the engine must agree
        // with itself.
        let rederived = generate_transform_spec_delete_overwrite(&instance.table, table)?;
        let replayed = apply_transform_spec(&instance.table, &rederived)?;
        if !replayed.content_eq(table) {
            return Err(CliError::RoundTripMismatch { index });
        }
    }
    Ok(recovered.len())
}

/// `tarb inspect`: print a one-screen summary of an instance file.
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let instance = io::read_task_instance(&args.file)?;
    println!("{}", instance.instance_id().bold());
    println!("  task:     {}", instance.task_id);
    println!("  query:    {}", instance.query);
    println!(
        "  artifact: {} ({})",
        instance.artifact_type, instance.artifact_scope
    );
    println!(
        "  table:    {} rows x {} cols (~{} tokens, bucket {})",
        instance.num_rows,
        instance.num_cols,
        instance.base_data_num_tokens,
        instance.base_data_token_bucket
    );
    println!(
        "  specs:    {}",
        instance
            .recovered_tables_transform_spec
            .iter()
            .map(|s| format!(
                "{{drops: {}, overwrites: {}}}",
                s.drop_rows.len(),
                s.overwrite_cells.len()
            ))
            .collect::<Vec<_>>()
            .join(", ")
    );
    if let Some(answer) = &instance.answer {
        println!("  answer:   {answer}");
    }
    if let Some(note) = &instance.perturbation_note {
        println!("  note:     {note}");
    }
    Ok(())
}
