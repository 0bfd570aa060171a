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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build task instances from a task directory.
    Build(BuildArgs),
    /// Verify stored instance files against the round-trip law.
    Verify(VerifyArgs),
    /// Summarize one instance file.
    Inspect(InspectArgs),
}

/// Arguments for `tarb build`.
#[derive(Args)]
pub struct BuildArgs {
    /// Task directory containing data.csv and metadata.yaml.
    #[arg(long)]
    pub task_dir: PathBuf,
    /// Output directory for instance files.
    #[arg(long)]
    pub out: PathBuf,
    /// Column counts to sample, comma-separated.
    #[arg(long, value_delimiter = ',', default_value = "6")]
    pub num_cols: Vec<usize>,
    /// Token buckets to size for, comma-separated.
    #[arg(long, value_delimiter = ',', default_value = "2000,4000")]
    pub token_buckets: Vec<usize>,
    /// Smallest row count a sized variant may have.
    #[arg(long, default_value_t = 10)]
    pub min_rows: usize,
}

/// Arguments for `tarb verify`.
#[derive(Args)]
pub struct VerifyArgs {
    /// Instance files to verify.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `tarb inspect`.
#[derive(Args)]
pub struct InspectArgs {
    /// Instance file to summarize.
    pub file: PathBuf,
}

impl Commands {
    /// Execute the selected command.
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Build(args) => commands::build(&args),
            Commands::Verify(args) => commands::verify(&args),
            Commands::Inspect(args) => commands::inspect(&args),
        }
    }
}
