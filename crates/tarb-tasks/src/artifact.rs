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

//! The taxonomy of injected data-quality artifacts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family of data-quality defect injected into a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    /// Values replaced with missing markers.
    Missingness,
    /// Values replaced with sentinel garbage.
    BadValues,
    /// Values re-rendered in a clashing format.
    InconsistentFormatting,
    /// Values made mutually contradictory across columns.
    InconsistentCommonsenseLogic,
    /// Values scaled into implausible ranges.
    Outliers,
    /// No defect injected.
    Clean,
}

impl ArtifactType {
    /// The five injectable families, in pipeline order. `Clean` is not a
    /// perturbation.
    pub fn perturbable() -> [ArtifactType; 5] {
        [
            ArtifactType::Missingness,
            ArtifactType::BadValues,
            ArtifactType::InconsistentFormatting,
            ArtifactType::InconsistentCommonsenseLogic,
            ArtifactType::Outliers,
        ]
    }

    /// The kebab-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Missingness => "missingness",
            ArtifactType::BadValues => "bad-values",
            ArtifactType::InconsistentFormatting => "inconsistent-formatting",
            ArtifactType::InconsistentCommonsenseLogic => "inconsistent-commonsense-logic",
            ArtifactType::Outliers => "outliers",
            ArtifactType::Clean => "clean",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missingness" => Ok(ArtifactType::Missingness),
            "bad-values" => Ok(ArtifactType::BadValues),
            "inconsistent-formatting" => Ok(ArtifactType::InconsistentFormatting),
            "inconsistent-commonsense-logic" => Ok(ArtifactType::InconsistentCommonsenseLogic),
            "outliers" => Ok(ArtifactType::Outliers),
            "clean" => Ok(ArtifactType::Clean),
            other => Err(format!("Unknown artifact type: {other}")),
        }
    }
}

/// How many and which columns an artifact's reasoning touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactScope {
    /// Confined to one column.
    SingleColumn,
    /// Spans columns without any linking logic.
    NaiveMultiColumn,
    /// Spans columns connected by a commonsense relationship.
    ConnectedMultiColumn,
    /// No artifact.
    Clean,
}

impl ArtifactScope {
    /// The kebab-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactScope::SingleColumn => "single-column",
            ArtifactScope::NaiveMultiColumn => "naive-multi-column",
            ArtifactScope::ConnectedMultiColumn => "connected-multi-column",
            ArtifactScope::Clean => "clean",
        }
    }
}

impl fmt::Display for ArtifactScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-column" => Ok(ArtifactScope::SingleColumn),
            "naive-multi-column" => Ok(ArtifactScope::NaiveMultiColumn),
            "connected-multi-column" => Ok(ArtifactScope::ConnectedMultiColumn),
            "clean" => Ok(ArtifactScope::Clean),
            other => Err(format!("Unknown artifact scope: {other}")),
        }
    }
}
