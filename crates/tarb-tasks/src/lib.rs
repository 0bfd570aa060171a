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

//! Task layer for TARB: artifact taxonomy, the perturbation contract,
//! per-task function registries, persisted task instances, seeded
//! sampling helpers, and answer matching.
//!
//! A task couples a clean table with a natural-language query and a known
//! answer function. Perturbation functions inject controlled data-quality
//! artifacts and return a [`PerturbationArtifact`] whose delta specs are
//! always derived through the transform inferrer in `tarb-core`, so every
//! persisted spec is verifiably consistent with the tables it relates.

pub mod answer;
mod artifact;
mod error;
pub mod funcs;
mod instance;
mod metadata;
mod perturbation;
mod registry;
pub mod sampling;

pub use artifact::{ArtifactScope, ArtifactType};
pub use error::{Result, TaskError};
pub use instance::{PromptInfo, TaskInstance};
pub use metadata::TaskMetadata;
pub use perturbation::{AnswerFn, PerturbationArtifact, PerturbationFn};
pub use registry::TaskRegistry;
