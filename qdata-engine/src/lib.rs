// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod config;
pub mod error;
pub mod features;
pub mod phase_point;
pub mod sampler;
pub mod source;
pub mod training;

pub use config::{FeatureConfig, LatticeConfig, RunConfig};
pub use error::{ConfigError, DataError, EngineError, Result};
pub use features::FeatureMap;
pub use phase_point::PhasePoint;
pub use sampler::{Sampler, SamplingParams};
pub use source::ConfigurationSource;
pub use training::{Sample, TrainingSet};
