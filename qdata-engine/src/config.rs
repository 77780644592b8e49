// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Run configuration
//!
//! Selects the lattice, the cluster shape and feature rank, and the sampling
//! sweep. Loaded from JSON; missing fields take the defaults below, supplied
//! fields are validated before anything is built.

use std::path::{Path, PathBuf};

use qdata_cluster::{ClusterKind, ClusterPolicy};
use qdata_lattice::{Boundary, LatticeGeometry, LatticeKind, Site};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::features::FeatureMap;
use crate::phase_point::PhasePoint;
use crate::sampler::{Sampler, SamplingParams};
use crate::source::ConfigurationSource;

/// Lattice the configurations live on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub kind: LatticeKind,
    /// Linear extent `L`. Run files may override it when read.
    pub length: usize,
    pub boundary: Boundary,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            kind: LatticeKind::Pyrochlore,
            length: 4,
            boundary: Boundary::Periodic,
        }
    }
}

impl LatticeConfig {
    pub fn geometry(&self) -> Result<LatticeGeometry> {
        Ok(self
            .kind
            .geometry(self.length, self.boundary)
            .map_err(ConfigError::from)?)
    }
}

/// Feature map parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub cluster: ClusterKind,
    /// Identify monomials that differ by a permutation of their factors.
    pub symmetrized: bool,
    pub rank: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            cluster: ClusterKind::UnitCell,
            symmetrized: true,
            rank: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub lattice: LatticeConfig,
    pub features: FeatureConfig,
    pub sweep: SamplingParams,
    /// Directory holding `Run_<n>.txt` files.
    pub data_dir: PathBuf,
    /// Phase points to visit, one temperature each.
    pub temperatures: Vec<f64>,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeConfig::default(),
            features: FeatureConfig::default(),
            sweep: SamplingParams::default(),
            data_dir: PathBuf::from("."),
            temperatures: Vec::new(),
            seed: 0,
        }
    }
}

impl RunConfig {
    /// Small pyrochlore run for smoke tests and benchmarks.
    ///
    /// Star clusters, rank 2 symmetrized: 78 features per sample.
    pub fn quick() -> Self {
        Self {
            lattice: LatticeConfig {
                kind: LatticeKind::Pyrochlore,
                length: 2,
                boundary: Boundary::Periodic,
            },
            features: FeatureConfig {
                cluster: ClusterKind::Star,
                symmetrized: true,
                rank: 2,
            },
            sweep: SamplingParams {
                samples: 200,
                nc: 1,
                threads: None,
            },
            temperatures: vec![1.0, 2.0, 3.0],
            ..Self::default()
        }
    }

    /// Parse and validate.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    /// Reject anything that would fail later: bad geometry, a cluster the
    /// lattice cannot host, zero rank or block size, non-finite temperatures.
    pub fn validate(&self) -> Result<()> {
        self.sweep.validate()?;
        if self.features.rank == 0 {
            return Err(ConfigError::ZeroRank.into());
        }
        self.policy()?;
        for &t in &self.temperatures {
            PhasePoint::from_temperature(t).run_index()?;
        }
        Ok(())
    }

    pub fn policy(&self) -> Result<ClusterPolicy> {
        let geometry = self.lattice.geometry()?;
        Ok(ClusterPolicy::new(self.features.cluster, &geometry).map_err(ConfigError::from)?)
    }

    pub fn feature_map<S: Site>(&self) -> Result<FeatureMap> {
        FeatureMap::for_site::<S>(self.policy()?, self.features.rank, self.features.symmetrized)
    }

    pub fn sampler<S: Site>(&self) -> Result<Sampler> {
        Sampler::new(self.feature_map::<S>()?, self.sweep)
    }

    /// Source over `data_dir` with the configured length fixed.
    pub fn source<S: Site>(&self) -> ConfigurationSource<S> {
        ConfigurationSource::new(&self.data_dir, self.lattice.kind, self.lattice.boundary)
            .with_length(self.lattice.length)
    }

    pub fn phase_points(&self) -> Vec<PhasePoint> {
        self.temperatures
            .iter()
            .map(|&t| PhasePoint::from_temperature(t))
            .collect()
    }
}
