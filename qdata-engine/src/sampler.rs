// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Parallel conversion of configuration pools into training samples.
//!
//! With `nc == 1` every configuration becomes one sample. With `nc > 1`
//! consecutive runs of `nc` configurations are averaged into one sample and
//! an incomplete trailing run is dropped. Workers only read the pool and the
//! feature map; their vectors are collected in pool order and appended to the
//! training set once, so the result does not depend on the worker count.

use std::time::Instant;

use qdata_lattice::{Lattice, Site};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, DataError, Result};
use crate::features::FeatureMap;
use crate::phase_point::PhasePoint;
use crate::source::ConfigurationSource;
use crate::training::{Sample, TrainingSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    /// Upper bound on configurations consumed per call.
    pub samples: usize,
    /// Configurations averaged into one sample.
    pub nc: usize,
    /// Dedicated worker count. `None` runs on the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            samples: 1000,
            nc: 1,
            threads: None,
        }
    }
}

impl SamplingParams {
    pub fn validate(&self) -> Result<()> {
        if self.nc == 0 {
            return Err(ConfigError::ZeroBlock.into());
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads.into());
        }
        Ok(())
    }

    /// Samples produced from a pool of `pool_len` configurations.
    pub fn expected_samples(&self, pool_len: usize) -> usize {
        self.samples.min(pool_len) / self.nc.max(1)
    }
}

#[derive(Debug)]
pub struct Sampler {
    features: FeatureMap,
    params: SamplingParams,
    workers: Option<ThreadPool>,
}

impl Sampler {
    pub fn new(features: FeatureMap, params: SamplingParams) -> Result<Self> {
        params.validate()?;
        let workers = match params.threads {
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(ConfigError::from)?,
            ),
            None => None,
        };
        Ok(Self {
            features,
            params,
            workers,
        })
    }

    pub fn feature_map(&self) -> &FeatureMap {
        &self.features
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    /// Map up to `samples` configurations of `pool` to feature vectors and
    /// append them to `set` under `label`. Returns the number of samples
    /// appended. On error nothing is appended.
    pub fn sample_config<S: Site>(
        &self,
        pool: &[Lattice<S>],
        label: &PhasePoint,
        set: &mut TrainingSet,
    ) -> Result<usize> {
        if set.dim() != self.features.size() {
            return Err(DataError::Dimension {
                expected: set.dim(),
                got: self.features.size(),
            }
            .into());
        }
        let configs = &pool[..self.params.samples.min(pool.len())];
        let start = Instant::now();
        let vectors = self.run(|| self.map_pool(configs))?;
        let appended = vectors.len();

        set.extend(
            vectors
                .into_iter()
                .map(|features| Sample {
                    features,
                    label: label.clone(),
                })
                .collect(),
        )?;
        debug!(
            "sampled {} configurations into {} samples at {} in {:.2?}",
            configs.len(),
            appended,
            label,
            start.elapsed()
        );
        Ok(appended)
    }

    /// Sample the current pool of `source` under its current phase point.
    /// A source with no pool yet contributes nothing.
    pub fn sample_source<S: Site>(
        &self,
        source: &ConfigurationSource<S>,
        set: &mut TrainingSet,
    ) -> Result<usize> {
        match source.phase_point() {
            Some(label) if !source.pool().is_empty() => self.sample_config(source.pool(), label, set),
            _ => {
                debug!("configuration source is empty, nothing sampled");
                Ok(0)
            }
        }
    }

    fn run<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        match &self.workers {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    fn map_pool<S: Site>(&self, configs: &[Lattice<S>]) -> Result<Vec<Vec<f64>>> {
        let nc = self.params.nc;
        if nc == 1 {
            return configs
                .par_iter()
                .map(|lattice| self.features.configuration(lattice))
                .collect();
        }
        let size = self.features.size();
        configs
            .par_chunks_exact(nc)
            .map(|block| -> Result<Vec<f64>> {
                let mut sum = vec![0.0; size];
                let mut buf = vec![0.0; size];
                for lattice in block {
                    self.features.configuration_into(lattice, &mut buf)?;
                    sum.iter_mut().zip(&buf).for_each(|(s, x)| *s += x);
                }
                let norm = 1.0 / nc as f64;
                sum.iter_mut().for_each(|s| *s *= norm);
                Ok(sum)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use qdata_cluster::{ClusterKind, ClusterPolicy};
    use qdata_lattice::{Boundary, LatticeKind};

    fn map() -> FeatureMap {
        let geometry = LatticeKind::Chain.geometry(4, Boundary::Periodic).unwrap();
        let policy = ClusterPolicy::new(ClusterKind::Single, &geometry).unwrap();
        FeatureMap::for_site::<f64>(policy, 1, false).unwrap()
    }

    fn uniform(value: f64) -> Lattice<f64> {
        Lattice::new(LatticeKind::Chain, 4, Boundary::Periodic, || value).unwrap()
    }

    #[test]
    fn test_zero_block_rejected() {
        let params = SamplingParams {
            nc: 0,
            ..SamplingParams::default()
        };
        assert!(matches!(
            Sampler::new(map(), params),
            Err(EngineError::Config(ConfigError::ZeroBlock))
        ));
        let params = SamplingParams {
            threads: Some(0),
            ..SamplingParams::default()
        };
        assert!(Sampler::new(map(), params).is_err());
    }

    #[test]
    fn test_unit_mode_respects_sample_limit() {
        let sampler = Sampler::new(
            map(),
            SamplingParams {
                samples: 3,
                nc: 1,
                threads: None,
            },
        )
        .unwrap();
        let pool: Vec<_> = (0..5).map(|i| uniform(i as f64)).collect();
        let mut set = TrainingSet::new(1);
        let label = PhasePoint::from_temperature(1.0);
        assert_eq!(sampler.sample_config(&pool, &label, &mut set).unwrap(), 3);
        let values: Vec<f64> = set.iter().map(|s| s.features[0]).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_block_mode_averages() {
        let sampler = Sampler::new(
            map(),
            SamplingParams {
                samples: 100,
                nc: 2,
                threads: Some(2),
            },
        )
        .unwrap();
        let pool: Vec<_> = [1.0, 3.0, -1.0, 1.0, 7.0].into_iter().map(uniform).collect();
        let mut set = TrainingSet::new(1);
        let label = PhasePoint::from_temperature(2.0);
        assert_eq!(sampler.sample_config(&pool, &label, &mut set).unwrap(), 2);
        assert_eq!(set.samples()[0].features, vec![2.0]);
        assert_eq!(set.samples()[1].features, vec![0.0]);
        assert!(set.iter().all(|s| s.label == label));
    }

    #[test]
    fn test_dimension_mismatch_appends_nothing() {
        let sampler = Sampler::new(map(), SamplingParams::default()).unwrap();
        let pool = vec![uniform(1.0)];
        let mut set = TrainingSet::new(4);
        let label = PhasePoint::from_temperature(1.0);
        assert!(sampler.sample_config(&pool, &label, &mut set).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_expected_samples() {
        let params = SamplingParams {
            samples: 10,
            nc: 3,
            threads: None,
        };
        assert_eq!(params.expected_samples(100), 3);
        assert_eq!(params.expected_samples(7), 2);
    }
}
