// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Labelled feature vectors awaiting the classifier.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};
use crate::phase_point::PhasePoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: PhasePoint,
}

/// Append-only set of samples sharing one feature dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSet {
    dim: usize,
    samples: Vec<Sample>,
}

impl TrainingSet {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            samples: Vec::new(),
        }
    }

    /// Feature dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn add_sample(&mut self, features: Vec<f64>, label: PhasePoint) -> Result<()> {
        self.check(features.len())?;
        self.samples.push(Sample { features, label });
        Ok(())
    }

    /// Append a batch. Either every sample is appended or none is.
    pub fn extend(&mut self, samples: Vec<Sample>) -> Result<()> {
        for sample in &samples {
            self.check(sample.features.len())?;
        }
        self.samples.extend(samples);
        Ok(())
    }

    pub fn merge(&mut self, other: TrainingSet) -> Result<()> {
        if other.is_empty() {
            return Ok(());
        }
        self.check(other.dim)?;
        self.samples.extend(other.samples);
        Ok(())
    }

    /// Hand over everything collected so far and continue with an empty set
    /// of the same dimension.
    pub fn surrender(&mut self) -> TrainingSet {
        std::mem::replace(self, TrainingSet::new(self.dim))
    }

    fn check(&self, got: usize) -> Result<()> {
        if got == self.dim {
            Ok(())
        } else {
            Err(DataError::Dimension {
                expected: self.dim,
                got,
            }
            .into())
        }
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
