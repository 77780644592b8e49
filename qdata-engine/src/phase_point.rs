// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Coordinates of a point in the phase diagram. The first coordinate is the
/// temperature and selects the run file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    pub coords: Vec<f64>,
}

impl PhasePoint {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    pub fn from_temperature(temperature: f64) -> Self {
        Self {
            coords: vec![temperature],
        }
    }

    /// First coordinate, `NaN` for an empty point.
    pub fn temperature(&self) -> f64 {
        self.coords.first().copied().unwrap_or(f64::NAN)
    }

    /// Index of the run file holding this point: `T + 0.5` truncated.
    pub fn run_index(&self) -> Result<i64> {
        let t = self.temperature();
        if !t.is_finite() {
            return Err(ConfigError::PhasePoint(self.coords.clone()).into());
        }
        Ok((t + 0.5) as i64)
    }
}

impl fmt::Display for PhasePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}
