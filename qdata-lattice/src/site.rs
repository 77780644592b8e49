// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Site value types.
//!
//! A site carries a fixed-length real vector. Raw measurement records store
//! one integer POVM outcome per site; [`Site::from_outcome`] maps an outcome
//! to its vector, and [`Site::random`] draws a uniformly random outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub trait Site: Clone + Send + Sync {
    /// Number of real components per site.
    const COMPONENTS: usize;

    fn components(&self) -> &[f64];

    /// Site value for a measurement outcome, `None` for an unknown outcome.
    fn from_outcome(outcome: i64) -> Option<Self>;

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

// ─── O(3) spin ──────────────────────────────────────

/// Three-component spin measured in the Pauli-6 POVM.
///
/// Outcomes `0..=5` map to `+x, -x, +y, -y, +z, -z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinO3 {
    v: [f64; 3],
}

const PAULI6: [[f64; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

impl SpinO3 {
    pub fn new(v: [f64; 3]) -> Self {
        Self { v }
    }

    pub fn vector(&self) -> [f64; 3] {
        self.v
    }
}

impl Site for SpinO3 {
    const COMPONENTS: usize = 3;

    fn components(&self) -> &[f64] {
        &self.v
    }

    fn from_outcome(outcome: i64) -> Option<Self> {
        usize::try_from(outcome)
            .ok()
            .and_then(|i| PAULI6.get(i))
            .map(|&v| Self { v })
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            v: PAULI6[rng.gen_range(0..PAULI6.len())],
        }
    }
}

// ─── Ising spin ─────────────────────────────────────

/// Scalar `±1` spin measured in the Z basis: outcome 0 is `+1`, 1 is `-1`.
impl Site for f64 {
    const COMPONENTS: usize = 1;

    fn components(&self) -> &[f64] {
        std::slice::from_ref(self)
    }

    fn from_outcome(outcome: i64) -> Option<Self> {
        match outcome {
            0 => Some(1.0),
            1 => Some(-1.0),
            _ => None,
        }
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }
}
