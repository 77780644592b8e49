// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Hypercubic Lattice (Z^n) Implementation
//!
//! The simplest lattice: one site per cell, integer coordinates in n dimensions.
//! Chain (1D), square (2D) and cubic (3D) are supported.
//!
//! Properties:
//! - Coordination: 2n
//! - Neighbor order: `+x, -x, +y, -y, +z, -z`

use super::{Bond, LatticeShape, Step};

const CHAIN_BONDS: [Bond; 2] = [
    Bond::new(&[(0, Step::Up)], 0),
    Bond::new(&[(0, Step::Down)], 0),
];

const SQUARE_BONDS: [Bond; 4] = [
    Bond::new(&[(0, Step::Up)], 0),
    Bond::new(&[(0, Step::Down)], 0),
    Bond::new(&[(1, Step::Up)], 0),
    Bond::new(&[(1, Step::Down)], 0),
];

const CUBIC_BONDS: [Bond; 6] = [
    Bond::new(&[(0, Step::Up)], 0),
    Bond::new(&[(0, Step::Down)], 0),
    Bond::new(&[(1, Step::Up)], 0),
    Bond::new(&[(1, Step::Down)], 0),
    Bond::new(&[(2, Step::Up)], 0),
    Bond::new(&[(2, Step::Down)], 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypercubic {
    dimension: usize,
}

impl Hypercubic {
    pub const fn new(dimension: usize) -> Self {
        assert!(
            dimension >= 1 && dimension <= 3,
            "hypercubic lattices are supported in 1 to 3 dimensions"
        );
        Self { dimension }
    }
}

impl LatticeShape for Hypercubic {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn n_basis(&self) -> usize {
        1
    }

    fn coordination(&self) -> usize {
        2 * self.dimension
    }

    fn bonds(&self, basis: usize) -> &[Bond] {
        assert_eq!(basis, 0, "hypercubic lattices have a single basis site");
        match self.dimension {
            1 => &CHAIN_BONDS,
            2 => &SQUARE_BONDS,
            _ => &CUBIC_BONDS,
        }
    }
}
