// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Hyperhoneycomb lattice: three-dimensional tricoordinated lattice with a
//! four-site basis. Neighbor order per site is x-bond, y-bond, z-bond.

use super::{Bond, LatticeShape, Step};

use Step::{Down as D, Up as U};

const BONDS: [[Bond; 3]; 4] = [
    [Bond::new(&[(0, D)], 3), Bond::new(&[(2, D)], 3), Bond::local(1)],
    [Bond::local(2), Bond::new(&[(1, D)], 2), Bond::local(0)],
    [Bond::local(1), Bond::new(&[(1, U)], 1), Bond::local(3)],
    [Bond::new(&[(0, U)], 0), Bond::new(&[(2, U)], 0), Bond::local(2)],
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hyperhoneycomb;

impl LatticeShape for Hyperhoneycomb {
    fn dimension(&self) -> usize {
        3
    }

    fn n_basis(&self) -> usize {
        4
    }

    fn coordination(&self) -> usize {
        3
    }

    fn bonds(&self, basis: usize) -> &[Bond] {
        &BONDS[basis]
    }
}
