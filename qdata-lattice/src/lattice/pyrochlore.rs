// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Pyrochlore lattice: FCC Bravais lattice with a four-site tetrahedral basis.
//!
//! Each site has three neighbors inside its own tetrahedron followed by three
//! in the corner-sharing tetrahedron of the adjacent cells.

use super::{Bond, LatticeShape, Step};

use Step::{Down as D, Up as U};

const BONDS: [[Bond; 6]; 4] = [
    [
        Bond::local(1),
        Bond::local(2),
        Bond::local(3),
        Bond::new(&[(1, U), (2, D)], 1),
        Bond::new(&[(0, U), (2, D)], 2),
        Bond::new(&[(0, U), (1, U)], 3),
    ],
    [
        Bond::local(0),
        Bond::local(3),
        Bond::local(2),
        Bond::new(&[(1, D), (2, U)], 0),
        Bond::new(&[(0, U), (2, U)], 3),
        Bond::new(&[(0, U), (1, D)], 2),
    ],
    [
        Bond::local(3),
        Bond::local(0),
        Bond::local(1),
        Bond::new(&[(1, U), (2, U)], 3),
        Bond::new(&[(0, D), (2, U)], 0),
        Bond::new(&[(0, D), (1, U)], 1),
    ],
    [
        Bond::local(2),
        Bond::local(1),
        Bond::local(0),
        Bond::new(&[(1, D), (2, D)], 2),
        Bond::new(&[(0, D), (2, D)], 1),
        Bond::new(&[(0, D), (1, D)], 0),
    ],
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pyrochlore;

impl LatticeShape for Pyrochlore {
    fn dimension(&self) -> usize {
        3
    }

    fn n_basis(&self) -> usize {
        4
    }

    fn coordination(&self) -> usize {
        6
    }

    fn bonds(&self, basis: usize) -> &[Bond] {
        &BONDS[basis]
    }
}
