// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Fixed motifs anchored at every unit cell.
//!
//! Each motif is a list of [`Bond`]s followed from the anchor cell, one per
//! element, so slot `k` of every cluster reaches the same relative site. One
//! cluster per cell, in cell order. Motifs that leave the anchor cell only
//! make sense on a periodic lattice, where every bond resolves.

use qdata_lattice::{Bond, LatticeGeometry, Step};

use crate::error::ClusterError;
use crate::shape::{ClusterCursor, ClusterShape, ElementLayout};

const PLUS_X: &[(usize, Step)] = &[(0, Step::Up)];
const MINUS_X: &[(usize, Step)] = &[(0, Step::Down)];
const MINUS_Y: &[(usize, Step)] = &[(1, Step::Down)];
const PLUS_XY: &[(usize, Step)] = &[(0, Step::Up), (1, Step::Up)];
const PLUS_Y: &[(usize, Step)] = &[(1, Step::Up)];
const MINUS_XY: &[(usize, Step)] = &[(0, Step::Down), (1, Step::Down)];

/// Basis 0 of the four corners `c, c+x, c+x+y, c+y`.
const PLAQUETTE: [Bond; 4] = [
    Bond::local(0),
    Bond::new(PLUS_X, 0),
    Bond::new(PLUS_XY, 0),
    Bond::new(PLUS_Y, 0),
];

/// Both basis sites of the anchor cell plus basis 0 one step down along x
/// and basis 1 one step down along y.
const STAR: [Bond; 4] = [
    Bond::local(0),
    Bond::local(1),
    Bond::new(MINUS_X, 0),
    Bond::new(MINUS_Y, 1),
];

/// The star extended by both basis sites of the diagonal cell `c-x-y`.
const FISH: [Bond; 6] = [
    Bond::local(0),
    Bond::local(1),
    Bond::new(MINUS_X, 0),
    Bond::new(MINUS_Y, 1),
    Bond::new(MINUS_XY, 0),
    Bond::new(MINUS_XY, 1),
];

#[derive(Debug, Clone)]
pub struct AnchoredCluster {
    name: &'static str,
    geometry: LatticeGeometry,
    bonds: Vec<Bond>,
    layout: ElementLayout,
}

impl AnchoredCluster {
    fn build(name: &'static str, geometry: &LatticeGeometry, bonds: Vec<Bond>) -> Self {
        let layout = ElementLayout::new(bonds.iter().map(|b| b.basis).collect());
        Self {
            name,
            geometry: geometry.clone(),
            bonds,
            layout,
        }
    }

    /// All basis sites of one unit cell. Valid on any boundary.
    pub fn unit_cell(geometry: &LatticeGeometry) -> Self {
        let bonds = (0..geometry.n_basis()).map(Bond::local).collect();
        Self::build("lattice", geometry, bonds)
    }

    pub fn plaquette(geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        require(geometry, "plaquette", 2, 1)?;
        Ok(Self::build("plaquette", geometry, PLAQUETTE.to_vec()))
    }

    pub fn star(geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        require(geometry, "star", 2, 2)?;
        Ok(Self::build("star", geometry, STAR.to_vec()))
    }

    pub fn fish(geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        require(geometry, "fish", 2, 2)?;
        Ok(Self::build("fish", geometry, FISH.to_vec()))
    }

    /// All basis sites of the anchor cell, then all basis sites of its `+x`
    /// neighbor. Consecutive clusters overlap by one cell.
    pub fn twocell_overlap(geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        require(geometry, "twocell_overlap", 1, 1)?;
        let n = geometry.n_basis();
        let bonds = (0..n)
            .map(Bond::local)
            .chain((0..n).map(|b| Bond::new(PLUS_X, b)))
            .collect();
        Ok(Self::build("twocell_overlap", geometry, bonds))
    }
}

fn require(
    geometry: &LatticeGeometry,
    cluster: &'static str,
    min_dim: usize,
    min_basis: usize,
) -> Result<(), ClusterError> {
    let unsupported = |reason: String| ClusterError::UnsupportedLattice { cluster, reason };
    if geometry.dimension() < min_dim {
        return Err(unsupported(format!(
            "needs at least {min_dim} dimensions, lattice has {}",
            geometry.dimension()
        )));
    }
    if geometry.n_basis() < min_basis {
        return Err(unsupported(format!(
            "needs at least {min_basis} basis sites per cell, lattice has {}",
            geometry.n_basis()
        )));
    }
    if !geometry.is_periodic() {
        return Err(unsupported("needs periodic boundaries".to_string()));
    }
    Ok(())
}

impl ClusterShape for AnchoredCluster {
    fn name(&self) -> &'static str {
        self.name
    }

    fn layout(&self) -> &ElementLayout {
        &self.layout
    }

    fn size(&self) -> usize {
        self.geometry.num_cells()
    }

    fn element_at(&self, cursor: ClusterCursor, slot: usize) -> Option<usize> {
        if cursor.0 >= self.size() {
            return None;
        }
        let bond = self.bonds.get(slot)?;
        self.geometry
            .follow(cursor.0, bond)
            .map(|pos| self.geometry.site_index(pos))
    }
}
