// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Lattice module for qdata
//!
//! Finite Bravais lattices with a multi-site basis:
//! - Chain / Square / Cubic: hypercubic, one site per cell
//! - Pyrochlore: 3D, 4 sites per cell, coordination 6
//! - Hyperhoneycomb: 3D, 4 sites per cell, coordination 3
//! - Stripy honeycomb: 3D, 8 sites per cell, coordination 3
//!
//! [`LatticeGeometry`] owns the addressing; [`Lattice`] stores one value per
//! site in cell-major, basis-minor order.

pub mod geometry;
pub mod hyperhoneycomb;
pub mod hypercubic;
pub mod pyrochlore;
pub mod stripyhoneycomb;

pub use geometry::{Bond, Boundary, LatticeGeometry, Position, Step};
pub use hyperhoneycomb::Hyperhoneycomb;
pub use hypercubic::Hypercubic;
pub use pyrochlore::Pyrochlore;
pub use stripyhoneycomb::StripyHoneycomb;

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LatticeError;

/// Identifies which lattice a configuration lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    Chain,
    Square,
    Cubic,
    Pyrochlore,
    Hyperhoneycomb,
    StripyHoneycomb,
}

static CHAIN: Hypercubic = Hypercubic::new(1);
static SQUARE: Hypercubic = Hypercubic::new(2);
static CUBIC: Hypercubic = Hypercubic::new(3);

impl LatticeKind {
    pub const ALL: [LatticeKind; 6] = [
        LatticeKind::Chain,
        LatticeKind::Square,
        LatticeKind::Cubic,
        LatticeKind::Pyrochlore,
        LatticeKind::Hyperhoneycomb,
        LatticeKind::StripyHoneycomb,
    ];

    pub fn shape(self) -> &'static dyn LatticeShape {
        match self {
            LatticeKind::Chain => &CHAIN,
            LatticeKind::Square => &SQUARE,
            LatticeKind::Cubic => &CUBIC,
            LatticeKind::Pyrochlore => &Pyrochlore,
            LatticeKind::Hyperhoneycomb => &Hyperhoneycomb,
            LatticeKind::StripyHoneycomb => &StripyHoneycomb,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LatticeKind::Chain => "chain",
            LatticeKind::Square => "square",
            LatticeKind::Cubic => "cubic",
            LatticeKind::Pyrochlore => "pyrochlore",
            LatticeKind::Hyperhoneycomb => "hyperhoneycomb",
            LatticeKind::StripyHoneycomb => "stripyhoneycomb",
        }
    }

    pub fn dimension(self) -> usize {
        self.shape().dimension()
    }

    pub fn n_basis(self) -> usize {
        self.shape().n_basis()
    }

    /// Geometry of this lattice kind at linear extent `length`.
    pub fn geometry(self, length: usize, boundary: Boundary) -> Result<LatticeGeometry, LatticeError> {
        LatticeGeometry::new(self.dimension(), length, self.n_basis(), boundary)
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LatticeKind {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LatticeError::UnknownKind(s.to_string()))
    }
}

/// Ordered neighbor list of a site. `None` marks a neighbor across an open edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    pub center: Position,
    pub neighbors: Vec<Option<Position>>,
}

/// Core trait for the concrete lattice shapes.
pub trait LatticeShape: Send + Sync {
    /// Number of Bravais axes
    fn dimension(&self) -> usize;

    /// Number of sites per unit cell
    fn n_basis(&self) -> usize;

    /// Number of nearest neighbors of every site
    fn coordination(&self) -> usize;

    /// Neighbor table entry for basis slot `basis`.
    fn bonds(&self, basis: usize) -> &[Bond];

    /// Ordered nearest neighbors of `pos`.
    fn nearest_neighbors(&self, geometry: &LatticeGeometry, pos: Position) -> Neighborhood {
        let neighbors = self
            .bonds(pos.basis)
            .iter()
            .map(|bond| geometry.follow(pos.cell, bond))
            .collect();
        Neighborhood {
            center: pos,
            neighbors,
        }
    }
}

// ─── Site Store ─────────────────────────────────────

/// Site values on a finite lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice<S> {
    kind: LatticeKind,
    geometry: LatticeGeometry,
    sites: Vec<S>,
}

impl<S> Lattice<S> {
    /// Build a lattice of linear extent `length`, calling `generator` once per
    /// site in canonical order.
    pub fn new<F>(
        kind: LatticeKind,
        length: usize,
        boundary: Boundary,
        mut generator: F,
    ) -> Result<Self, LatticeError>
    where
        F: FnMut() -> S,
    {
        let geometry = kind.geometry(length, boundary)?;
        let sites = (0..geometry.num_sites()).map(|_| generator()).collect();
        Ok(Self {
            kind,
            geometry,
            sites,
        })
    }

    /// Build a lattice from site values already in canonical order.
    pub fn from_sites(
        kind: LatticeKind,
        length: usize,
        boundary: Boundary,
        sites: Vec<S>,
    ) -> Result<Self, LatticeError> {
        let geometry = kind.geometry(length, boundary)?;
        if sites.len() != geometry.num_sites() {
            return Err(LatticeError::SiteCount {
                expected: geometry.num_sites(),
                got: sites.len(),
            });
        }
        Ok(Self {
            kind,
            geometry,
            sites,
        })
    }

    pub fn kind(&self) -> LatticeKind {
        self.kind
    }

    pub fn geometry(&self) -> &LatticeGeometry {
        &self.geometry
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn sites(&self) -> &[S] {
        &self.sites
    }

    /// Positions in canonical site order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.sites.len()).map(move |site| self.geometry.position(site))
    }

    pub fn get(&self, pos: Position) -> Option<&S> {
        if pos.basis >= self.geometry.n_basis() {
            return None;
        }
        self.sites.get(self.geometry.site_index(pos))
    }

    /// Site value by linear site index.
    pub fn site(&self, index: usize) -> &S {
        &self.sites[index]
    }

    /// The basis sites of one unit cell.
    pub fn cell(&self, cell: usize) -> &[S] {
        let n = self.geometry.n_basis();
        &self.sites[cell * n..(cell + 1) * n]
    }

    /// Random-access view over unit cells.
    pub fn cells(&self) -> std::slice::ChunksExact<'_, S> {
        self.sites.chunks_exact(self.geometry.n_basis())
    }

    pub fn up(&self, pos: Position, axis: usize) -> Option<Position> {
        self.geometry.up(pos, axis)
    }

    pub fn down(&self, pos: Position, axis: usize) -> Option<Position> {
        self.geometry.down(pos, axis)
    }

    pub fn nearest_neighbors(&self, pos: Position) -> Neighborhood {
        self.kind.shape().nearest_neighbors(&self.geometry, pos)
    }
}

impl<S> Index<Position> for Lattice<S> {
    type Output = S;

    fn index(&self, pos: Position) -> &S {
        &self.sites[self.geometry.site_index(pos)]
    }
}

impl<'a, S> IntoIterator for &'a Lattice<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(kind: LatticeKind, length: usize, boundary: Boundary) -> Lattice<usize> {
        let mut next = 0usize;
        Lattice::new(kind, length, boundary, || {
            next += 1;
            next - 1
        })
        .unwrap()
    }

    /// Neighbor site indices of every site, `-1` for an open edge.
    fn neighbor_table(lattice: &Lattice<usize>) -> Vec<Vec<i64>> {
        lattice
            .positions()
            .map(|pos| {
                lattice
                    .nearest_neighbors(pos)
                    .neighbors
                    .into_iter()
                    .map(|n| n.map_or(-1, |p| lattice[p] as i64))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_generator_fills_canonical_order() {
        let lattice = counting(LatticeKind::Pyrochlore, 2, Boundary::Periodic);
        assert_eq!(lattice.len(), 4 * 8);
        for (i, pos) in lattice.positions().enumerate() {
            assert_eq!(lattice[pos], i);
        }
        assert_eq!(lattice.cell(3), &[12, 13, 14, 15]);
        assert_eq!(lattice.cells().len(), 8);
    }

    #[test]
    fn test_from_sites_checks_count() {
        let err = Lattice::from_sites(LatticeKind::Square, 3, Boundary::Open, vec![0.0; 8]);
        assert_eq!(
            err.unwrap_err(),
            LatticeError::SiteCount {
                expected: 9,
                got: 8
            }
        );
        assert!(Lattice::from_sites(LatticeKind::Square, 3, Boundary::Open, vec![0.0; 9]).is_ok());
    }

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in LatticeKind::ALL {
            assert_eq!(kind.name().parse::<LatticeKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
        assert_eq!(
            "kagome".parse::<LatticeKind>(),
            Err(LatticeError::UnknownKind("kagome".into()))
        );
    }

    #[test]
    fn test_coordination_matches_tables() {
        for kind in LatticeKind::ALL {
            let shape = kind.shape();
            for basis in 0..shape.n_basis() {
                assert_eq!(shape.bonds(basis).len(), shape.coordination(), "{kind} basis {basis}");
            }
        }
    }

    // ─── Neighbor fixtures ──────────────────────────

    #[test]
    fn test_nn_chain_periodic() {
        let l1 = counting(LatticeKind::Chain, 1, Boundary::Periodic);
        assert_eq!(neighbor_table(&l1), vec![vec![0, 0]]);

        let l2 = counting(LatticeKind::Chain, 2, Boundary::Periodic);
        assert_eq!(neighbor_table(&l2), vec![vec![1, 1], vec![0, 0]]);
    }

    #[test]
    fn test_nn_chain_open() {
        let l = counting(LatticeKind::Chain, 3, Boundary::Open);
        assert_eq!(
            neighbor_table(&l),
            vec![vec![1, -1], vec![2, 0], vec![-1, 1]]
        );
    }

    #[test]
    fn test_nn_square_periodic() {
        let l1 = counting(LatticeKind::Square, 1, Boundary::Periodic);
        assert_eq!(neighbor_table(&l1), vec![vec![0, 0, 0, 0]]);

        let l2 = counting(LatticeKind::Square, 2, Boundary::Periodic);
        assert_eq!(
            neighbor_table(&l2),
            vec![
                vec![1, 1, 2, 2],
                vec![0, 0, 3, 3],
                vec![3, 3, 0, 0],
                vec![2, 2, 1, 1],
            ]
        );
    }

    #[test]
    fn test_nn_cubic_periodic() {
        let l1 = counting(LatticeKind::Cubic, 1, Boundary::Periodic);
        assert_eq!(neighbor_table(&l1), vec![vec![0; 6]]);

        let l2 = counting(LatticeKind::Cubic, 2, Boundary::Periodic);
        assert_eq!(
            neighbor_table(&l2),
            vec![
                vec![1, 1, 2, 2, 4, 4],
                vec![0, 0, 3, 3, 5, 5],
                vec![3, 3, 0, 0, 6, 6],
                vec![2, 2, 1, 1, 7, 7],
                vec![5, 5, 6, 6, 0, 0],
                vec![4, 4, 7, 7, 1, 1],
                vec![7, 7, 4, 4, 2, 2],
                vec![6, 6, 5, 5, 3, 3],
            ]
        );
    }

    #[test]
    fn test_nn_pyrochlore_periodic_1() {
        let l = counting(LatticeKind::Pyrochlore, 1, Boundary::Periodic);
        assert_eq!(
            neighbor_table(&l),
            vec![
                vec![1, 2, 3, 1, 2, 3],
                vec![0, 3, 2, 0, 3, 2],
                vec![3, 0, 1, 3, 0, 1],
                vec![2, 1, 0, 2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_nn_pyrochlore_periodic_2() {
        let l = counting(LatticeKind::Pyrochlore, 2, Boundary::Periodic);
        let expected: Vec<Vec<i64>> = vec![
            vec![1, 2, 3, 25, 22, 15],
            vec![0, 3, 2, 24, 23, 14],
            vec![3, 0, 1, 27, 20, 13],
            vec![2, 1, 0, 26, 21, 12],
            vec![5, 6, 7, 29, 18, 11],
            vec![4, 7, 6, 28, 19, 10],
            vec![7, 4, 5, 31, 16, 9],
            vec![6, 5, 4, 30, 17, 8],
            vec![9, 10, 11, 17, 30, 7],
            vec![8, 11, 10, 16, 31, 6],
            vec![11, 8, 9, 19, 28, 5],
            vec![10, 9, 8, 18, 29, 4],
            vec![13, 14, 15, 21, 26, 3],
            vec![12, 15, 14, 20, 27, 2],
            vec![15, 12, 13, 23, 24, 1],
            vec![14, 13, 12, 22, 25, 0],
            vec![17, 18, 19, 9, 6, 31],
            vec![16, 19, 18, 8, 7, 30],
            vec![19, 16, 17, 11, 4, 29],
            vec![18, 17, 16, 10, 5, 28],
            vec![21, 22, 23, 13, 2, 27],
            vec![20, 23, 22, 12, 3, 26],
            vec![23, 20, 21, 15, 0, 25],
            vec![22, 21, 20, 14, 1, 24],
            vec![25, 26, 27, 1, 14, 23],
            vec![24, 27, 26, 0, 15, 22],
            vec![27, 24, 25, 3, 12, 21],
            vec![26, 25, 24, 2, 13, 20],
            vec![29, 30, 31, 5, 10, 19],
            vec![28, 31, 30, 4, 11, 18],
            vec![31, 28, 29, 7, 8, 17],
            vec![30, 29, 28, 6, 9, 16],
        ];
        assert_eq!(neighbor_table(&l), expected);
    }

    #[test]
    fn test_nn_hyperhoneycomb_periodic_1() {
        let l = counting(LatticeKind::Hyperhoneycomb, 1, Boundary::Periodic);
        assert_eq!(
            neighbor_table(&l),
            vec![vec![3, 3, 1], vec![2, 2, 0], vec![1, 1, 3], vec![0, 0, 2]]
        );
    }

    #[test]
    fn test_nn_hyperhoneycomb_periodic_2() {
        let l = counting(LatticeKind::Hyperhoneycomb, 2, Boundary::Periodic);
        let expected: Vec<Vec<i64>> = vec![
            vec![7, 19, 1], vec![2, 10, 0], vec![1, 9, 3], vec![4, 16, 2],
            vec![3, 23, 5], vec![6, 14, 4], vec![5, 13, 7], vec![0, 20, 6],
            vec![15, 27, 9], vec![10, 2, 8], vec![9, 1, 11], vec![12, 24, 10],
            vec![11, 31, 13], vec![14, 6, 12], vec![13, 5, 15], vec![8, 28, 14],
            vec![23, 3, 17], vec![18, 26, 16], vec![17, 25, 19], vec![20, 0, 18],
            vec![19, 7, 21], vec![22, 30, 20], vec![21, 29, 23], vec![16, 4, 22],
            vec![31, 11, 25], vec![26, 18, 24], vec![25, 17, 27], vec![28, 8, 26],
            vec![27, 15, 29], vec![30, 22, 28], vec![29, 21, 31], vec![24, 12, 30],
        ];
        assert_eq!(neighbor_table(&l), expected);
    }

    #[test]
    fn test_nn_stripyhoneycomb_periodic_1() {
        let l = counting(LatticeKind::StripyHoneycomb, 1, Boundary::Periodic);
        assert_eq!(
            neighbor_table(&l),
            vec![
                vec![7, 7, 1],
                vec![2, 2, 0],
                vec![1, 1, 3],
                vec![4, 4, 2],
                vec![3, 3, 5],
                vec![6, 6, 4],
                vec![5, 5, 7],
                vec![0, 0, 6],
            ]
        );
    }

    #[test]
    fn test_nn_stripyhoneycomb_periodic_2() {
        let l = counting(LatticeKind::StripyHoneycomb, 2, Boundary::Periodic);
        let table = neighbor_table(&l);
        assert_eq!(table.len(), 64);
        // cells 0..4; the rest follow by translation
        let expected: Vec<Vec<i64>> = vec![
            vec![47, 15, 1], vec![2, 34, 0], vec![1, 33, 3], vec![4, 52, 2],
            vec![3, 51, 5], vec![54, 6, 4], vec![53, 5, 7], vec![40, 8, 6],
            vec![39, 7, 9], vec![10, 42, 8], vec![9, 41, 11], vec![12, 60, 10],
            vec![11, 59, 13], vec![62, 14, 12], vec![61, 13, 15], vec![32, 0, 14],
            vec![63, 31, 17], vec![18, 50, 16], vec![17, 49, 19], vec![20, 36, 18],
            vec![19, 35, 21], vec![38, 22, 20], vec![37, 21, 23], vec![56, 24, 22],
            vec![55, 23, 25], vec![26, 58, 24], vec![25, 57, 27], vec![28, 44, 26],
            vec![27, 43, 29], vec![46, 30, 28], vec![45, 29, 31], vec![48, 16, 30],
        ];
        assert_eq!(table[..32], expected[..]);
        assert_eq!(table[32], vec![15, 47, 33]);
        assert_eq!(table[63], vec![16, 48, 62]);
    }
}
