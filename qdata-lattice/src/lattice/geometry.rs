// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Bravais geometry: cell addressing and ±1 navigation.
//!
//! Cells are numbered with axis 0 fastest. For a lattice of linear extent `L`
//! in `D` dimensions the cell strides are `[1, L, L², …, L^D]`; the last entry
//! is the total cell count. A site is addressed by a [`Position`]
//! `(cell, basis)` and its linear site index is `cell · n_basis + basis`.

use serde::{Deserialize, Serialize};

use crate::error::LatticeError;

/// Boundary condition applied when a step leaves the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Steps wrap modulo `L` (torus).
    Periodic,
    /// Steps across an edge have no target.
    Open,
}

impl Boundary {
    pub fn from_periodic(periodic: bool) -> Self {
        if periodic {
            Self::Periodic
        } else {
            Self::Open
        }
    }
}

/// Direction of a unit step along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Up,
    Down,
}

/// A site on the lattice: unit cell plus basis slot.
///
/// Ordering is cell-major, then basis, which is the canonical site order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub cell: usize,
    pub basis: usize,
}

impl Position {
    pub fn new(cell: usize, basis: usize) -> Self {
        Self { cell, basis }
    }
}

/// One entry of a neighbor table: a chain of unit steps from the source cell,
/// landing on `basis` of the target cell. An empty chain stays in the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bond {
    pub shifts: &'static [(usize, Step)],
    pub basis: usize,
}

impl Bond {
    pub const fn local(basis: usize) -> Self {
        Self { shifts: &[], basis }
    }

    pub const fn new(shifts: &'static [(usize, Step)], basis: usize) -> Self {
        Self { shifts, basis }
    }
}

/// Shape-independent description of a finite Bravais lattice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeGeometry {
    dim: usize,
    length: usize,
    n_basis: usize,
    boundary: Boundary,
    /// `strides[k] = L^k` for `k in 0..=dim`
    strides: Vec<usize>,
}

impl LatticeGeometry {
    pub fn new(
        dim: usize,
        length: usize,
        n_basis: usize,
        boundary: Boundary,
    ) -> Result<Self, LatticeError> {
        if length == 0 {
            return Err(LatticeError::ZeroLength);
        }
        if n_basis == 0 {
            return Err(LatticeError::ZeroBasis);
        }
        let too_large = LatticeError::TooLarge {
            dimension: dim,
            length,
            n_basis,
        };

        let mut strides = Vec::with_capacity(dim + 1);
        strides.push(1usize);
        for k in 0..dim {
            let next = strides[k].checked_mul(length).ok_or(too_large.clone())?;
            strides.push(next);
        }
        strides[dim].checked_mul(n_basis).ok_or(too_large)?;

        Ok(Self {
            dim,
            length,
            n_basis,
            boundary,
            strides,
        })
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Linear extent `L` along every axis.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn n_basis(&self) -> usize {
        self.n_basis
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn is_periodic(&self) -> bool {
        self.boundary == Boundary::Periodic
    }

    /// Cell strides `[1, L, …, L^D]`.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// `L^D`
    pub fn num_cells(&self) -> usize {
        self.strides[self.dim]
    }

    /// `n_basis · L^D`
    pub fn num_sites(&self) -> usize {
        self.num_cells() * self.n_basis
    }

    /// Coordinate of `cell` along `axis`.
    pub fn coord(&self, cell: usize, axis: usize) -> usize {
        assert!(axis < self.dim, "axis {axis} out of range for {}D lattice", self.dim);
        (cell / self.strides[axis]) % self.length
    }

    /// Multi-dimensional coordinates of a cell, axis 0 first.
    pub fn coords(&self, cell: usize) -> Vec<usize> {
        (0..self.dim).map(|axis| self.coord(cell, axis)).collect()
    }

    /// Inverse of [`coords`](Self::coords). `None` if any coordinate is out of range.
    pub fn cell_at(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.dim || coords.iter().any(|&x| x >= self.length) {
            return None;
        }
        Some(
            coords
                .iter()
                .zip(&self.strides)
                .map(|(&x, &stride)| x * stride)
                .sum(),
        )
    }

    pub fn site_index(&self, pos: Position) -> usize {
        debug_assert!(pos.basis < self.n_basis);
        pos.cell * self.n_basis + pos.basis
    }

    pub fn position(&self, site: usize) -> Position {
        Position::new(site / self.n_basis, site % self.n_basis)
    }

    /// The cell one step away from `cell` along `axis`.
    ///
    /// Periodic geometries wrap modulo `L`. Open geometries return `None` when
    /// the step would cross the edge.
    pub fn shift(&self, cell: usize, axis: usize, step: Step) -> Option<usize> {
        let x = self.coord(cell, axis);
        let stride = self.strides[axis];
        match step {
            Step::Up if x + 1 < self.length => Some(cell + stride),
            Step::Down if x > 0 => Some(cell - stride),
            _ if !self.is_periodic() => None,
            Step::Up => Some(cell - x * stride),
            Step::Down => Some(cell + (self.length - 1) * stride),
        }
    }

    pub fn up(&self, pos: Position, axis: usize) -> Option<Position> {
        self.shift(pos.cell, axis, Step::Up)
            .map(|cell| Position::new(cell, pos.basis))
    }

    pub fn down(&self, pos: Position, axis: usize) -> Option<Position> {
        self.shift(pos.cell, axis, Step::Down)
            .map(|cell| Position::new(cell, pos.basis))
    }

    /// Follow a chain of unit steps from `cell`, then select `basis`.
    pub fn follow(&self, cell: usize, bond: &Bond) -> Option<Position> {
        let mut cell = cell;
        for &(axis, step) in bond.shifts {
            cell = self.shift(cell, axis, step)?;
        }
        Some(Position::new(cell, bond.basis))
    }
}
