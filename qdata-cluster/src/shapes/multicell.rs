// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Sliding `lin_l^D` block of unit cells.
//!
//! A window is identified by its anchor cell, the corner with the smallest
//! coordinates. Anchors range over every coordinate in `0..=L-lin_l`, so
//! windows overlap and never wrap, even on a periodic lattice. That gives
//! `(L-lin_l+1)^D` clusters. Anchors advance in mixed radix `L-lin_l+1`
//! with axis 0 fastest. The end sentinel is the cell index `L^D`, which no
//! anchor can take.
//!
//! Elements are ordered block-cell major, basis minor. Block cells are
//! numbered with axis 0 fastest using strides `lin_l^k`; resolving an element
//! re-encodes its block offsets with the lattice strides `L^k`.

use qdata_lattice::LatticeGeometry;

use crate::error::ClusterError;
use crate::shape::{ClusterCursor, ClusterShape, ElementLayout};

#[derive(Debug, Clone)]
pub struct MultiCell {
    lin_l: usize,
    geometry: LatticeGeometry,
    /// `lin_l^k` for `k in 0..D`
    block_strides: Vec<usize>,
    /// Anchor positions per axis, `L - lin_l + 1`.
    radix: usize,
    windows: usize,
    layout: ElementLayout,
}

impl MultiCell {
    pub fn new(lin_l: usize, geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        let dim = geometry.dimension();
        if dim == 0 {
            return Err(ClusterError::ZeroDimension);
        }
        let length = geometry.length();
        if lin_l == 0 || lin_l > length {
            return Err(ClusterError::Window { lin_l, length });
        }

        let block_strides: Vec<usize> = (0..dim).map(|k| lin_l.pow(k as u32)).collect();
        let block_cells = block_strides[dim - 1] * lin_l;
        let radix = length - lin_l + 1;
        let windows = radix.pow(dim as u32);
        let n_basis = geometry.n_basis();
        let layout = ElementLayout::new((0..block_cells * n_basis).map(|i| i % n_basis).collect());

        Ok(Self {
            lin_l,
            geometry: geometry.clone(),
            block_strides,
            radix,
            windows,
            layout,
        })
    }

    pub fn lin_l(&self) -> usize {
        self.lin_l
    }

    /// Cell holding block offset `block_cell` of the window anchored at `anchor`.
    fn block_cell(&self, anchor: usize, block_cell: usize) -> usize {
        self.block_strides
            .iter()
            .zip(self.geometry.strides())
            .map(|(&block_stride, &lattice_stride)| {
                ((block_cell / block_stride) % self.lin_l) * lattice_stride
            })
            .fold(anchor, |cell, offset| cell + offset)
    }

    fn is_anchor(&self, cell: usize) -> bool {
        cell < self.geometry.num_cells()
            && (0..self.geometry.dimension()).all(|axis| self.geometry.coord(cell, axis) < self.radix)
    }
}

impl ClusterShape for MultiCell {
    fn name(&self) -> &'static str {
        "multicell"
    }

    fn layout(&self) -> &ElementLayout {
        &self.layout
    }

    fn size(&self) -> usize {
        self.windows
    }

    fn end(&self) -> ClusterCursor {
        ClusterCursor(self.geometry.num_cells())
    }

    fn next(&self, cursor: ClusterCursor) -> ClusterCursor {
        if cursor == self.end() {
            return cursor;
        }
        let mut anchor = cursor.0;
        for axis in 0..self.geometry.dimension() {
            let x = self.geometry.coord(anchor, axis);
            let stride = self.geometry.strides()[axis];
            if x + 1 < self.radix {
                return ClusterCursor(anchor + stride);
            }
            anchor -= x * stride;
        }
        self.end()
    }

    fn prev(&self, cursor: ClusterCursor) -> ClusterCursor {
        let last = self.radix - 1;
        if cursor == self.end() {
            return ClusterCursor(
                self.geometry.strides()[..self.geometry.dimension()]
                    .iter()
                    .map(|&stride| last * stride)
                    .sum(),
            );
        }
        if cursor == self.begin() {
            return cursor;
        }
        let mut anchor = cursor.0;
        for axis in 0..self.geometry.dimension() {
            let x = self.geometry.coord(anchor, axis);
            let stride = self.geometry.strides()[axis];
            if x > 0 {
                return ClusterCursor(anchor - stride);
            }
            anchor += last * stride;
        }
        self.begin()
    }

    fn element_at(&self, cursor: ClusterCursor, slot: usize) -> Option<usize> {
        if slot >= self.layout.len() || !self.is_anchor(cursor.0) {
            return None;
        }
        let n_basis = self.geometry.n_basis();
        let cell = self.block_cell(cursor.0, slot / n_basis);
        Some(cell * n_basis + slot % n_basis)
    }
}
