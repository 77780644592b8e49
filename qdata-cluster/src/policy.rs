// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! A cluster shape selected by [`ClusterKind`] and bound to one geometry.

use qdata_lattice::{Lattice, LatticeGeometry};

use crate::error::ClusterError;
use crate::kind::ClusterKind;
use crate::shape::{ClusterCursor, ClusterShape, ClusterView, Clusters, ElementLayout};
use crate::shapes::{AnchoredCluster, MultiCell, SingleSite};

#[derive(Debug)]
pub struct ClusterPolicy {
    kind: ClusterKind,
    geometry: LatticeGeometry,
    shape: Box<dyn ClusterShape>,
}

impl ClusterPolicy {
    pub fn new(kind: ClusterKind, geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        if geometry.dimension() == 0 {
            return Err(ClusterError::ZeroDimension);
        }
        let shape: Box<dyn ClusterShape> = match kind {
            ClusterKind::Single => Box::new(SingleSite::new(geometry)),
            ClusterKind::UnitCell => Box::new(AnchoredCluster::unit_cell(geometry)),
            ClusterKind::Plaquette => Box::new(AnchoredCluster::plaquette(geometry)?),
            ClusterKind::Star => Box::new(AnchoredCluster::star(geometry)?),
            ClusterKind::Fish => Box::new(AnchoredCluster::fish(geometry)?),
            ClusterKind::TwoCellOverlap => Box::new(AnchoredCluster::twocell_overlap(geometry)?),
            ClusterKind::MultiCell(lin_l) => Box::new(MultiCell::new(lin_l, geometry)?),
        };
        Ok(Self {
            kind,
            geometry: geometry.clone(),
            shape,
        })
    }

    /// Parse a cluster name and bind it to `geometry`.
    pub fn from_name(name: &str, geometry: &LatticeGeometry) -> Result<Self, ClusterError> {
        Self::new(name.parse()?, geometry)
    }

    pub fn kind(&self) -> ClusterKind {
        self.kind
    }

    pub fn geometry(&self) -> &LatticeGeometry {
        &self.geometry
    }

    pub fn shape(&self) -> &dyn ClusterShape {
        self.shape.as_ref()
    }

    pub fn layout(&self) -> &ElementLayout {
        self.shape.layout()
    }

    /// Elements per cluster.
    pub fn n_elements(&self) -> usize {
        self.shape.n_elements()
    }

    /// Clusters per lattice.
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    pub fn begin(&self) -> ClusterCursor {
        self.shape.begin()
    }

    pub fn end(&self) -> ClusterCursor {
        self.shape.end()
    }

    pub fn next(&self, cursor: ClusterCursor) -> ClusterCursor {
        self.shape.next(cursor)
    }

    pub fn prev(&self, cursor: ClusterCursor) -> ClusterCursor {
        self.shape.prev(cursor)
    }

    pub fn element_at(&self, cursor: ClusterCursor, slot: usize) -> Option<usize> {
        self.shape.element_at(cursor, slot)
    }

    /// Enumerate every cluster of `lattice`.
    ///
    /// The lattice must have the geometry this policy was built for.
    pub fn clusters<'a, S>(&'a self, lattice: &'a Lattice<S>) -> Result<Clusters<'a, S>, ClusterError> {
        self.check(lattice)?;
        Ok(Clusters::new(self.shape(), lattice))
    }

    /// The single cluster at `cursor`, or `None` for `end()` and for cursors
    /// that address no cluster of this policy.
    pub fn view<'a, S>(
        &'a self,
        lattice: &'a Lattice<S>,
        cursor: ClusterCursor,
    ) -> Result<Option<ClusterView<'a, S>>, ClusterError> {
        self.check(lattice)?;
        Ok(self
            .shape
            .element_at(cursor, 0)
            .map(|_| ClusterView::new(self.shape(), lattice, cursor)))
    }

    fn check<S>(&self, lattice: &Lattice<S>) -> Result<(), ClusterError> {
        let got = lattice.geometry();
        if *got == self.geometry {
            Ok(())
        } else {
            Err(ClusterError::GeometryMismatch {
                expected: describe(&self.geometry),
                got: describe(got),
            })
        }
    }
}

fn describe(g: &LatticeGeometry) -> String {
    format!(
        "{}D, L={}, {} basis, {:?}",
        g.dimension(),
        g.length(),
        g.n_basis(),
        g.boundary()
    )
}
