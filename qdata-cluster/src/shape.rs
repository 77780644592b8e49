// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! The cluster-shape contract.
//!
//! A shape enumerates clusters with an opaque [`ClusterCursor`]. `begin()`
//! is the first cluster and `end()` is a sentinel one past the last; `next`
//! and `prev` step between them. Every cluster exposes the same number of
//! elements, and element `slot` always plays the structural role recorded in
//! the shape's [`ElementLayout`]. Shapes resolve elements to linear site
//! indices; [`ClusterView`] turns those into site values of a bound lattice.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Index;

use qdata_lattice::Lattice;

// ─── Cursor ─────────────────────────────────────────

/// Position of a cluster within its shape's enumeration.
///
/// For most shapes the value is the cluster ordinal. Window shapes use the
/// anchor cell index instead, so only compare cursors from the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterCursor(pub(crate) usize);

impl ClusterCursor {
    pub fn index(self) -> usize {
        self.0
    }
}

// ─── Layout ─────────────────────────────────────────

/// Per-slot structural role shared by every cluster of a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementLayout {
    basis: Vec<usize>,
}

impl ElementLayout {
    pub fn new(basis: Vec<usize>) -> Self {
        Self { basis }
    }

    /// Elements per cluster.
    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    /// Basis role of `slot`.
    pub fn basis(&self, slot: usize) -> usize {
        self.basis[slot]
    }

    pub fn roles(&self) -> &[usize] {
        &self.basis
    }
}

// ─── Shape trait ────────────────────────────────────

pub trait ClusterShape: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn layout(&self) -> &ElementLayout;

    /// Number of clusters.
    fn size(&self) -> usize;

    fn n_elements(&self) -> usize {
        self.layout().len()
    }

    fn begin(&self) -> ClusterCursor {
        ClusterCursor(0)
    }

    fn end(&self) -> ClusterCursor {
        ClusterCursor(self.size())
    }

    /// The cluster after `cursor`. Stepping from the last cluster yields
    /// `end()`, and `end()` stays put.
    fn next(&self, cursor: ClusterCursor) -> ClusterCursor {
        ClusterCursor((cursor.0 + 1).min(self.size()))
    }

    /// The cluster before `cursor`. `prev(end())` is the last cluster and
    /// `prev(begin())` stays put.
    fn prev(&self, cursor: ClusterCursor) -> ClusterCursor {
        ClusterCursor(cursor.0.saturating_sub(1))
    }

    /// Linear site index of element `slot` of the cluster at `cursor`.
    ///
    /// `None` when the cursor is `end()` or `slot` is out of range.
    fn element_at(&self, cursor: ClusterCursor, slot: usize) -> Option<usize>;
}

// ─── Views ──────────────────────────────────────────

/// One cluster bound to a lattice.
pub struct ClusterView<'a, S> {
    shape: &'a dyn ClusterShape,
    lattice: &'a Lattice<S>,
    cursor: ClusterCursor,
}

impl<'a, S> Clone for ClusterView<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S> Copy for ClusterView<'a, S> {}

impl<'a, S> ClusterView<'a, S> {
    pub(crate) fn new(
        shape: &'a dyn ClusterShape,
        lattice: &'a Lattice<S>,
        cursor: ClusterCursor,
    ) -> Self {
        Self {
            shape,
            lattice,
            cursor,
        }
    }

    pub fn cursor(&self) -> ClusterCursor {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.shape.n_elements()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn site_index(&self, slot: usize) -> Option<usize> {
        self.shape.element_at(self.cursor, slot)
    }

    pub fn get(&self, slot: usize) -> Option<&'a S> {
        let lattice = self.lattice;
        self.site_index(slot).map(|site| lattice.site(site))
    }

    /// Site values in slot order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a S> {
        let view = *self;
        (0..self.len()).map(move |slot| view.at(slot))
    }

    fn at(&self, slot: usize) -> &'a S {
        match self.get(slot) {
            Some(site) => site,
            None => panic!(
                "slot {slot} out of range for {} cluster of {} elements",
                self.shape.name(),
                self.len()
            ),
        }
    }
}

impl<'a, S> Index<usize> for ClusterView<'a, S> {
    type Output = S;

    fn index(&self, slot: usize) -> &S {
        self.at(slot)
    }
}

impl<'a, S: fmt::Debug> fmt::Debug for ClusterView<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterView")
            .field("shape", &self.shape.name())
            .field("cursor", &self.cursor)
            .field("sites", &(0..self.len()).map(|s| self.get(s)).collect::<Vec<_>>())
            .finish()
    }
}

// ─── Enumeration ────────────────────────────────────

/// Iterator over every cluster of a shape bound to a lattice.
///
/// Forward iteration follows `next` from `begin()`, backward iteration
/// follows `prev` from `end()`.
pub struct Clusters<'a, S> {
    shape: &'a dyn ClusterShape,
    lattice: &'a Lattice<S>,
    front: ClusterCursor,
    back: ClusterCursor,
    remaining: usize,
}

impl<'a, S> Clusters<'a, S> {
    pub(crate) fn new(shape: &'a dyn ClusterShape, lattice: &'a Lattice<S>) -> Self {
        Self {
            shape,
            lattice,
            front: shape.begin(),
            back: shape.end(),
            remaining: shape.size(),
        }
    }
}

impl<'a, S> Iterator for Clusters<'a, S> {
    type Item = ClusterView<'a, S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let view = ClusterView::new(self.shape, self.lattice, self.front);
        self.front = self.shape.next(self.front);
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, S> DoubleEndedIterator for Clusters<'a, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.back = self.shape.prev(self.back);
        Some(ClusterView::new(self.shape, self.lattice, self.back))
    }
}

impl<'a, S> ExactSizeIterator for Clusters<'a, S> {}

impl<'a, S> FusedIterator for Clusters<'a, S> {}
