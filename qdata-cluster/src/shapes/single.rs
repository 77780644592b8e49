// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

use qdata_lattice::LatticeGeometry;

use crate::shape::{ClusterCursor, ClusterShape, ElementLayout};

/// Every site is its own one-element cluster, in canonical site order.
#[derive(Debug, Clone)]
pub struct SingleSite {
    sites: usize,
    layout: ElementLayout,
}

impl SingleSite {
    pub fn new(geometry: &LatticeGeometry) -> Self {
        Self {
            sites: geometry.num_sites(),
            layout: ElementLayout::new(vec![0]),
        }
    }
}

impl ClusterShape for SingleSite {
    fn name(&self) -> &'static str {
        "single"
    }

    fn layout(&self) -> &ElementLayout {
        &self.layout
    }

    fn size(&self) -> usize {
        self.sites
    }

    fn element_at(&self, cursor: ClusterCursor, slot: usize) -> Option<usize> {
        (slot == 0 && cursor.0 < self.sites).then_some(cursor.0)
    }
}
