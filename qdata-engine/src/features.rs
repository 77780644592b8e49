// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Rank-n cluster monomials.
//!
//! A cluster of `K` elements with `C` components per site flattens to the
//! vector `v_j`, `j = slot·C + component`. Feature `(j1, …, jn)` is the
//! average over every cluster of the lattice of `v_j1 · … · v_jn`.
//!
//! Unsymmetrized maps keep every ordered tuple, `(KC)^n` features.
//! Symmetrized maps identify tuples that differ by a permutation and keep the
//! non-decreasing ones, `C(KC + n - 1, n)` features. Either way the tuples are
//! listed in lexicographic order.

use qdata_cluster::ClusterPolicy;
use qdata_lattice::{Lattice, Site};

use crate::error::{ConfigError, DataError, Result};

/// Upper bound on the number of features a map may produce.
pub const MAX_FEATURES: usize = 1 << 24;

#[derive(Debug)]
pub struct FeatureMap {
    policy: ClusterPolicy,
    components: usize,
    rank: usize,
    symmetrized: bool,
    size: usize,
    /// `size × rank` flat indices, one tuple per feature.
    terms: Vec<usize>,
}

impl FeatureMap {
    pub fn new(
        policy: ClusterPolicy,
        components: usize,
        rank: usize,
        symmetrized: bool,
    ) -> Result<Self> {
        if rank == 0 {
            return Err(ConfigError::ZeroRank.into());
        }
        let width = policy.n_elements() * components;
        let overflow = ConfigError::FeatureOverflow { rank, width };
        let size = if symmetrized {
            multiset_count(width, rank)
        } else {
            u32::try_from(rank).ok().and_then(|n| width.checked_pow(n))
        }
        .filter(|&n| n <= MAX_FEATURES)
        .ok_or(overflow)?;

        let terms = enumerate_terms(width, rank, symmetrized, size);
        debug_assert_eq!(terms.len(), size * rank);

        Ok(Self {
            policy,
            components,
            rank,
            symmetrized,
            size,
            terms,
        })
    }

    /// Map for site type `S`, taking the component count from the type.
    pub fn for_site<S: Site>(policy: ClusterPolicy, rank: usize, symmetrized: bool) -> Result<Self> {
        Self::new(policy, S::COMPONENTS, rank, symmetrized)
    }

    /// Number of features.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn symmetrized(&self) -> bool {
        self.symmetrized
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn policy(&self) -> &ClusterPolicy {
        &self.policy
    }

    /// The `(slot, component)` factors of feature `k`.
    pub fn term(&self, k: usize) -> Option<Vec<(usize, usize)>> {
        let tuple = self.terms.chunks_exact(self.rank).nth(k)?;
        Some(
            tuple
                .iter()
                .map(|&j| (j / self.components, j % self.components))
                .collect(),
        )
    }

    pub fn configuration<S: Site>(&self, lattice: &Lattice<S>) -> Result<Vec<f64>> {
        let mut out = vec![0.0; self.size];
        self.configuration_into(lattice, &mut out)?;
        Ok(out)
    }

    /// Like [`configuration`](Self::configuration), writing into `out`.
    pub fn configuration_into<S: Site>(&self, lattice: &Lattice<S>, out: &mut [f64]) -> Result<()> {
        if out.len() != self.size {
            return Err(DataError::Dimension {
                expected: self.size,
                got: out.len(),
            }
            .into());
        }
        let clusters = self.policy.clusters(lattice).map_err(DataError::Cluster)?;
        let n_clusters = clusters.len();
        out.fill(0.0);

        let mut flat = vec![0.0; self.policy.n_elements() * self.components];
        for view in clusters {
            for (slot, site) in view.iter().enumerate() {
                let values = site.components();
                if values.len() != self.components {
                    return Err(DataError::Components {
                        expected: self.components,
                        got: values.len(),
                    }
                    .into());
                }
                let at = slot * self.components;
                flat[at..at + self.components].copy_from_slice(values);
            }
            for (feature, tuple) in out.iter_mut().zip(self.terms.chunks_exact(self.rank)) {
                *feature += tuple.iter().map(|&j| flat[j]).product::<f64>();
            }
        }

        if n_clusters > 0 {
            let norm = 1.0 / n_clusters as f64;
            out.iter_mut().for_each(|x| *x *= norm);
        }
        Ok(())
    }
}

/// `C(width + rank - 1, rank)`, `None` on overflow.
fn multiset_count(width: usize, rank: usize) -> Option<usize> {
    if width == 0 {
        return Some(0);
    }
    let n = width.checked_add(rank - 1)?;
    let mut acc: usize = 1;
    // acc = C(n - rank + i, i) after step i, always integral
    for i in 1..=rank {
        acc = acc.checked_mul(n - rank + i)? / i;
    }
    Some(acc)
}

fn enumerate_terms(width: usize, rank: usize, symmetrized: bool, size: usize) -> Vec<usize> {
    let mut terms = Vec::with_capacity(size * rank);
    if width == 0 {
        return terms;
    }
    let mut tuple = vec![0usize; rank];
    loop {
        terms.extend_from_slice(&tuple);
        let Some(i) = tuple.iter().rposition(|&j| j + 1 < width) else {
            break;
        };
        tuple[i] += 1;
        let reset = if symmetrized { tuple[i] } else { 0 };
        tuple[i + 1..].iter_mut().for_each(|j| *j = reset);
    }
    terms
}
