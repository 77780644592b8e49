// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

use thiserror::Error;

/// Errors raised while building or binding a cluster policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("lattice dimension must be non-zero")]
    ZeroDimension,

    #[error("unknown cluster '{0}'")]
    UnknownCluster(String),

    #[error("{cluster} cluster: {reason}")]
    UnsupportedLattice {
        cluster: &'static str,
        reason: String,
    },

    #[error("multicell cluster: window of {lin_l} cells is incompatible with linear length {length}")]
    Window { lin_l: usize, length: usize },

    #[error("lattice geometry ({got}) differs from the geometry the cluster policy was built for ({expected})")]
    GeometryMismatch { expected: String, got: String },
}
