// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

use thiserror::Error;

/// Errors raised while building a lattice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    #[error("lattice linear length must be at least 1")]
    ZeroLength,

    #[error("unit cell must hold at least one basis site")]
    ZeroBasis,

    #[error("lattice of {dimension} axes with length {length} and {n_basis} basis sites overflows the address space")]
    TooLarge {
        dimension: usize,
        length: usize,
        n_basis: usize,
    },

    #[error("expected {expected} site values, got {got}")]
    SiteCount { expected: usize, got: usize },

    #[error("unknown lattice '{0}'")]
    UnknownKind(String),
}
