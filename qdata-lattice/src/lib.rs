// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod error;
pub mod lattice;
pub mod site;

pub use error::LatticeError;
pub use lattice::{
    Bond, Boundary, Lattice, LatticeGeometry, LatticeKind, LatticeShape, Neighborhood, Position,
    Step,
};
pub use site::{Site, SpinO3};
