// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod error;
pub mod kind;
pub mod policy;
pub mod shape;
pub mod shapes;

pub use error::ClusterError;
pub use kind::{ClusterKind, MULTICELL_SIZES};
pub use policy::ClusterPolicy;
pub use shape::{ClusterCursor, ClusterShape, ClusterView, Clusters, ElementLayout};
