// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

pub mod anchored;
pub mod multicell;
pub mod single;

pub use anchored::AnchoredCluster;
pub use multicell::MultiCell;
pub use single::SingleSite;
