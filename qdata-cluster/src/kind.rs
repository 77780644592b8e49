// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Cluster selector.
//!
//! Names follow the run-configuration vocabulary: `single`, `lattice` (one
//! unit cell), `plaquette`, `star`, `fish`, `twocell_overlap`, and `Ncell` for
//! the supported window sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClusterError;

/// Window sizes accepted by the `Ncell` selector.
pub const MULTICELL_SIZES: [usize; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClusterKind {
    Single,
    #[default]
    UnitCell,
    Plaquette,
    Star,
    Fish,
    TwoCellOverlap,
    /// Sliding window of `lin_l` cells along every axis.
    MultiCell(usize),
}

impl ClusterKind {
    pub fn multicell(lin_l: usize) -> Result<Self, ClusterError> {
        if MULTICELL_SIZES.contains(&lin_l) {
            Ok(Self::MultiCell(lin_l))
        } else {
            Err(ClusterError::UnknownCluster(format!("{lin_l}cell")))
        }
    }

    /// Every selectable cluster.
    pub fn all() -> Vec<ClusterKind> {
        let mut kinds = vec![
            ClusterKind::Single,
            ClusterKind::UnitCell,
            ClusterKind::Plaquette,
            ClusterKind::Star,
            ClusterKind::Fish,
            ClusterKind::TwoCellOverlap,
        ];
        kinds.extend(MULTICELL_SIZES.iter().map(|&n| ClusterKind::MultiCell(n)));
        kinds
    }
}

impl fmt::Display for ClusterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterKind::Single => f.write_str("single"),
            ClusterKind::UnitCell => f.write_str("lattice"),
            ClusterKind::Plaquette => f.write_str("plaquette"),
            ClusterKind::Star => f.write_str("star"),
            ClusterKind::Fish => f.write_str("fish"),
            ClusterKind::TwoCellOverlap => f.write_str("twocell_overlap"),
            ClusterKind::MultiCell(n) => write!(f, "{n}cell"),
        }
    }
}

impl FromStr for ClusterKind {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(ClusterKind::Single),
            "lattice" => Ok(ClusterKind::UnitCell),
            "plaquette" => Ok(ClusterKind::Plaquette),
            "star" => Ok(ClusterKind::Star),
            "fish" => Ok(ClusterKind::Fish),
            "twocell_overlap" => Ok(ClusterKind::TwoCellOverlap),
            _ => s
                .strip_suffix("cell")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| MULTICELL_SIZES.contains(n))
                .map(ClusterKind::MultiCell)
                .ok_or_else(|| ClusterError::UnknownCluster(s.to_string())),
        }
    }
}

impl TryFrom<String> for ClusterKind {
    type Error = ClusterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClusterKind> for String {
    fn from(kind: ClusterKind) -> Self {
        kind.to_string()
    }
}
