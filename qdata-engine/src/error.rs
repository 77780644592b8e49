// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Engine error types.
//!
//! [`ConfigError`] covers everything that can be rejected before any work is
//! done. [`DataError`] covers reading and mapping configurations.

use std::io;
use std::path::PathBuf;

use qdata_cluster::ClusterError;
use qdata_lattice::LatticeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error("block size nc must be at least 1")]
    ZeroBlock,

    #[error("feature rank must be at least 1")]
    ZeroRank,

    #[error("rank-{rank} feature space over {width} cluster components is too large")]
    FeatureOverflow { rank: usize, width: usize },

    #[error("worker thread count must be at least 1")]
    ZeroThreads,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("phase point {0:?} has no finite temperature")]
    PhasePoint(Vec<f64>),

    #[error("lattice length is unknown until a run file has been read")]
    UnknownLength,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid run configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: invalid outcome token '{token}'", path.display())]
    Token {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: unknown measurement outcome {outcome}", path.display())]
    Outcome {
        path: PathBuf,
        line: usize,
        outcome: i64,
    },

    #[error("{}:{line}: expected {expected} outcomes, found {found}", path.display())]
    LineLength {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}:{line}: {found} outcomes do not fill a {lattice} lattice", path.display())]
    LatticeShape {
        path: PathBuf,
        line: usize,
        lattice: String,
        found: usize,
    },

    #[error("{}: no configurations", path.display())]
    Empty { path: PathBuf },

    #[error("site has {got} components, feature map expects {expected}")]
    Components { expected: usize, got: usize },

    #[error("feature vector has dimension {got}, expected {expected}")]
    Dimension { expected: usize, got: usize },

    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error(transparent)]
    Cluster(ClusterError),
}
