// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Measurement records on disk.
//!
//! Each phase point has one run file `Run_<n>.txt` in the data directory,
//! `n` being the temperature rounded half up. Every non-blank line is one
//! configuration: whitespace-separated measurement outcomes, one per site,
//! in canonical site order. The lattice length is inferred from the first
//! line unless it was fixed up front.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use qdata_lattice::{Boundary, Lattice, LatticeKind, Site};
use rand::Rng;
use tracing::{info, warn};

use crate::error::{ConfigError, DataError, Result};
use crate::phase_point::PhasePoint;

#[derive(Debug)]
pub struct ConfigurationSource<S> {
    data_dir: PathBuf,
    kind: LatticeKind,
    boundary: Boundary,
    fixed_length: Option<usize>,
    length: Option<usize>,
    phase_point: Option<PhasePoint>,
    pool: Vec<Lattice<S>>,
}

impl<S: Site> ConfigurationSource<S> {
    pub fn new(data_dir: impl Into<PathBuf>, kind: LatticeKind, boundary: Boundary) -> Self {
        Self {
            data_dir: data_dir.into(),
            kind,
            boundary,
            fixed_length: None,
            length: None,
            phase_point: None,
            pool: Vec::new(),
        }
    }

    /// Fix the lattice length instead of inferring it. Run files must then
    /// hold exactly `n_basis · L^D` outcomes per line.
    pub fn with_length(mut self, length: usize) -> Self {
        self.fixed_length = Some(length);
        self.length = Some(length);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn kind(&self) -> LatticeKind {
        self.kind
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Lattice length, fixed or inferred from the last run file.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    pub fn phase_point(&self) -> Option<&PhasePoint> {
        self.phase_point.as_ref()
    }

    pub fn pool(&self) -> &[Lattice<S>] {
        &self.pool
    }

    pub fn run_path(&self, point: &PhasePoint) -> Result<PathBuf> {
        Ok(self.data_dir.join(format!("Run_{}.txt", point.run_index()?)))
    }

    /// Load the run file for `point` and replace the pool.
    ///
    /// Returns `false` without touching the disk when `point` is the current
    /// phase point. On error the pool and phase point are left unchanged.
    pub fn update_phase_point(&mut self, point: &PhasePoint) -> Result<bool> {
        if self.phase_point.as_ref() == Some(point) {
            return Ok(false);
        }
        let path = self.run_path(point)?;
        let (length, pool) = self.read_run(&path)?;
        info!(
            "loaded {} configurations (L={}) for phase point {} from {}",
            pool.len(),
            length,
            point,
            path.display()
        );
        self.length = Some(length);
        self.pool = pool;
        self.phase_point = Some(point.clone());
        Ok(true)
    }

    /// `n` configurations of independent random sites at the current length.
    pub fn random_configurations<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<Lattice<S>>> {
        let length = self.length.ok_or(ConfigError::UnknownLength)?;
        let mut pool = Vec::with_capacity(n);
        for _ in 0..n {
            let lattice = Lattice::new(self.kind, length, self.boundary, || S::random(&mut *rng))
                .map_err(ConfigError::from)?;
            pool.push(lattice);
        }
        Ok(pool)
    }

    fn read_run(&self, path: &Path) -> Result<(usize, Vec<Lattice<S>>)> {
        let io_error = |source: std::io::Error| DataError::Io {
            path: path.to_path_buf(),
            source,
        };
        let reader = BufReader::new(File::open(path).map_err(io_error)?);

        let mut length = self.fixed_length;
        let mut pool = Vec::new();
        let mut blank = 0usize;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(io_error)?;
            if line.trim().is_empty() {
                blank += 1;
                continue;
            }
            let sites = parse_line::<S>(&line, path, line_no)?;

            let l = match length {
                Some(l) => l,
                None => {
                    let l = infer_length(self.kind, sites.len()).ok_or_else(|| DataError::LatticeShape {
                        path: path.to_path_buf(),
                        line: line_no,
                        lattice: self.kind.to_string(),
                        found: sites.len(),
                    })?;
                    length = Some(l);
                    l
                }
            };
            let expected = self.kind.geometry(l, self.boundary).map_err(DataError::from)?.num_sites();
            if sites.len() != expected {
                return Err(DataError::LineLength {
                    path: path.to_path_buf(),
                    line: line_no,
                    expected,
                    found: sites.len(),
                }
                .into());
            }
            pool.push(Lattice::from_sites(self.kind, l, self.boundary, sites).map_err(DataError::from)?);
        }

        if blank > 0 {
            warn!("{}: skipped {} blank lines", path.display(), blank);
        }
        match length {
            Some(l) if !pool.is_empty() => Ok((l, pool)),
            _ => Err(DataError::Empty {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}

fn parse_line<S: Site>(line: &str, path: &Path, line_no: usize) -> Result<Vec<S>> {
    line.split_whitespace()
        .map(|token| -> Result<S> {
            let outcome = parse_outcome(token).ok_or_else(|| DataError::Token {
                path: path.to_path_buf(),
                line: line_no,
                token: token.to_string(),
            })?;
            S::from_outcome(outcome).ok_or_else(|| {
                DataError::Outcome {
                    path: path.to_path_buf(),
                    line: line_no,
                    outcome,
                }
                .into()
            })
        })
        .collect()
}

/// Outcomes are integers, possibly written as integral floats (`4.0`).
fn parse_outcome(token: &str) -> Option<i64> {
    token.parse::<i64>().ok().or_else(|| {
        token
            .parse::<f64>()
            .ok()
            .filter(|x| x.fract() == 0.0 && x.abs() < i64::MAX as f64)
            .map(|x| x as i64)
    })
}

/// `L` with `n_basis · L^D == n_sites`, if any.
fn infer_length(kind: LatticeKind, n_sites: usize) -> Option<usize> {
    let n_basis = kind.n_basis();
    if n_sites == 0 || n_sites % n_basis != 0 {
        return None;
    }
    let cells = n_sites / n_basis;
    let dim = kind.dimension() as u32;
    let guess = (cells as f64).powf(1.0 / dim as f64).round() as usize;
    (guess.saturating_sub(1)..=guess + 1)
        .filter(|&l| l > 0)
        .find(|&l| l.checked_pow(dim) == Some(cells))
}
