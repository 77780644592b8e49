// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! End-to-end sampling: run files on disk → configuration pool → cluster
//! features → training set.
//!
//! Run with: `cargo test -p qdata-engine --test sampling`

use std::fs;
use std::path::Path;

use qdata_cluster::{ClusterKind, ClusterPolicy};
use qdata_engine::{
    ConfigurationSource, DataError, EngineError, FeatureMap, PhasePoint, RunConfig, Sampler,
    SamplingParams, TrainingSet,
};
use qdata_lattice::{Boundary, Lattice, LatticeKind, Site, SpinO3};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ═══════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════

fn star_map() -> FeatureMap {
    let geometry = LatticeKind::Pyrochlore.geometry(2, Boundary::Periodic).unwrap();
    let policy = ClusterPolicy::new(ClusterKind::Star, &geometry).unwrap();
    FeatureMap::for_site::<SpinO3>(policy, 2, true).unwrap()
}

fn random_pool(n: usize, seed: u64) -> Vec<Lattice<SpinO3>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Lattice::new(LatticeKind::Pyrochlore, 2, Boundary::Periodic, || SpinO3::random(&mut rng))
                .unwrap()
        })
        .collect()
}

fn sampler(nc: usize, threads: Option<usize>) -> Sampler {
    Sampler::new(
        star_map(),
        SamplingParams {
            samples: 1000,
            nc,
            threads,
        },
    )
    .unwrap()
}

/// Write a run file for a square lattice: one line of outcomes per row.
fn write_run(dir: &Path, index: i64, lines: &[&str]) {
    fs::write(dir.join(format!("Run_{index}.txt")), lines.join("\n")).unwrap();
}

fn sorted_bits(set: &TrainingSet) -> Vec<(Vec<u64>, Vec<u64>)> {
    let mut out: Vec<_> = set
        .iter()
        .map(|s| {
            (
                s.label.coords.iter().map(|x| x.to_bits()).collect(),
                s.features.iter().map(|x| x.to_bits()).collect(),
            )
        })
        .collect();
    out.sort();
    out
}

// ═══════════════════════════════════════════════════════════
// Sampler
// ═══════════════════════════════════════════════════════════

#[test]
fn test_block_mode_drops_incomplete_run() {
    let pool = random_pool(10, 1);
    let mut set = TrainingSet::new(star_map().size());
    let label = PhasePoint::from_temperature(1.0);
    let appended = sampler(3, None).sample_config(&pool, &label, &mut set).unwrap();
    assert_eq!(appended, 3);
    assert_eq!(set.len(), 3);
}

#[test]
fn test_result_independent_of_worker_count() {
    let pool = random_pool(40, 2);
    let label = PhasePoint::new(vec![2.5, 0.1]);
    for nc in [1, 4] {
        let mut single = TrainingSet::new(star_map().size());
        let mut many = TrainingSet::new(star_map().size());
        sampler(nc, Some(1)).sample_config(&pool, &label, &mut single).unwrap();
        sampler(nc, Some(4)).sample_config(&pool, &label, &mut many).unwrap();
        assert_eq!(single.len(), 40 / nc);
        assert_eq!(sorted_bits(&single), sorted_bits(&many));
    }
}

#[test]
fn test_block_sample_is_mean_of_unit_samples() {
    let pool = random_pool(6, 3);
    let label = PhasePoint::from_temperature(0.5);
    let mut unit = TrainingSet::new(star_map().size());
    let mut block = TrainingSet::new(star_map().size());
    sampler(1, None).sample_config(&pool, &label, &mut unit).unwrap();
    sampler(3, None).sample_config(&pool, &label, &mut block).unwrap();

    for (b, chunk) in block.iter().zip(unit.samples().chunks(3)) {
        for (k, &value) in b.features.iter().enumerate() {
            let mean = chunk.iter().map(|s| s.features[k]).sum::<f64>() / 3.0;
            assert!((value - mean).abs() < 1e-12);
        }
    }
}

#[test]
fn test_sampling_accumulates_across_phase_points() {
    let s = sampler(1, None);
    let mut set = TrainingSet::new(s.feature_map().size());
    for (i, t) in [1.0, 2.0].into_iter().enumerate() {
        let pool = random_pool(5, 10 + i as u64);
        s.sample_config(&pool, &PhasePoint::from_temperature(t), &mut set).unwrap();
    }
    assert_eq!(set.len(), 10);
    let handed = set.surrender();
    assert_eq!(handed.len(), 10);
    assert!(set.is_empty());
}

// ═══════════════════════════════════════════════════════════
// Configuration source
// ═══════════════════════════════════════════════════════════

#[test]
fn test_source_reads_run_file() {
    let dir = tempfile::tempdir().unwrap();
    // 2x2 square lattice, Pauli-6 outcomes
    write_run(dir.path(), 2, &["0 1 2 3", "4 5 4 5", "", "0 0 0 0"]);

    let mut source = ConfigurationSource::<SpinO3>::new(dir.path(), LatticeKind::Square, Boundary::Periodic);
    assert!(source.update_phase_point(&PhasePoint::from_temperature(1.6)).unwrap());
    assert_eq!(source.length(), Some(2));
    assert_eq!(source.pool().len(), 3);
    assert_eq!(source.pool()[0].site(3).vector(), [0.0, -1.0, 0.0]);
    assert_eq!(source.pool()[1].site(0).vector(), [0.0, 0.0, 1.0]);

    // same point: nothing re-read, even if the file changes underneath
    write_run(dir.path(), 2, &["0 0 0 0"]);
    assert!(!source.update_phase_point(&PhasePoint::from_temperature(1.6)).unwrap());
    assert_eq!(source.pool().len(), 3);
}

#[test]
fn test_source_rejects_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), 1, &["0 1 2 3"]);
    write_run(dir.path(), 2, &["0 1 2 3", "0 1 2"]);
    write_run(dir.path(), 3, &["0 1 x 3"]);
    write_run(dir.path(), 4, &["0 1 9 3"]);
    write_run(dir.path(), 5, &["0 1 2"]);

    let mut source = ConfigurationSource::<SpinO3>::new(dir.path(), LatticeKind::Square, Boundary::Periodic);
    source.update_phase_point(&PhasePoint::from_temperature(1.0)).unwrap();

    let err = |source: &mut ConfigurationSource<SpinO3>, t: f64| {
        source
            .update_phase_point(&PhasePoint::from_temperature(t))
            .unwrap_err()
    };
    assert!(matches!(
        err(&mut source, 2.0),
        EngineError::Data(DataError::LineLength { line: 2, expected: 4, found: 3, .. })
    ));
    assert!(matches!(
        err(&mut source, 3.0),
        EngineError::Data(DataError::Token { line: 1, .. })
    ));
    assert!(matches!(
        err(&mut source, 4.0),
        EngineError::Data(DataError::Outcome { outcome: 9, .. })
    ));
    assert!(matches!(
        err(&mut source, 5.0),
        EngineError::Data(DataError::LatticeShape { found: 3, .. })
    ));
    assert!(matches!(
        err(&mut source, 6.0),
        EngineError::Data(DataError::Io { .. })
    ));

    // failures leave the previous pool in place
    assert_eq!(source.phase_point(), Some(&PhasePoint::from_temperature(1.0)));
    assert_eq!(source.pool().len(), 1);
}

#[test]
fn test_source_with_fixed_length() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), 1, &["0 1 2 3"]);
    let mut source = ConfigurationSource::<SpinO3>::new(dir.path(), LatticeKind::Square, Boundary::Periodic)
        .with_length(3);
    assert!(matches!(
        source.update_phase_point(&PhasePoint::from_temperature(1.0)),
        Err(EngineError::Data(DataError::LineLength { expected: 9, found: 4, .. }))
    ));
}

#[test]
fn test_sample_source() {
    let dir = tempfile::tempdir().unwrap();
    write_run(dir.path(), 1, &["4 4 4 4", "5 5 5 5", "4 5 4 5"]);

    let geometry = LatticeKind::Square.geometry(2, Boundary::Periodic).unwrap();
    let policy = ClusterPolicy::new(ClusterKind::Single, &geometry).unwrap();
    let map = FeatureMap::for_site::<SpinO3>(policy, 1, true).unwrap();
    let s = Sampler::new(map, SamplingParams::default()).unwrap();
    let mut set = TrainingSet::new(3);

    let mut source = ConfigurationSource::<SpinO3>::new(dir.path(), LatticeKind::Square, Boundary::Periodic);
    assert_eq!(s.sample_source(&source, &mut set).unwrap(), 0);

    source.update_phase_point(&PhasePoint::from_temperature(1.0)).unwrap();
    assert_eq!(s.sample_source(&source, &mut set).unwrap(), 3);
    let z: Vec<f64> = set.iter().map(|sample| sample.features[2]).collect();
    assert_eq!(z, vec![1.0, -1.0, 0.0]);
}

#[test]
fn test_run_config_drives_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = RunConfig::quick();
    config.data_dir = dir.path().to_path_buf();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let source = config.source::<SpinO3>();
    let pool = source.random_configurations(12, &mut rng).unwrap();
    let s = config.sampler::<SpinO3>().unwrap();
    let mut set = TrainingSet::new(s.feature_map().size());
    for point in config.phase_points() {
        s.sample_config(&pool, &point, &mut set).unwrap();
    }
    assert_eq!(set.len(), 12 * config.temperatures.len());
}
