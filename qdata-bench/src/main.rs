// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! qdata Benchmarks and Validation
//!
//! Measures:
//! 1. Cluster enumeration throughput for every shape the lattice supports
//! 2. Feature sampling latency, unit and block mode
//! 3. Determinism: one worker vs the global pool
//! 4. Run files: sampling every configured phase point found in `data_dir`
//!
//! Usage: `qdata-bench [--pool <N>] [run-config.json]`

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use qdata_cluster::{ClusterKind, ClusterPolicy};
use qdata_engine::{PhasePoint, RunConfig, SamplingParams, Sampler, TrainingSet};
use qdata_lattice::{Lattice, SpinO3};

#[derive(Parser)]
#[command(name = "qdata-bench")]
#[command(version, about = "Cluster enumeration and feature sampling benchmarks")]
struct Cli {
    /// JSON run configuration; the quick pyrochlore preset when omitted
    config: Option<PathBuf>,

    /// Random configurations generated for the in-memory benchmarks
    #[arg(long, default_value_t = 256)]
    pool: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing subscriber")?;

    let config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading run config {}", path.display()))?,
        None => RunConfig::quick(),
    };
    config.validate().context("invalid run config")?;

    println!("=== qdata Benchmarks ===\n");
    println!(
        "lattice: {} L={} {:?}, cluster: {}, rank {} ({})\n",
        config.lattice.kind,
        config.lattice.length,
        config.lattice.boundary,
        config.features.cluster,
        config.features.rank,
        if config.features.symmetrized { "symmetrized" } else { "full" },
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let pool = config
        .source::<SpinO3>()
        .random_configurations(cli.pool, &mut rng)?;

    bench_cluster_enumeration(&config, &pool)?;
    bench_sampling(&config, &pool)?;
    validate_determinism(&config, &pool)?;

    println!("=== Run Files ===\n");
    sample_run_files(&config)?;

    println!("=== All benchmarks complete ===");
    Ok(())
}

// ─── Benchmarks ──────────────────────────────────

fn bench_cluster_enumeration(config: &RunConfig, pool: &[Lattice<SpinO3>]) -> Result<()> {
    println!("--- Cluster enumeration ({} configurations) ---", pool.len());
    let geometry = config.lattice.geometry()?;

    for kind in ClusterKind::all() {
        let policy = match ClusterPolicy::new(kind, &geometry) {
            Ok(policy) => policy,
            Err(e) => {
                println!("  {:<16} skipped: {e}", kind.to_string());
                continue;
            }
        };
        let start = Instant::now();
        let mut checksum = 0.0f64;
        let mut visited = 0usize;
        for lattice in pool {
            for view in policy.clusters(lattice)? {
                checksum += view.iter().map(|s| s.vector()[2]).sum::<f64>();
                visited += 1;
            }
        }
        let elapsed = start.elapsed();
        println!(
            "  {:<16} {:>6} clusters x {:>3} elements  {:>10.2?}  ({:.1} ns/cluster, checksum {checksum:.1})",
            kind.to_string(),
            policy.size(),
            policy.n_elements(),
            elapsed,
            elapsed.as_nanos() as f64 / visited.max(1) as f64,
        );
    }
    println!();
    Ok(())
}

fn bench_sampling(config: &RunConfig, pool: &[Lattice<SpinO3>]) -> Result<()> {
    println!("--- Feature sampling ---");
    for nc in [1, 4] {
        let sampler = Sampler::new(
            config.feature_map::<SpinO3>()?,
            SamplingParams {
                samples: pool.len(),
                nc,
                threads: config.sweep.threads,
            },
        )?;
        let mut set = TrainingSet::new(sampler.feature_map().size());
        let label = PhasePoint::from_temperature(1.0);

        let start = Instant::now();
        let appended = sampler.sample_config(pool, &label, &mut set)?;
        let elapsed = start.elapsed();
        println!(
            "  nc={}: {appended} samples of dimension {}  {:.2?}  ({:.1} us/configuration)",
            sampler.params().nc,
            set.dim(),
            elapsed,
            elapsed.as_secs_f64() * 1e6 / pool.len().max(1) as f64,
        );
    }
    println!();
    Ok(())
}

fn validate_determinism(config: &RunConfig, pool: &[Lattice<SpinO3>]) -> Result<()> {
    println!("--- Determinism: 1 worker vs global pool ---");
    let label = PhasePoint::from_temperature(1.0);
    let run = |threads: Option<usize>| -> Result<TrainingSet> {
        let params = SamplingParams {
            threads,
            ..config.sweep
        };
        let sampler = Sampler::new(config.feature_map::<SpinO3>()?, params)?;
        let mut set = TrainingSet::new(sampler.feature_map().size());
        sampler.sample_config(pool, &label, &mut set)?;
        Ok(set)
    };
    let single = run(Some(1))?;
    let global = run(None)?;
    if single != global {
        bail!("sampling with one worker differs from sampling on the global pool");
    }
    println!("  identical ({} samples)\n", single.len());
    Ok(())
}

fn sample_run_files(config: &RunConfig) -> Result<()> {
    if config.temperatures.is_empty() {
        println!("  no phase points configured\n");
        return Ok(());
    }
    let sampler = config.sampler::<SpinO3>()?;
    let mut source = config.source::<SpinO3>();
    let mut set = TrainingSet::new(sampler.feature_map().size());

    for point in config.phase_points() {
        let path = source.run_path(&point)?;
        if !path.exists() {
            warn!("{} not found, skipping phase point {}", path.display(), point);
            continue;
        }
        source.update_phase_point(&point)?;
        let appended = sampler.sample_source(&source, &mut set)?;
        info!("phase point {}: {} samples", point, appended);
    }
    println!("  {} samples collected from {}\n", set.len(), config.data_dir.display());
    Ok(())
}
