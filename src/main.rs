//! Standalone benchmark runner that loads random 3D points into in-memory
//! SQLite and prints the formatted query comparison report.
//!
//! Usage:
//!   cargo run --release                   # quick demo run + backup
//!   cargo run --release -- --benchmark    # standard benchmark
//!   cargo run --release -- --sweep        # point-count × radius sweep

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use spatial_bench::generate::{generate_uniform, Bounds, Point, DEFAULT_SEED};
use spatial_bench::query::{BoundingBox, FullScan, Prefiltered, SphereStrategy};
use spatial_bench::report::{print_report, RunResult, BBOX, SPHERE_FULL, SPHERE_PREFILTERED};
use spatial_bench::store::{PointStore, DEFAULT_BATCH_SIZE};
use std::path::{Path, PathBuf};
use std::time::Instant;

const WARMUP_QUERIES: u32 = 2;
const SAMPLE_QUERIES: u32 = 10;

#[derive(Parser, Debug)]
#[command(name = "spatial-bench", about = "3D point storage and query demo/benchmark.")]
struct Args {
    /// Run the standard benchmark instead of the simple demo.
    #[arg(short, long)]
    benchmark: bool,

    /// Run a sweep of benchmarks with different point counts and radii.
    #[arg(short, long)]
    sweep: bool,

    /// Where the demo writes its database backup.
    #[arg(long, default_value = "points_backup.db")]
    backup: PathBuf,
}

/// One benchmark configuration: how many points to load and how to query them.
#[derive(Debug, Clone)]
struct BenchConfig {
    label: String,
    point_count: usize,
    batch_size: usize,
    bounds: Bounds,
    center: Point,
    radius: f64,
    seed: u64,
}

impl BenchConfig {
    fn with_size(point_count: usize, radius: f64) -> Result<Self> {
        Ok(Self {
            label: format!("{}/r{}", size_label(point_count), radius),
            point_count,
            batch_size: DEFAULT_BATCH_SIZE,
            bounds: Bounds::new(0.0, 100.0)?,
            center: Point::new(50.0, 50.0, 50.0),
            radius,
            seed: DEFAULT_SEED,
        })
    }

    /// Standard run: 1M points in [0,100)³, radius 5 around the volume center.
    fn standard() -> Result<Self> {
        Self::with_size(1_000_000, 5.0)
    }

    /// The sweep grid, from the standard load up to 10M points.
    fn sweep() -> Result<Vec<Self>> {
        let mut configs = Vec::new();
        for &count in &[1_000_000usize, 5_000_000, 10_000_000] {
            for &radius in &[5.0f64, 10.0, 20.0] {
                configs.push(Self::with_size(count, radius)?);
            }
        }
        Ok(configs)
    }
}

fn size_label(count: usize) -> String {
    if count >= 1_000_000 && count % 1_000_000 == 0 {
        format!("{}M", count / 1_000_000)
    } else if count >= 1_000 && count % 1_000 == 0 {
        format!("{}k", count / 1_000)
    } else {
        count.to_string()
    }
}

/// Run the LOAD and QUERY phases for one configuration and collect timings.
fn run_benchmark(cfg: &BenchConfig) -> Result<RunResult> {
    let mut result = RunResult::new(&cfg.label, cfg.point_count, cfg.radius, cfg.batch_size);

    let start = Instant::now();
    let points = generate_uniform(cfg.point_count, cfg.bounds, cfg.seed);
    result.generate = start.elapsed();

    let mut store = PointStore::open_in_memory()?;
    store.create_schema()?;

    let start = Instant::now();
    let inserted = store.insert_batch(&points, cfg.batch_size)?;
    result.insert = start.elapsed();
    ensure!(
        inserted == cfg.point_count,
        "expected {} committed rows, got {}",
        cfg.point_count,
        inserted
    );

    // Warmup pulls the working set into the page cache before sampling.
    let bbox = BoundingBox::around(cfg.center, cfg.radius)?;
    for _ in 0..WARMUP_QUERIES {
        store.query_bbox(&bbox)?;
    }
    for _ in 0..SAMPLE_QUERIES {
        let start = Instant::now();
        let rows = store.query_bbox(&bbox)?;
        result.add_query_sample(BBOX, start.elapsed(), rows.len());
    }

    let full = FullScan::new();
    let prefiltered = Prefiltered::new();
    let strategies: [(usize, &dyn SphereStrategy); 2] =
        [(SPHERE_FULL, &full), (SPHERE_PREFILTERED, &prefiltered)];

    for (kind, strategy) in strategies {
        for _ in 0..WARMUP_QUERIES {
            strategy.query(&store, cfg.center, cfg.radius)?;
        }
        for _ in 0..SAMPLE_QUERIES {
            let start = Instant::now();
            let rows = strategy.query(&store, cfg.center, cfg.radius)?;
            result.add_query_sample(kind, start.elapsed(), rows.len());
        }
    }

    Ok(result)
}

/// Run each configuration in turn and print one combined report.
///
/// A failed run still reports whatever completed before it, then aborts.
fn run_suite(configs: Vec<BenchConfig>) -> Result<()> {
    let mut results = Vec::new();
    for cfg in &configs {
        log::info!("Benchmarking {} (batch={})", cfg.label, cfg.batch_size);
        match run_benchmark(cfg) {
            Ok(r) => {
                log::info!(
                    "{} done: {} bbox hits, {} sphere hits",
                    cfg.label,
                    r.hits[BBOX],
                    r.hits[SPHERE_FULL]
                );
                results.push(r);
            }
            Err(e) => {
                print_report(&results);
                return Err(e).with_context(|| format!("benchmark {} failed", cfg.label));
            }
        }
    }
    print_report(&results);
    Ok(())
}

/// Single-shot run that prints sample rows and exports a backup.
fn run_demo(backup_path: &Path) -> Result<()> {
    let start = Instant::now();
    let cfg = BenchConfig::standard()?;
    log::info!("Demo run: {} points, radius {}", cfg.point_count, cfg.radius);

    let points = generate_uniform(cfg.point_count, cfg.bounds, cfg.seed);
    let mut store = PointStore::open_in_memory()?;
    store.create_schema()?;
    store.insert_batch(&points, cfg.batch_size)?;

    let bbox = BoundingBox::around(cfg.center, cfg.radius)?;
    let bbox_rows = store.query_bbox(&bbox)?;
    let sphere_rows = Prefiltered::new().query(&store, cfg.center, cfg.radius)?;

    for p in bbox_rows.iter().take(10) {
        println!("BBox:   ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    }
    for p in sphere_rows.iter().take(10) {
        println!("Sphere: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    }
    log::info!(
        "{} bbox hits, {} sphere hits",
        bbox_rows.len(),
        sphere_rows.len()
    );

    store
        .backup_to(backup_path)
        .with_context(|| format!("backup to {}", backup_path.display()))?;
    log::info!("Backed up store to {}", backup_path.display());

    println!("Total time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

fn initialize_logger() -> Result<()> {
    const LOGGING_PATTERN: &str = "{d} {l} - {m}\n";

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;

    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logger().context("initialize logger")?;

    if args.sweep {
        run_suite(BenchConfig::sweep()?)
    } else if args.benchmark {
        run_suite(vec![BenchConfig::standard()?])
    } else {
        run_demo(&args.backup)
    }
}
