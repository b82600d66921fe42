//! Report module: prints human-readable benchmark results and the
//! consistency verdict for each run.

use std::time::Duration;

/// Query kinds sampled per run.
pub const NUM_QUERIES: usize = 3;
pub const QUERY_NAMES: [&str; NUM_QUERIES] = ["bbox", "sphere/full-scan", "sphere/prefiltered"];

pub const BBOX: usize = 0;
pub const SPHERE_FULL: usize = 1;
pub const SPHERE_PREFILTERED: usize = 2;

/// Results from one benchmark run (one point count / radius pairing).
#[derive(Debug, Clone)]
pub struct RunResult {
    pub label: String,
    pub point_count: usize,
    pub radius: f64,
    pub batch_size: usize,
    pub generate: Duration,
    pub insert: Duration,
    /// Sampled latencies per query kind.
    pub query_samples: [Vec<Duration>; NUM_QUERIES],
    /// Hit count per query kind, from the last sample.
    pub hits: [usize; NUM_QUERIES],
}

impl RunResult {
    pub fn new(label: &str, point_count: usize, radius: f64, batch_size: usize) -> Self {
        Self {
            label: label.to_string(),
            point_count,
            radius,
            batch_size,
            generate: Duration::ZERO,
            insert: Duration::ZERO,
            query_samples: [Vec::new(), Vec::new(), Vec::new()],
            hits: [0; NUM_QUERIES],
        }
    }

    pub fn add_query_sample(&mut self, kind: usize, elapsed: Duration, hit_count: usize) {
        self.query_samples[kind].push(elapsed);
        self.hits[kind] = hit_count;
    }

    /// Mean query latency in microseconds.
    pub fn mean_us(&self, kind: usize) -> f64 {
        let samples = &self.query_samples[kind];
        if samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = samples.iter().map(|d| d.as_secs_f64() * 1e6).sum();
        sum / samples.len() as f64
    }

    pub fn percentile_us(&self, kind: usize, pct: f64) -> f64 {
        let samples = &self.query_samples[kind];
        if samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = samples.iter().map(|d| d.as_secs_f64() * 1e6).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let idx = ((pct / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Insert throughput in rows per second.
    pub fn insert_rows_per_sec(&self) -> f64 {
        let secs = self.insert.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.point_count as f64 / secs
    }

    /// Speedup of the prefiltered sphere query over the full scan.
    pub fn prefilter_speedup(&self) -> f64 {
        let pre = self.mean_us(SPHERE_PREFILTERED);
        if pre <= 0.0 {
            return 0.0;
        }
        self.mean_us(SPHERE_FULL) / pre
    }

    /// Both sphere strategies agree and the bbox candidate set covers them.
    pub fn consistent(&self) -> bool {
        self.hits[SPHERE_FULL] == self.hits[SPHERE_PREFILTERED]
            && self.hits[BBOX] >= self.hits[SPHERE_FULL]
    }
}

/// Print a formatted report comparing run results.
pub fn print_report(results: &[RunResult]) {
    println!("\n{}", "=".repeat(80));
    println!("  SQLite Spatial Query Benchmark Report");
    println!("{}", "=".repeat(80));

    for result in results {
        println!(
            "\n  Run: {} | points: {} | radius: {} | batch: {}",
            result.label, result.point_count, result.radius, result.batch_size
        );
        println!("  {}", "-".repeat(60));
        println!(
            "  Generate:        {:>10.0}µs  ({:.2}ms)",
            result.generate.as_secs_f64() * 1e6,
            result.generate.as_secs_f64() * 1e3
        );
        println!(
            "  Insert:          {:>10.0}µs  ({:.0} rows/s)",
            result.insert.as_secs_f64() * 1e6,
            result.insert_rows_per_sec()
        );

        println!("\n  Query latencies:");
        println!(
            "  {:24} {:>10} {:>10} {:>10} {:>10}",
            "Query", "Mean (µs)", "p50 (µs)", "p95 (µs)", "Hits"
        );
        println!("  {}", "-".repeat(68));
        for kind in 0..NUM_QUERIES {
            println!(
                "  {:24} {:>10.0} {:>10.0} {:>10.0} {:>10}",
                QUERY_NAMES[kind],
                result.mean_us(kind),
                result.percentile_us(kind, 50.0),
                result.percentile_us(kind, 95.0),
                result.hits[kind],
            );
        }

        println!(
            "\n  Prefilter speedup: {:.2}x over full scan",
            result.prefilter_speedup()
        );
        println!(
            "  Verdict:         {}",
            if result.consistent() { "OK" } else { "MISMATCH" }
        );
    }

    println!("\n{}", "=".repeat(80));

    // Comparison table
    if results.len() >= 2 {
        println!("\n  Comparison Summary:");
        println!(
            "  {:12} {:>12} {:>12} {:>12} {:>10} {:>6}",
            "Run", "Bbox (µs)", "Full (µs)", "Pre (µs)", "Speedup", "OK?"
        );
        println!("  {}", "-".repeat(70));
        for r in results {
            println!(
                "  {:12} {:>12.0} {:>12.0} {:>12.0} {:>9.2}x {:>6}",
                r.label,
                r.mean_us(BBOX),
                r.mean_us(SPHERE_FULL),
                r.mean_us(SPHERE_PREFILTERED),
                r.prefilter_speedup(),
                if r.consistent() { "YES" } else { "NO" }
            );
        }
    }

    println!();
}
