//! SQLite Spatial Query Benchmark
//!
//! Loads large sets of random 3D points into SQLite (`:memory:` by default)
//! behind a composite `(x, y, z)` index and compares two ways of answering
//! "which points lie within radius r of a center":
//!
//! - **Full scan**: the exact squared-distance predicate runs over every
//!   stored row inside SQL
//! - **Prefiltered**: an index-backed bounding-box range query shrinks the
//!   candidate set first, then the exact distance test filters the candidates
//!
//! Both strategies must return the same set for any center and radius; the
//! report prints a consistency verdict alongside the timings.
//!
//! Run benchmarks: `cargo bench`
//! Run tests: `cargo test`

pub mod error;
pub mod generate;
pub mod query;
pub mod report;
pub mod store;
