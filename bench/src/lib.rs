//! Benchmark utilities for the Triki engine.
//!
//! Shared component types, a movement system, and world builders used by the Criterion
//! microbenchmarks in `benches/`.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p triki_bench
//!
//! # Run specific benchmark group
//! cargo bench -p triki_bench -- churn
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod components;
pub mod world;
