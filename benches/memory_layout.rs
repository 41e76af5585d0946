//! Memory Layout Benchmarks under Fixed-Width SIMD
//!
//! Runs the Cartesian-to-polar conversion for every registered combination of
//! vector type, storage layout, access strategy and tail policy.
//!
//! # Benchmark Categories
//!
//! ## 1. **Layouts**
//! - AoS: interleaved `(x, y)` records
//! - SoA: one array per field
//! - AoVS: one register of `x` and one of `y` per block
//! - Baseline: a single in-register block, isolating the conversion cost
//!
//! ## 2. **Memory Hierarchy Analysis**
//! - L1 Cache: 8 KiB inputs (raw compute performance)
//! - L2 Cache: 128 KiB inputs (L1→L2 transition)
//! - L3 Cache: 2-8 MiB inputs
//!
//! Set `LAYOUTBENCH_FILTER` to restrict the run to names containing a
//! substring, e.g. `LAYOUTBENCH_FILTER=/SoA/`.

use std::time::Instant;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use layoutbench::config::{format_size, DEFAULT_SEED};
use layoutbench::registry::{all_benchmarks, filter};

// ================================================================================================
// BENCHMARK CONFIGURATION
// ================================================================================================

/// Input sizes in elements, one per cache level.
///
/// 13 is deliberately not a multiple of any vector width so both tail
/// policies do real work.
const INPUT_SIZES: &[usize] = &[
    13,        // tail handling
    1_024,     // 8 KiB of f32 input - L1 cache
    16_384,    // 128 KiB - L1→L2 transition
    262_144,   // 2 MiB - L2/L3
    1_048_576, // 8 MiB - L3 cache
];

// ================================================================================================
// BENCHMARKS
// ================================================================================================

fn benchmark_memory_layouts(c: &mut Criterion) {
    let pattern = std::env::var("LAYOUTBENCH_FILTER").ok();
    let descriptors = match filter(all_benchmarks(), pattern.as_deref()) {
        Ok(descriptors) => descriptors,
        Err(err) => {
            eprintln!("⚠️  {err}");
            return;
        }
    };

    for &size in INPUT_SIZES {
        let mut group = c.benchmark_group(format!("Polar {}", format_size(size * 2, 4)));

        // Only logical elements count; padding slots are excluded
        group.throughput(Throughput::Elements(size as u64));

        for descriptor in &descriptors {
            let mut bench = descriptor.build(size, DEFAULT_SEED);

            group.bench_function(BenchmarkId::new(descriptor.name.as_str(), size), |b| {
                b.iter(|| bench.run_iteration())
            });
        }

        group.finish();
    }
}

fn all_benchmarks_suite(c: &mut Criterion) {
    println!("🚀 Starting Memory Layout Benchmarks");
    println!(
        "   Testing {} input sizes from {} to {} elements",
        INPUT_SIZES.len(),
        INPUT_SIZES[0],
        INPUT_SIZES[INPUT_SIZES.len() - 1]
    );

    let start_time = Instant::now();

    benchmark_memory_layouts(c);

    let elapsed = start_time.elapsed();
    println!(
        "✅ Benchmark suite completed in {:.2} seconds",
        elapsed.as_secs_f64()
    );
}

// ================================================================================================
// CRITERION INTEGRATION
// ================================================================================================

criterion_group!(benches, all_benchmarks_suite);
criterion_main!(benches);
