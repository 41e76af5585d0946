//! Command-line runner over the benchmark registry.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::error;

use layoutbench::config::{format_size, size_range, BenchConfig, DEFAULT_SEED};
use layoutbench::driver::TimedIterations;
use layoutbench::registry::{all_benchmarks, filter};
use layoutbench::simd::{cpu_features, COMPILED_ISA};
use layoutbench::Result;

/// Measures the Cartesian-to-polar conversion over every memory layout,
/// access strategy and tail policy.
#[derive(Parser, Debug)]
#[command(name = "layoutbench", version, about)]
struct CliArgs {
    /// Input sizes in elements (repeatable). Defaults to the cache ladder.
    #[arg(long = "size", value_name = "N")]
    sizes: Vec<usize>,
    /// Benchmark a range instead: LOW, powers of 8 in between, HIGH.
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], conflicts_with = "sizes")]
    range: Option<Vec<usize>>,
    /// Only run benchmarks whose name contains this text.
    #[arg(long)]
    filter: Option<String>,
    /// Seed for the input coordinates.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Tag printed with every result.
    #[arg(long)]
    label: Option<String>,
    /// Minimum measuring time per benchmark in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 200)]
    min_time_ms: u64,
    /// Minimum iterations per benchmark.
    #[arg(long, value_name = "N", default_value_t = 10)]
    min_iterations: u64,
    /// Print the registered benchmark names and exit.
    #[arg(long)]
    list: bool,
    /// Log verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

fn init_logger(level: LogLevel) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(level.as_filter());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

impl CliArgs {
    fn into_config(self) -> Result<BenchConfig> {
        let mut config = BenchConfig {
            seed: self.seed,
            filter: self.filter,
            label: self.label,
            min_time: Duration::from_millis(self.min_time_ms),
            min_iterations: self.min_iterations,
            ..BenchConfig::default()
        };

        if let Some(range) = self.range {
            config.sizes = size_range(range[0], range[1])?;
        } else if !self.sizes.is_empty() {
            config.sizes = self.sizes;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(config: &BenchConfig) -> Result<()> {
    let benchmarks = filter(all_benchmarks(), config.filter.as_deref())?;
    let label = config.label.as_deref().unwrap_or("");

    println!("🚀 Memory layout benchmarks ({} combinations)", benchmarks.len());
    let suite_start = Instant::now();

    for &size in &config.sizes {
        println!("\n📊 Input size {size}");

        for descriptor in &benchmarks {
            let mut bench = descriptor.build(size, config.seed);
            let mut timer = TimedIterations::new(config.min_time, config.min_iterations);
            let report = bench.run(&mut timer);

            let per_item = if report.items_processed > 0 {
                report.elapsed.as_nanos() as f64 / report.items_processed as f64
            } else {
                0.0
            };

            println!(
                "  {:<52} {:>10} {:>8.3} ns/elem {:>10.1} Melem/s {:>8} iters {}",
                descriptor.name,
                format_size(size * 2, descriptor.element_bytes),
                per_item,
                report.items_per_second() / 1e6,
                report.iterations,
                label
            );
        }
    }

    println!(
        "\n✅ Completed in {:.2} seconds",
        suite_start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logger(args.log_level);

    let features = cpu_features();
    if !features.supports_compiled_isa() {
        error!("This CPU lacks the {COMPILED_ISA} instructions the binary was built for");
        return ExitCode::FAILURE;
    }

    if args.list {
        for descriptor in all_benchmarks() {
            println!("{}", descriptor.name);
        }
        return ExitCode::SUCCESS;
    }

    let result = args.into_config().and_then(|config| run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
