//! Memory layout benchmarks for fixed-width SIMD execution.
//!
//! The crate measures how the physical arrangement of a coordinate sequence
//! affects a vectorized Cartesian-to-polar conversion. One generic loop body
//! ([`driver::GenericBenchmark`]) is instantiated for every combination of
//!
//! - vector width and element type ([`simd::SimdVector`]),
//! - storage layout ([`layout`]: AoS, SoA, AoVS),
//! - access strategy ([`access`]: subscript, contiguous, gather/scatter),
//! - tail policy ([`tail`]: padding or scalar remainder),
//!
//! and [`registry`] enumerates the full outer product as named benchmarks.
//!
//! ```rust
//! use layoutbench::access::GatherScatterAccess;
//! use layoutbench::driver::{FixedIterations, GenericBenchmark};
//! use layoutbench::layout::Soa;
//! use layoutbench::simd::portable::F32x4;
//! use layoutbench::tail::RestScalar;
//!
//! let mut bench =
//!     GenericBenchmark::<GatherScatterAccess<Soa<F32x4>>, RestScalar>::with_seed(13, 42);
//! let report = bench.run(&mut FixedIterations::new(10));
//!
//! assert_eq!(report.items_processed, 130);
//! assert_eq!(bench.outputs().len(), 13);
//! ```

pub mod access;
pub mod barrier;
pub mod config;
pub mod driver;
pub mod error;
pub mod layout;
pub mod registry;
pub mod simd;
pub mod tail;
pub mod transform;

pub use error::{LayoutBenchError, Result};
