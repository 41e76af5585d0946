//! Every benchmark combination, named and type-erased.
//!
//! The combinations are instantiated generically per vector type; the
//! [`Benchmark`] trait object only exists here, at the boundary to the CLI and
//! the criterion harness.

use log::debug;

use crate::access::{
    AccessStrategy, BaselineAccess, ContiguousAccess, GatherScatterAccess, StridedGatherAccess,
    SubscriptAccess, VectorOf,
};
use crate::driver::{GenericBenchmark, Report, TimedLoop};
use crate::error::{LayoutBenchError, Result};
use crate::layout::{Aos, Aovs, Layout, Soa};
use crate::simd::{NativeF32, NativeF64, Scalar, SimdVector};
use crate::tail::{Padding, RestScalar, TailPolicy};
use crate::transform::{Coordinate, PolarCoordinate};

/// A seeded benchmark instance behind dynamic dispatch.
pub trait Benchmark {
    fn name(&self) -> &str;

    fn input_size(&self) -> usize;

    fn run_iteration(&mut self);

    fn run(&mut self, timer: &mut dyn TimedLoop) -> Report;

    /// Inputs widened to `f64`.
    fn inputs_f64(&self) -> Vec<Coordinate<f64>>;

    /// Outputs for `[0, input_size)` widened to `f64`.
    fn outputs_f64(&self) -> Vec<PolarCoordinate<f64>>;
}

struct Named<A: AccessStrategy, P: TailPolicy> {
    name: String,
    inner: GenericBenchmark<A, P>,
}

fn widen<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

impl<A: AccessStrategy, P: TailPolicy> Benchmark for Named<A, P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_size(&self) -> usize {
        self.inner.plan().input_size
    }

    fn run_iteration(&mut self) {
        self.inner.run_iteration();
    }

    fn run(&mut self, timer: &mut dyn TimedLoop) -> Report {
        self.inner.run(timer)
    }

    fn inputs_f64(&self) -> Vec<Coordinate<f64>> {
        self.inner
            .inputs()
            .into_iter()
            .map(|c| Coordinate::new(widen(c.x), widen(c.y)))
            .collect()
    }

    fn outputs_f64(&self) -> Vec<PolarCoordinate<f64>> {
        self.inner
            .outputs()
            .into_iter()
            .map(|p| PolarCoordinate::new(widen(p.radius), widen(p.phi)))
            .collect()
    }
}

/// Static description of one combination; `build` seeds a fresh instance.
#[derive(Clone, Debug)]
pub struct BenchmarkDescriptor {
    /// `vector/layout/access/tail`.
    pub name: String,
    pub element: &'static str,
    pub element_bytes: usize,
    pub lanes: usize,
    pub layout: &'static str,
    pub access: &'static str,
    pub tail: &'static str,
    /// Whether outputs are expected to match the scalar reference.
    pub memory_backed: bool,
    build: fn(usize, u64) -> Box<dyn Benchmark>,
}

impl BenchmarkDescriptor {
    /// Instantiates the benchmark for `input_size` elements seeded by `seed`.
    pub fn build(&self, input_size: usize, seed: u64) -> Box<dyn Benchmark> {
        (self.build)(input_size, seed)
    }
}

fn build<A, P>(input_size: usize, seed: u64) -> Box<dyn Benchmark>
where
    A: AccessStrategy + 'static,
    P: TailPolicy + 'static,
{
    Box::new(Named {
        name: GenericBenchmark::<A, P>::name(),
        inner: GenericBenchmark::<A, P>::with_seed(input_size, seed),
    })
}

fn descriptor<A, P>() -> BenchmarkDescriptor
where
    A: AccessStrategy + 'static,
    P: TailPolicy + 'static,
{
    BenchmarkDescriptor {
        name: GenericBenchmark::<A, P>::name(),
        element: <<VectorOf<A> as SimdVector>::Scalar as Scalar>::NAME,
        element_bytes: std::mem::size_of::<<VectorOf<A> as SimdVector>::Scalar>(),
        lanes: <VectorOf<A> as SimdVector>::LANES,
        layout: <A::Layout as Layout>::NAME,
        access: A::NAME,
        tail: P::NAME,
        memory_backed: A::MEMORY_BACKED,
        build: build::<A, P>,
    }
}

fn with_both_tails<A: AccessStrategy + 'static>(out: &mut Vec<BenchmarkDescriptor>) {
    out.push(descriptor::<A, Padding>());
    out.push(descriptor::<A, RestScalar>());
}

/// Appends every combination for vector type `V`: the register baseline
/// (padding only), AoS and SoA under subscript, contiguous, advancing
/// gather/scatter and fixed-offset gather/scatter, and AoVS under subscript
/// and block access, each with both tail policies.
pub fn register_vector<V: SimdVector>(out: &mut Vec<BenchmarkDescriptor>) {
    out.push(descriptor::<BaselineAccess<V>, Padding>());

    with_both_tails::<SubscriptAccess<Aos<V>>>(out);
    with_both_tails::<ContiguousAccess<Aos<V>>>(out);
    with_both_tails::<GatherScatterAccess<Aos<V>>>(out);
    with_both_tails::<StridedGatherAccess<Aos<V>>>(out);

    with_both_tails::<SubscriptAccess<Soa<V>>>(out);
    with_both_tails::<ContiguousAccess<Soa<V>>>(out);
    with_both_tails::<GatherScatterAccess<Soa<V>>>(out);
    with_both_tails::<StridedGatherAccess<Soa<V>>>(out);

    with_both_tails::<SubscriptAccess<Aovs<V>>>(out);
    with_both_tails::<ContiguousAccess<Aovs<V>>>(out);
}

/// Combinations for the native f32 and f64 vectors of this build.
pub fn all_benchmarks() -> Vec<BenchmarkDescriptor> {
    let mut out = Vec::new();
    register_vector::<NativeF32>(&mut out);
    register_vector::<NativeF64>(&mut out);

    debug!("Registered {} benchmarks", out.len());
    out
}

/// Keeps the descriptors whose name contains `pattern`; `None` keeps all.
pub fn filter(
    descriptors: Vec<BenchmarkDescriptor>,
    pattern: Option<&str>,
) -> Result<Vec<BenchmarkDescriptor>> {
    let Some(pattern) = pattern else {
        return Ok(descriptors);
    };

    let available = descriptors.len();
    let selected: Vec<_> = descriptors
        .into_iter()
        .filter(|d| d.name.contains(pattern))
        .collect();

    if selected.is_empty() {
        return Err(LayoutBenchError::NoMatchingBenchmark {
            filter: pattern.to_string(),
            available,
        });
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::FixedIterations;
    use crate::simd::portable::F32x4;

    #[test]
    fn test_register_vector_count() {
        let mut out = Vec::new();
        register_vector::<F32x4>(&mut out);

        assert_eq!(out.len(), 21);
        assert_eq!(out.iter().filter(|d| !d.memory_backed).count(), 1);
        assert_eq!(out[0].name, "f32x4 (portable)/Baseline/Register/Padding");
    }

    #[test]
    fn test_names_are_unique() {
        let all = all_benchmarks();
        let mut names: Vec<_> = all.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_filter() {
        let selected = filter(all_benchmarks(), Some("/SoA/GatherScatter/")).unwrap();
        assert_eq!(selected.len(), 4);

        let err = filter(all_benchmarks(), Some("nothing")).unwrap_err();
        assert!(matches!(err, LayoutBenchError::NoMatchingBenchmark { available: 42, .. }));

        let strided = filter(all_benchmarks(), Some("/StridedGather/")).unwrap();
        assert_eq!(strided.len(), 8);
        assert!(strided.iter().all(|d| d.layout == "AoS" || d.layout == "SoA"));
    }

    #[test]
    fn test_build_and_run_erased() {
        let mut out = Vec::new();
        register_vector::<F32x4>(&mut out);

        let mut bench = out[5].build(10, 42);
        let report = bench.run(&mut FixedIterations::new(2));

        assert_eq!(bench.name(), out[5].name);
        assert_eq!(bench.input_size(), 10);
        assert_eq!(report.items_processed, 20);
        assert_eq!(bench.outputs_f64().len(), 10);
    }
}
