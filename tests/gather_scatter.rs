//! Index-vector determinism for the gather/scatter strategies.
//!
//! After `setup_loop`, N full vectorized iterations must visit every logical
//! index in `[0, N * W)` exactly once, and the next `setup_loop` must start
//! the same sweep again.

use proptest::prelude::*;

use layoutbench::access::{AccessStrategy, GatherScatterAccess, GatherStorage};
use layoutbench::layout::{Aos, Layout, Soa};
use layoutbench::simd::portable::{F32x4, F64x2};
use layoutbench::simd::{NativeF32, NativeF64, SimdVector};
use layoutbench::transform::{Coordinate, PolarCoordinate};

/// Runs one sweep over `blocks` register blocks and returns the visited
/// logical indices in visit order.
fn sweep<L: GatherStorage>(access: &mut GatherScatterAccess<L>, blocks: usize) -> Vec<u32> {
    let lanes = L::Vector::LANES;
    let mut visited = Vec::with_capacity(blocks * lanes);

    access.setup_loop();
    for block in 0..blocks {
        let start = block * lanes;
        visited.extend_from_slice(access.indices().lanes());

        let loaded = access.load(start);
        access.store(start, PolarCoordinate::new(loaded.x, loaded.y));
    }

    visited
}

fn check_determinism<L: GatherStorage>(blocks: usize) {
    let lanes = L::Vector::LANES;
    let mut access = GatherScatterAccess::<L>::with_capacity(blocks * lanes);

    let first = sweep(&mut access, blocks);
    let mut sorted = first.clone();
    sorted.sort_unstable();
    let expected: Vec<u32> = (0..(blocks * lanes) as u32).collect();
    assert_eq!(sorted, expected, "{} visited the wrong index set", L::NAME);

    let second = sweep(&mut access, blocks);
    assert_eq!(first, second, "{} sweep changed after setup_loop", L::NAME);
}

/// Storing `x` as radius must round-trip every element through scatter.
fn check_scatter_targets<L: GatherStorage>(blocks: usize)
where
    <L::Vector as SimdVector>::Scalar: From<u16>,
{
    let lanes = L::Vector::LANES;
    let capacity = blocks * lanes;
    let mut access = GatherScatterAccess::<L>::with_capacity(capacity);

    for index in 0..capacity {
        let value = <<L::Vector as SimdVector>::Scalar as From<u16>>::from(index as u16);
        access
            .layout_mut()
            .set_coordinate(index, Coordinate::new(value, value));
    }
    sweep(&mut access, blocks);

    for index in 0..capacity {
        let expected = <<L::Vector as SimdVector>::Scalar as From<u16>>::from(index as u16);
        assert_eq!(
            access.layout().polar_coordinate(index).radius,
            expected,
            "{} scatter misplaced element {index}",
            L::NAME
        );
    }
}

proptest! {
    #[test]
    fn prop_portable_sweeps_visit_each_index_once(blocks in 0usize..64) {
        check_determinism::<Aos<F32x4>>(blocks);
        check_determinism::<Soa<F32x4>>(blocks);
        check_determinism::<Aos<F64x2>>(blocks);
        check_determinism::<Soa<F64x2>>(blocks);
    }

    #[test]
    fn prop_native_sweeps_visit_each_index_once(blocks in 0usize..64) {
        check_determinism::<Aos<NativeF32>>(blocks);
        check_determinism::<Soa<NativeF32>>(blocks);
        check_determinism::<Aos<NativeF64>>(blocks);
        check_determinism::<Soa<NativeF64>>(blocks);
    }
}

#[test]
fn test_scatter_writes_every_element_back() {
    check_scatter_targets::<Aos<F32x4>>(9);
    check_scatter_targets::<Soa<F32x4>>(9);
    check_scatter_targets::<Aos<NativeF32>>(9);
    check_scatter_targets::<Soa<NativeF32>>(9);
    check_scatter_targets::<Aos<NativeF64>>(9);
    check_scatter_targets::<Soa<NativeF64>>(9);
}
