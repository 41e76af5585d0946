//! Vectorized load/store strategies over the storage layouts.
//!
//! Every strategy owns its [`Layout`] and moves one register pair per call:
//! [`AccessStrategy::load`] returns W coordinates starting at a logical index
//! as an `(x, y)` vector pair, [`AccessStrategy::store`] writes W polar results
//! back. Strategies differ only in the mechanism:
//!
//! - [`SubscriptAccess`]: lane-by-lane scalar copies, works with any layout
//! - [`ContiguousAccess`]: one bulk instruction per field, for layouts that
//!   keep W consecutive elements adjacent ([`ContiguousStorage`])
//! - [`GatherScatterAccess`]: indexed loads and stores driven by an
//!   [`IndexVector`] that advances by W after every store, for layouts with a
//!   fixed field stride ([`GatherStorage`])
//! - [`StridedGatherAccess`]: the same indexed instructions with one fixed
//!   offset vector `{0, S, 2S, ...}`, shifting the field base to `start`
//! - [`BaselineAccess`]: reuses one in-register block, no memory traffic
//!
//! Callers only invoke `load`/`store` for starts inside the vector-aligned
//! prefix, so `start + W <= capacity` holds; strategies assert it before any
//! raw-pointer access.

mod baseline;
mod contiguous;
mod gather_scatter;
mod strided_gather;
mod subscript;

pub use baseline::BaselineAccess;
pub use contiguous::{ContiguousAccess, ContiguousStorage};
pub use gather_scatter::{GatherScatterAccess, GatherStorage, IndexVector};
pub use strided_gather::StridedGatherAccess;
pub use subscript::SubscriptAccess;

use crate::layout::Layout;
use crate::transform::{Coordinate, PolarCoordinate};

/// Vector type of strategy `A`.
pub type VectorOf<A> = <<A as AccessStrategy>::Layout as Layout>::Vector;

/// A load/store mechanism bound to one storage layout.
pub trait AccessStrategy: Sized {
    type Layout: Layout;

    const NAME: &'static str;

    /// False when loads and stores never touch memory, so the driver has to
    /// fence the register against constant folding.
    const MEMORY_BACKED: bool = true;

    /// Builds the layout for `capacity` logical elements.
    fn with_capacity(capacity: usize) -> Self;

    fn layout(&self) -> &Self::Layout;

    fn layout_mut(&mut self) -> &mut Self::Layout;

    /// Called once at the start of every timed iteration, before the first
    /// `load`. Stateless strategies keep the default no-op.
    #[inline(always)]
    fn setup_loop(&mut self) {}

    /// Reads logical elements `[start, start + W)` into one register pair.
    fn load(&self, start: usize) -> Coordinate<VectorOf<Self>>;

    /// Writes one register pair of results to `[start, start + W)`.
    fn store(&mut self, start: usize, polar: PolarCoordinate<VectorOf<Self>>);
}

#[inline(always)]
pub(crate) fn assert_in_bounds(start: usize, lanes: usize, capacity: usize) {
    assert!(
        start + lanes <= capacity,
        "Vector access [{start}, {}) exceeds capacity {capacity}",
        start + lanes
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Aos, Aovs, ScalarOf, Soa};
    use crate::simd::portable::{F32x4, F64x4};
    use crate::simd::{NativeF32, NativeF64, SimdVector};

    /// Seeds `[0, capacity)` with `x = i`, `y = -2i`, then checks that every
    /// aligned load returns those lanes and every store lands on the same
    /// logical indices.
    fn check_strategy<A: AccessStrategy>(capacity: usize)
    where
        ScalarOf<A::Layout>: From<u16>,
    {
        let value = |i: usize| <ScalarOf<A::Layout> as From<u16>>::from(i as u16);
        let lanes = <VectorOf<A> as SimdVector>::LANES;

        let mut access = A::with_capacity(capacity);
        for i in 0..capacity {
            let v = value(i);
            access
                .layout_mut()
                .set_coordinate(i, Coordinate::new(v, -(v + v)));
        }

        access.setup_loop();
        for start in (0..capacity - capacity % lanes).step_by(lanes) {
            let Coordinate { x, y } = access.load(start);
            for lane in 0..lanes {
                let v = value(start + lane);
                assert_eq!(x.extract(lane), v, "{} x at {}", A::NAME, start + lane);
                assert_eq!(y.extract(lane), -(v + v), "{} y at {}", A::NAME, start + lane);
            }

            // radius = y, phi = x makes misrouted lanes visible
            access.store(start, PolarCoordinate::new(y, x));
        }

        for i in 0..capacity - capacity % lanes {
            let v = value(i);
            let polar = access.layout().polar_coordinate(i);
            assert_eq!(polar.radius, -(v + v), "{} radius at {i}", A::NAME);
            assert_eq!(polar.phi, v, "{} phi at {i}", A::NAME);
        }
    }

    macro_rules! strategy_tests {
        ($($name:ident: $v:ty),* $(,)?) => {
            $(
                #[test]
                fn $name() {
                    check_strategy::<SubscriptAccess<Aos<$v>>>(37);
                    check_strategy::<SubscriptAccess<Soa<$v>>>(37);
                    check_strategy::<SubscriptAccess<Aovs<$v>>>(37);
                    check_strategy::<ContiguousAccess<Aos<$v>>>(37);
                    check_strategy::<ContiguousAccess<Soa<$v>>>(37);
                    check_strategy::<ContiguousAccess<Aovs<$v>>>(37);
                    check_strategy::<GatherScatterAccess<Aos<$v>>>(37);
                    check_strategy::<GatherScatterAccess<Soa<$v>>>(37);
                    check_strategy::<StridedGatherAccess<Aos<$v>>>(37);
                    check_strategy::<StridedGatherAccess<Soa<$v>>>(37);
                }
            )*
        };
    }

    strategy_tests! {
        test_strategies_portable_f32x4: F32x4,
        test_strategies_portable_f64x4: F64x4,
        test_strategies_native_f32: NativeF32,
        test_strategies_native_f64: NativeF64,
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn test_contiguous_load_past_capacity_panics() {
        let access = ContiguousAccess::<Soa<F32x4>>::with_capacity(6);
        let _ = access.load(4);
    }
}
