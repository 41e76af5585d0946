//! In-register baseline.
//!
//! One input block and one output block, reused for every vectorized
//! iteration. The benchmark built on it has no memory traffic, so it
//! bounds what any memory layout can reach.

use super::{Layout, ScalarOf};
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// A single register-resident block, addressed modulo the vector width.
///
/// Backs the baseline benchmark: every vectorized iteration reads and writes
/// the same block, so only the conversion itself is measured. Scalar index
/// `i` maps to lane `i % W` regardless of the requested capacity.
#[derive(Debug)]
pub struct Register<V: SimdVector> {
    pub(crate) input: Coordinate<V>,
    pub(crate) output: PolarCoordinate<V>,
    capacity: usize,
}

impl<V: SimdVector> Layout for Register<V> {
    type Vector = V;

    const NAME: &'static str = "Baseline";

    fn with_capacity(capacity: usize) -> Self {
        let zero = V::splat(<V::Scalar as num::Zero>::zero());

        Self {
            input: Coordinate::new(zero, zero),
            output: PolarCoordinate::new(zero, zero),
            capacity,
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    fn coordinate(&self, index: usize) -> Coordinate<ScalarOf<Self>> {
        let lane = index % V::LANES;
        Coordinate::new(self.input.x.extract(lane), self.input.y.extract(lane))
    }

    #[inline(always)]
    fn set_coordinate(&mut self, index: usize, coordinate: Coordinate<ScalarOf<Self>>) {
        let lane = index % V::LANES;
        self.input.x.insert(lane, coordinate.x);
        self.input.y.insert(lane, coordinate.y);
    }

    #[inline(always)]
    fn polar_coordinate(&self, index: usize) -> PolarCoordinate<ScalarOf<Self>> {
        let lane = index % V::LANES;
        PolarCoordinate::new(self.output.radius.extract(lane), self.output.phi.extract(lane))
    }

    #[inline(always)]
    fn set_polar_coordinate(&mut self, index: usize, polar: PolarCoordinate<ScalarOf<Self>>) {
        let lane = index % V::LANES;
        self.output.radius.insert(lane, polar.radius);
        self.output.phi.insert(lane, polar.phi);
    }
}
