//! Array of vectorized structures.
//!
//! Elements are grouped into blocks of W; each block stores a full register
//! of x values followed by a full register of y values:
//!
//! ```text
//! block 0: x0 .. x(W-1) | y0 .. y(W-1)
//! block 1: xW .. x(2W-1) | yW .. y(2W-1)
//! ```
//!
//! Vector access copies whole blocks; scalar access (tail loop, subscript
//! strategy) addresses block `i / W`, lane `i % W`. Capacities that are not
//! a multiple of W are rounded up to whole blocks, so the scalar remainder
//! always has storage.

use super::{Layout, ScalarOf};
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Array of vectorized structures: each block holds one full register of
/// x values and one of y values.
///
/// Logical element `i` lives in block `i / W`, lane `i % W`. Capacity is
/// rounded up to whole blocks.
#[derive(Debug)]
pub struct Aovs<V: SimdVector> {
    pub(crate) input: Vec<Coordinate<V>>,
    pub(crate) output: Vec<PolarCoordinate<V>>,
}

impl<V: SimdVector> Aovs<V> {
    #[inline(always)]
    fn locate(index: usize) -> (usize, usize) {
        (index / V::LANES, index % V::LANES)
    }

    /// Number of register blocks.
    #[inline(always)]
    pub fn blocks(&self) -> usize {
        self.input.len()
    }
}

impl<V: SimdVector> Layout for Aovs<V> {
    type Vector = V;

    const NAME: &'static str = "AoVS";

    fn with_capacity(capacity: usize) -> Self {
        let blocks = capacity.div_ceil(V::LANES);
        let zero = V::splat(<V::Scalar as num::Zero>::zero());

        Self {
            input: vec![Coordinate::new(zero, zero); blocks],
            output: vec![PolarCoordinate::new(zero, zero); blocks],
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.input.len() * V::LANES
    }

    #[inline(always)]
    fn coordinate(&self, index: usize) -> Coordinate<ScalarOf<Self>> {
        let (block, lane) = Self::locate(index);
        let Coordinate { x, y } = &self.input[block];

        Coordinate::new(x.extract(lane), y.extract(lane))
    }

    #[inline(always)]
    fn set_coordinate(&mut self, index: usize, coordinate: Coordinate<ScalarOf<Self>>) {
        let (block, lane) = Self::locate(index);
        let block = &mut self.input[block];

        block.x.insert(lane, coordinate.x);
        block.y.insert(lane, coordinate.y);
    }

    #[inline(always)]
    fn polar_coordinate(&self, index: usize) -> PolarCoordinate<ScalarOf<Self>> {
        let (block, lane) = Self::locate(index);
        let PolarCoordinate { radius, phi } = &self.output[block];

        PolarCoordinate::new(radius.extract(lane), phi.extract(lane))
    }

    #[inline(always)]
    fn set_polar_coordinate(&mut self, index: usize, polar: PolarCoordinate<ScalarOf<Self>>) {
        let (block, lane) = Self::locate(index);
        let block = &mut self.output[block];

        block.radius.insert(lane, polar.radius);
        block.phi.insert(lane, polar.phi);
    }
}
