//! Array of structures.
//!
//! Inputs are one buffer of `Coordinate { x, y }` records and outputs one
//! buffer of `PolarCoordinate { radius, phi }` records, so the two fields of
//! an element share a cache line:
//!
//! ```text
//! input:  x0 y0 | x1 y1 | x2 y2 | x3 y3 | ...
//! output: r0 p0 | r1 p1 | r2 p2 | r3 p3 | ...
//! ```
//!
//! Vector access either deinterleaves 2W consecutive scalars with shuffles
//! (`ContiguousAccess`) or gathers every second scalar (`GatherScatterAccess`,
//! stride 2). Both buffers are aligned to the vector width.

use std::marker::PhantomData;

use super::{Layout, ScalarOf};
use crate::simd::utils::AlignedBuffer;
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Array of structures: one buffer of interleaved `(x, y)` records.
#[derive(Debug)]
pub struct Aos<V: SimdVector> {
    pub(crate) input: AlignedBuffer<Coordinate<V::Scalar>>,
    pub(crate) output: AlignedBuffer<PolarCoordinate<V::Scalar>>,
    _vector: PhantomData<V>,
}

impl<V: SimdVector> Aos<V> {
    /// Input records viewed as `2 * capacity` scalars `x0 y0 x1 y1 ...`.
    #[inline(always)]
    pub(crate) fn input_scalars(&self) -> *const V::Scalar {
        self.input.as_ptr() as *const V::Scalar
    }

    /// Output records viewed as `2 * capacity` scalars `r0 phi0 r1 phi1 ...`.
    #[inline(always)]
    pub(crate) fn output_scalars(&mut self) -> *mut V::Scalar {
        self.output.as_mut_ptr() as *mut V::Scalar
    }
}

impl<V: SimdVector> Layout for Aos<V> {
    type Vector = V;

    const NAME: &'static str = "AoS";

    fn with_capacity(capacity: usize) -> Self {
        Self {
            input: AlignedBuffer::new(capacity, V::ALIGNMENT),
            output: AlignedBuffer::new(capacity, V::ALIGNMENT),
            _vector: PhantomData,
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.input.len()
    }

    #[inline(always)]
    fn coordinate(&self, index: usize) -> Coordinate<ScalarOf<Self>> {
        self.input[index]
    }

    #[inline(always)]
    fn set_coordinate(&mut self, index: usize, coordinate: Coordinate<ScalarOf<Self>>) {
        self.input[index] = coordinate;
    }

    #[inline(always)]
    fn polar_coordinate(&self, index: usize) -> PolarCoordinate<ScalarOf<Self>> {
        self.output[index]
    }

    #[inline(always)]
    fn set_polar_coordinate(&mut self, index: usize, polar: PolarCoordinate<ScalarOf<Self>>) {
        self.output[index] = polar;
    }
}
