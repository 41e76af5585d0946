//! Structure of arrays.
//!
//! Each field lives in its own vector-aligned buffer:
//!
//! ```text
//! x:      x0 x1 x2 x3 ...     radius: r0 r1 r2 r3 ...
//! y:      y0 y1 y2 y3 ...     phi:    p0 p1 p2 p3 ...
//! ```
//!
//! W consecutive elements of a field are one plain vector load, which makes
//! SoA the natural layout for `ContiguousAccess`. Gather/scatter over SoA uses
//! stride 1 and measures the cost of indexed access on otherwise contiguous
//! data.

use std::marker::PhantomData;

use super::{Layout, ScalarOf};
use crate::simd::utils::AlignedBuffer;
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Structure of arrays: one vector-aligned buffer per field.
#[derive(Debug)]
pub struct Soa<V: SimdVector> {
    pub(crate) x: AlignedBuffer<V::Scalar>,
    pub(crate) y: AlignedBuffer<V::Scalar>,
    pub(crate) radius: AlignedBuffer<V::Scalar>,
    pub(crate) phi: AlignedBuffer<V::Scalar>,
    _vector: PhantomData<V>,
}

impl<V: SimdVector> Layout for Soa<V> {
    type Vector = V;

    const NAME: &'static str = "SoA";

    fn with_capacity(capacity: usize) -> Self {
        Self {
            x: AlignedBuffer::new(capacity, V::ALIGNMENT),
            y: AlignedBuffer::new(capacity, V::ALIGNMENT),
            radius: AlignedBuffer::new(capacity, V::ALIGNMENT),
            phi: AlignedBuffer::new(capacity, V::ALIGNMENT),
            _vector: PhantomData,
        }
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.x.len()
    }

    #[inline(always)]
    fn coordinate(&self, index: usize) -> Coordinate<ScalarOf<Self>> {
        Coordinate::new(self.x[index], self.y[index])
    }

    #[inline(always)]
    fn set_coordinate(&mut self, index: usize, coordinate: Coordinate<ScalarOf<Self>>) {
        self.x[index] = coordinate.x;
        self.y[index] = coordinate.y;
    }

    #[inline(always)]
    fn polar_coordinate(&self, index: usize) -> PolarCoordinate<ScalarOf<Self>> {
        PolarCoordinate::new(self.radius[index], self.phi[index])
    }

    #[inline(always)]
    fn set_polar_coordinate(&mut self, index: usize, polar: PolarCoordinate<ScalarOf<Self>>) {
        self.radius[index] = polar.radius;
        self.phi[index] = polar.phi;
    }
}
