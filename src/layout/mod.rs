//! Physical arrangements of a coordinate sequence.
//!
//! Every layout stores the same logical sequence of input [`Coordinate`]s
//! and output [`PolarCoordinate`]s; they differ only in where each field of
//! element `i` lives in memory:
//!
//! | Layout     | Input storage                               |
//! |------------|---------------------------------------------|
//! | [`Aos`]    | `[x0 y0 x1 y1 ...]`                         |
//! | [`Soa`]    | `[x0 x1 ...]` and `[y0 y1 ...]`             |
//! | [`Aovs`]   | `[{x0..xW-1, y0..yW-1}, {xW.., yW..}, ...]` |
//! | [`Register`] | one in-register block, reused for every index |
//!
//! The scalar accessors on [`Layout`] are what the tail loop and the
//! subscript access strategy use; vectorized access is layered on top in
//! [`crate::access`].

mod aos;
mod aovs;
mod register;
mod soa;

pub use aos::Aos;
pub use aovs::Aovs;
pub use register::Register;
pub use soa::Soa;

use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Element type of layout `L`.
pub type ScalarOf<L> = <<L as Layout>::Vector as SimdVector>::Scalar;

/// Storage for `capacity` input coordinates and their polar results.
pub trait Layout: Sized {
    /// Vector type whose width governs the physical arrangement.
    type Vector: SimdVector;

    const NAME: &'static str;

    /// Allocates storage for `capacity` logical elements.
    ///
    /// Allocation failure aborts through the global allocation error handler.
    fn with_capacity(capacity: usize) -> Self;

    /// Number of logical elements the layout can address.
    fn capacity(&self) -> usize;

    /// Reads input element `index`.
    fn coordinate(&self, index: usize) -> Coordinate<ScalarOf<Self>>;

    /// Writes input element `index`; used while seeding.
    fn set_coordinate(&mut self, index: usize, coordinate: Coordinate<ScalarOf<Self>>);

    /// Reads output element `index`.
    fn polar_coordinate(&self, index: usize) -> PolarCoordinate<ScalarOf<Self>>;

    /// Writes output element `index`.
    fn set_polar_coordinate(&mut self, index: usize, polar: PolarCoordinate<ScalarOf<Self>>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::portable::{F32x4, F64x2};

    fn exercise_scalar_access<L: Layout<Vector = V>, V: SimdVector>(capacity: usize)
    where
        V::Scalar: From<u8>,
    {
        let mut layout = L::with_capacity(capacity);
        assert!(layout.capacity() >= capacity, "{} lost capacity", L::NAME);

        for i in 0..capacity {
            let v = V::Scalar::from((i % 200) as u8);
            layout.set_coordinate(i, Coordinate::new(v, -v));
            layout.set_polar_coordinate(i, PolarCoordinate::new(v + v, v * v));
        }

        for i in 0..capacity {
            let v = V::Scalar::from((i % 200) as u8);
            assert_eq!(layout.coordinate(i), Coordinate::new(v, -v), "{} input {i}", L::NAME);
            assert_eq!(
                layout.polar_coordinate(i),
                PolarCoordinate::new(v + v, v * v),
                "{} output {i}",
                L::NAME
            );
        }
    }

    #[test]
    fn test_aos_scalar_access() {
        exercise_scalar_access::<Aos<F32x4>, F32x4>(13);
        exercise_scalar_access::<Aos<F64x2>, F64x2>(7);
    }

    #[test]
    fn test_soa_scalar_access() {
        exercise_scalar_access::<Soa<F32x4>, F32x4>(13);
        exercise_scalar_access::<Soa<F64x2>, F64x2>(7);
    }

    #[test]
    fn test_aovs_scalar_access_addresses_lane_within_block() {
        exercise_scalar_access::<Aovs<F32x4>, F32x4>(13);
        exercise_scalar_access::<Aovs<F64x2>, F64x2>(7);
    }

    #[test]
    fn test_empty_layouts() {
        assert_eq!(Aos::<F32x4>::with_capacity(0).capacity(), 0);
        assert_eq!(Soa::<F32x4>::with_capacity(0).capacity(), 0);
        assert_eq!(Aovs::<F32x4>::with_capacity(0).capacity(), 0);
    }
}
