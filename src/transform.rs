//! Cartesian-to-polar conversion over scalars and vector lane groups.
//!
//! The same [`calculate_polar_coordinate`] body runs on a single `(x, y)`
//! pair and on a full SIMD register of pairs: both implement [`PolarMath`].
//! Angles are reported in degrees.

use std::ops::{Add, Mul};

/// Radians to degrees factor, rounded to single precision.
///
/// Both element types use the single-precision value so that f32 and f64
/// runs scale by the same factor.
pub const DEGREES_PER_RADIAN: f32 = 57.295_78;

/// A point in 2D Cartesian space.
///
/// `T` is either a scalar element type or a vector holding one lane per
/// logical element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Coordinate<T> {
    pub x: T,
    pub y: T,
}

/// Result of the conversion: distance from the origin and angle in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[repr(C)]
pub struct PolarCoordinate<T> {
    pub radius: T,
    pub phi: T,
}

impl<T> Coordinate<T> {
    #[inline(always)]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> PolarCoordinate<T> {
    #[inline(always)]
    pub fn new(radius: T, phi: T) -> Self {
        Self { radius, phi }
    }
}

/// Arithmetic needed by the conversion, implemented lane-wise.
///
/// Method names carry a `_lanes` suffix so they never shadow the inherent
/// `sqrt`/`atan2` of the primitive float types.
pub trait PolarMath: Copy + Add<Output = Self> + Mul<Output = Self> {
    /// Square root of every lane.
    fn sqrt_lanes(self) -> Self;

    /// Four-quadrant arctangent of `self / x` in radians, with `self` as y.
    fn atan2_lanes(self, x: Self) -> Self;

    /// [`DEGREES_PER_RADIAN`] broadcast to every lane.
    fn degrees_per_radian() -> Self;
}

macro_rules! impl_polar_math_scalar {
    ($($t:ty),*) => {
        $(
            impl PolarMath for $t {
                #[inline(always)]
                fn sqrt_lanes(self) -> Self {
                    self.sqrt()
                }

                #[inline(always)]
                fn atan2_lanes(self, x: Self) -> Self {
                    self.atan2(x)
                }

                #[inline(always)]
                fn degrees_per_radian() -> Self {
                    DEGREES_PER_RADIAN as $t
                }
            }
        )*
    };
}

impl_polar_math_scalar!(f32, f64);

/// Converts one Cartesian coordinate (or one register of them) to polar form.
///
/// `radius = sqrt(x² + y²)`, `phi = atan2(y, x)` in degrees.
#[inline(always)]
pub fn calculate_polar_coordinate<L: PolarMath>(coordinate: Coordinate<L>) -> PolarCoordinate<L> {
    let Coordinate { x, y } = coordinate;

    PolarCoordinate {
        radius: (x * x + y * y).sqrt_lanes(),
        phi: y.atan2_lanes(x) * L::degrees_per_radian(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_of_three_four_triangle() {
        let polar = calculate_polar_coordinate(Coordinate::new(3.0f32, 4.0));
        assert!((polar.radius - 5.0).abs() < 1e-6, "radius = {}", polar.radius);
    }

    #[test]
    fn test_phi_on_axes() {
        let east = calculate_polar_coordinate(Coordinate::new(1.0f32, 0.0));
        assert_eq!(east.phi, 0.0);
        assert_eq!(east.radius, 1.0);

        let north = calculate_polar_coordinate(Coordinate::new(0.0f32, 1.0));
        assert!((north.phi - 90.0).abs() < 1e-4, "phi = {}", north.phi);

        let west = calculate_polar_coordinate(Coordinate::new(-1.0f64, 0.0));
        assert!((west.phi - 180.0).abs() < 1e-4, "phi = {}", west.phi);

        let south = calculate_polar_coordinate(Coordinate::new(0.0f64, -1.0));
        assert!((south.phi + 90.0).abs() < 1e-4, "phi = {}", south.phi);
    }

    #[test]
    fn test_single_precision_factor_for_both_types() {
        assert_eq!(<f32 as PolarMath>::degrees_per_radian(), 57.295_78_f32);
        assert_eq!(
            <f64 as PolarMath>::degrees_per_radian(),
            57.295_78_f32 as f64
        );
    }

    #[test]
    fn test_coordinate_is_two_packed_scalars() {
        assert_eq!(
            std::mem::size_of::<Coordinate<f32>>(),
            2 * std::mem::size_of::<f32>()
        );
        assert_eq!(
            std::mem::size_of::<PolarCoordinate<f64>>(),
            2 * std::mem::size_of::<f64>()
        );
    }
}
