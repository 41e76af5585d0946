//! Portable array-backed vectors.
//!
//! [`Lanes`] implements [`SimdVector`] on top of a plain `[T; N]`, leaving
//! vectorization to the compiler. It is always compiled, serves as the
//! fallback when no instruction set was detected at build time, and gives
//! tests a width that does not depend on the host CPU.

use std::ops::{Add, Mul};

use crate::simd::{Scalar, SimdVector};
use crate::transform::PolarMath;

/// `N` lanes of `T`, aligned for 256-bit loads.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(32))]
pub struct Lanes<T, const N: usize>(pub [T; N]);

pub type F32x4 = Lanes<f32, 4>;
pub type F32x8 = Lanes<f32, 8>;
pub type F32x16 = Lanes<f32, 16>;
pub type F64x2 = Lanes<f64, 2>;
pub type F64x4 = Lanes<f64, 4>;

/// Names the portable vectors by lane type and count.
pub trait LaneName {
    const NAME: &'static str;
}

macro_rules! lane_names {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(impl LaneName for $t { const NAME: &'static str = $name; })*
    };
}

lane_names! {
    F32x4 => "f32x4 (portable)",
    F32x8 => "f32x8 (portable)",
    F32x16 => "f32x16 (portable)",
    F64x2 => "f64x2 (portable)",
    F64x4 => "f64x4 (portable)",
}

impl<T: Scalar, const N: usize> Lanes<T, N> {
    #[inline(always)]
    pub fn from_array(lanes: [T; N]) -> Self {
        Self(lanes)
    }

    #[inline(always)]
    pub fn to_array(self) -> [T; N] {
        self.0
    }

    #[inline(always)]
    fn zip_with(self, rhs: Self, f: impl Fn(T, T) -> T) -> Self {
        Self(std::array::from_fn(|lane| f(self.0[lane], rhs.0[lane])))
    }

    #[inline(always)]
    fn map(self, f: impl Fn(T) -> T) -> Self {
        Self(self.0.map(f))
    }
}

impl<T: Scalar, const N: usize> Add for Lanes<T, N> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl<T: Scalar, const N: usize> Mul for Lanes<T, N> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl<T: Scalar, const N: usize> PolarMath for Lanes<T, N> {
    #[inline(always)]
    fn sqrt_lanes(self) -> Self {
        self.map(T::sqrt_lanes)
    }

    #[inline(always)]
    fn atan2_lanes(self, x: Self) -> Self {
        self.zip_with(x, T::atan2_lanes)
    }

    #[inline(always)]
    fn degrees_per_radian() -> Self {
        Self([T::degrees_per_radian(); N])
    }
}

impl<T: Scalar, const N: usize> SimdVector for Lanes<T, N>
where
    Self: LaneName,
{
    type Scalar = T;
    type Indices = [u32; N];

    const LANES: usize = N;
    const ALIGNMENT: usize = std::mem::align_of::<Self>();
    const NAME: &'static str = <Self as LaneName>::NAME;

    #[inline(always)]
    fn splat(value: T) -> Self {
        Self([value; N])
    }

    #[inline(always)]
    fn extract(&self, lane: usize) -> T {
        self.0[lane]
    }

    #[inline(always)]
    fn insert(&mut self, lane: usize, value: T) {
        self.0[lane] = value;
    }

    #[inline(always)]
    fn indices_from_zero() -> [u32; N] {
        std::array::from_fn(|lane| lane as u32)
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const T) -> Self {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");
        Self::load_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const T) -> Self {
        Self((ptr as *const [T; N]).read_unaligned())
    }

    #[inline(always)]
    unsafe fn store_aligned(&self, ptr: *mut T) {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");
        self.store_unaligned(ptr)
    }

    #[inline(always)]
    unsafe fn store_unaligned(&self, ptr: *mut T) {
        (ptr as *mut [T; N]).write_unaligned(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_is_lane_wise() {
        let a = F32x4::from_array([1.0, 2.0, 3.0, 4.0]);
        let b = F32x4::splat(2.0);

        assert_eq!((a + b).to_array(), [3.0, 4.0, 5.0, 6.0]);
        assert_eq!((a * b).to_array(), [2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_insert_and_extract() {
        let mut v = F64x4::splat(0.0);
        v.insert(2, 7.5);

        assert_eq!(v.extract(2), 7.5);
        assert_eq!(v.to_vec(), vec![0.0, 0.0, 7.5, 0.0]);
    }

    #[test]
    #[should_panic]
    fn test_extract_out_of_range_panics() {
        let v = F32x4::splat(1.0);
        let _ = v.extract(4);
    }

    #[test]
    fn test_load_store_unaligned_offset() {
        let data: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let v = unsafe { F32x8::load(data.as_ptr().add(1)) };
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

        let mut out = [0.0f32; 9];
        unsafe { v.store(out.as_mut_ptr().add(1)) };
        assert_eq!(&out[1..], &data[1..]);
    }

    #[test]
    fn test_interleaved_round_trip() {
        let interleaved = [1.0f32, 10.0, 2.0, 20.0, 3.0, 30.0, 4.0, 40.0];
        let (a, b) = unsafe { F32x4::load_interleaved(interleaved.as_ptr()) };

        assert_eq!(a.to_array(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b.to_array(), [10.0, 20.0, 30.0, 40.0]);

        let mut out = [0.0f32; 8];
        unsafe { F32x4::store_interleaved(a, b, out.as_mut_ptr()) };
        assert_eq!(out, interleaved);
    }

    #[test]
    fn test_gather_scatter_by_offsets() {
        let data: Vec<f64> = (0..8).map(|i| i as f64 * 1.5).collect();
        let offsets = [6u32, 0, 4, 2];

        let v = unsafe { F64x4::gather(data.as_ptr(), &offsets) };
        assert_eq!(v.to_array(), [9.0, 0.0, 6.0, 3.0]);

        let mut out = vec![0.0f64; 8];
        unsafe { v.scatter(out.as_mut_ptr(), &offsets) };
        assert_eq!(out, vec![0.0, 0.0, 3.0, 0.0, 6.0, 0.0, 9.0, 0.0]);
    }

    #[test]
    fn test_indices_from_zero() {
        assert_eq!(F32x8::indices_from_zero(), [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(F64x2::indices_from_zero(), [0, 1]);
    }
}
