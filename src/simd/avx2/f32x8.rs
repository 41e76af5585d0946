//! AVX2 8-lane f32 vector.
//!
//! `F32x8` wraps an `__m256` register. Square roots, contiguous loads and
//! stores, interleaved (x, y) shuffles and index gathers map to single AVX2
//! instructions; the arctangent is evaluated lane by lane.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 (Intel Haswell, AMD Excavator and later)
//! - **Target Architecture**: x86_64, or x86 with AVX2
//! - **Compilation**: the crate must be compiled with AVX2 enabled
//!   (`-C target-cpu=native` or `-C target-feature=+avx2`); otherwise every
//!   intrinsic below is an out-of-line call and this module is not built
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (8 × f32)
//! - **Memory Alignment**: `load_aligned`/`store_aligned` need 32-byte
//!   alignment, which [`AlignedBuffer`](crate::simd::utils::AlignedBuffer)
//!   provides for the SoA fields
//! - **Interleaved access**: two loads plus three shuffles per (x, y) pair
//!   of registers, versus sixteen scalar moves for the subscript strategy
//! - **Gather**: `vgatherdps` with scale 4; indices are signed 32-bit, so
//!   the largest offset must stay below `i32::MAX`
//! - **Scatter**: not available in AVX2, emulated with eight scalar stores
//!
//! # Supported Operations
//!
//! ## Loading and Storing
//! - `load_aligned()`, `load_unaligned()`, `store_aligned()`, `store_unaligned()`
//! - `load_interleaved()`, `store_interleaved()` - `[x0 y0 x1 y1 ...]` ↔ (x, y)
//! - `gather()`, `scatter()` - per-lane offsets from one base pointer
//!
//! ## Arithmetic
//! - Element-wise addition (`+`) and multiplication (`*`)
//! - `sqrt_lanes()` (`vsqrtps`), `atan2_lanes()` (lane by lane)

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Mul};

use super::AVX_ALIGNMENT;
use crate::simd::SimdVector;
use crate::transform::PolarMath;

/// Number of f32 elements in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 8;

/// AVX2 SIMD vector containing 8 packed f32 values.
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    pub elements: __m256,
}

impl F32x8 {
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { _mm256_storeu_ps(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    pub fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { _mm256_loadu_ps(lanes.as_ptr()) },
        }
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl PolarMath for F32x8 {
    #[inline(always)]
    fn sqrt_lanes(self) -> Self {
        Self {
            elements: unsafe { _mm256_sqrt_ps(self.elements) },
        }
    }

    /// Lane-wise `atan2(self, x)` through the scalar implementation.
    #[inline(always)]
    fn atan2_lanes(self, x: Self) -> Self {
        let y = self.to_array();
        let x = x.to_array();

        Self::from_array(std::array::from_fn(|lane| y[lane].atan2(x[lane])))
    }

    #[inline(always)]
    fn degrees_per_radian() -> Self {
        Self::splat(f32::degrees_per_radian())
    }
}

impl SimdVector for F32x8 {
    type Scalar = f32;
    type Indices = [u32; LANE_COUNT];

    const LANES: usize = LANE_COUNT;
    const ALIGNMENT: usize = AVX_ALIGNMENT;
    const NAME: &'static str = "f32x8 (avx2)";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm256_set1_ps(value) },
        }
    }

    #[inline(always)]
    fn extract(&self, lane: usize) -> f32 {
        self.to_array()[lane]
    }

    #[inline(always)]
    fn insert(&mut self, lane: usize, value: f32) {
        let mut lanes = self.to_array();
        lanes[lane] = value;
        *self = Self::from_array(lanes);
    }

    #[inline(always)]
    fn indices_from_zero() -> [u32; LANE_COUNT] {
        [0, 1, 2, 3, 4, 5, 6, 7]
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_load_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_aligned(&self, ptr: *mut f32) {
        _mm256_store_ps(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned(&self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.elements)
    }

    /// Deinterleaves `x0 y0 x1 y1 ... x7 y7`.
    ///
    /// `_mm256_shuffle_ps` picks the even (odd) elements of both halves per
    /// 128-bit lane, leaving the 64-bit pairs in order `0 2 1 3`;
    /// `_mm256_permute4x64_pd` restores `0 1 2 3`.
    #[inline(always)]
    unsafe fn load_interleaved(ptr: *const f32) -> (Self, Self) {
        let lo = _mm256_loadu_ps(ptr);
        let hi = _mm256_loadu_ps(ptr.add(LANE_COUNT));

        let even = _mm256_shuffle_ps::<0b10_00_10_00>(lo, hi);
        let odd = _mm256_shuffle_ps::<0b11_01_11_01>(lo, hi);

        let a = _mm256_castpd_ps(_mm256_permute4x64_pd::<0b11_01_10_00>(_mm256_castps_pd(even)));
        let b = _mm256_castpd_ps(_mm256_permute4x64_pd::<0b11_01_10_00>(_mm256_castps_pd(odd)));

        (Self { elements: a }, Self { elements: b })
    }

    /// Interleaves `a` and `b` into `a0 b0 a1 b1 ... a7 b7`.
    #[inline(always)]
    unsafe fn store_interleaved(a: Self, b: Self, ptr: *mut f32) {
        let lo = _mm256_unpacklo_ps(a.elements, b.elements);
        let hi = _mm256_unpackhi_ps(a.elements, b.elements);

        _mm256_storeu_ps(ptr, _mm256_permute2f128_ps::<0x20>(lo, hi));
        _mm256_storeu_ps(ptr.add(LANE_COUNT), _mm256_permute2f128_ps::<0x31>(lo, hi));
    }

    #[inline(always)]
    unsafe fn gather(base: *const f32, indices: &[u32; LANE_COUNT]) -> Self {
        let offsets = _mm256_loadu_si256(indices.as_ptr() as *const __m256i);

        Self {
            elements: _mm256_i32gather_ps::<4>(base, offsets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aligned_and_unaligned_load() {
        let data = crate::simd::utils::AlignedBuffer::<f32>::new(16, AVX_ALIGNMENT);
        let mut data = data;
        for (i, v) in data.iter_mut().enumerate() {
            *v = i as f32;
        }

        let aligned = unsafe { F32x8::load(data.as_ptr()) };
        assert_eq!(aligned.to_array(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        let unaligned = unsafe { F32x8::load(data.as_ptr().add(3)) };
        assert_eq!(unaligned.to_array(), [3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_interleaved_load_splits_fields() {
        let interleaved: Vec<f32> = (0..16)
            .map(|i| if i % 2 == 0 { i as f32 / 2.0 } else { -((i / 2) as f32) })
            .collect();

        let (x, y) = unsafe { F32x8::load_interleaved(interleaved.as_ptr()) };

        assert_eq!(x.to_array(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(y.to_array(), [-0.0, -1.0, -2.0, -3.0, -4.0, -5.0, -6.0, -7.0]);
    }

    #[test]
    fn test_interleaved_store_matches_lane_order() {
        let a = F32x8::from_array([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let b = F32x8::from_array([10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0]);

        let mut out = [0.0f32; 16];
        unsafe { F32x8::store_interleaved(a, b, out.as_mut_ptr()) };

        for lane in 0..LANE_COUNT {
            assert_eq!(out[2 * lane], lane as f32);
            assert_eq!(out[2 * lane + 1], 10.0 + lane as f32);
        }
    }

    #[test]
    fn test_gather_strided_field() {
        let interleaved: Vec<f32> = (0..32).map(|i| i as f32).collect();
        let odd = [1u32, 3, 5, 7, 9, 11, 13, 15];

        let y = unsafe { F32x8::gather(interleaved.as_ptr(), &odd) };
        assert_eq!(y.to_array(), [1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0]);
    }

    #[test]
    fn test_sqrt_and_atan2_lanes() {
        let x = F32x8::from_array([3.0, 1.0, 0.0, -1.0, 3.0, 1.0, 0.0, -1.0]);
        let y = F32x8::from_array([4.0, 0.0, 1.0, 0.0, 4.0, 0.0, 1.0, 0.0]);

        let radius = (x * x + y * y).sqrt_lanes().to_array();
        assert_eq!(radius[0], 5.0);
        assert_eq!(radius[1], 1.0);

        let phi = y.atan2_lanes(x).to_array();
        assert_eq!(phi[1], 0.0);
        assert!((phi[2] - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((phi[3] - std::f32::consts::PI).abs() < 1e-6);
    }
}
