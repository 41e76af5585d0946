//! AVX2 4-lane f64 vector.
//!
//! `F64x4` wraps an `__m256d` register with the same operation set as
//! [`F32x8`](super::F32x8), at half the lane count.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: AVX2 (the gather instruction is AVX2-only; the rest is AVX)
//! - **Compilation**: built only when the compile target enables AVX2
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (4 × f64)
//! - **Interleaved access**: `vunpcklpd`/`vunpckhpd` operate within 128-bit
//!   halves, so deinterleaving needs a cross-lane `vpermpd` afterwards and
//!   reinterleaving a `vperm2f128`
//! - **Gather**: `vgatherdpd` takes four 32-bit indices from an `__m128i`
//! - **Scatter**: emulated with four scalar stores

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Mul};

use super::AVX_ALIGNMENT;
use crate::simd::SimdVector;
use crate::transform::PolarMath;

/// Number of f64 elements in a 256-bit register.
pub(crate) const LANE_COUNT: usize = 4;

/// AVX2 SIMD vector containing 4 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x4 {
    pub elements: __m256d,
}

impl F64x4 {
    #[inline(always)]
    pub fn to_array(self) -> [f64; LANE_COUNT] {
        let mut lanes = [0.0f64; LANE_COUNT];
        unsafe { _mm256_storeu_pd(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    pub fn from_array(lanes: [f64; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { _mm256_loadu_pd(lanes.as_ptr()) },
        }
    }
}

impl Add for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_pd(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_pd(self.elements, rhs.elements) },
        }
    }
}

impl PolarMath for F64x4 {
    #[inline(always)]
    fn sqrt_lanes(self) -> Self {
        Self {
            elements: unsafe { _mm256_sqrt_pd(self.elements) },
        }
    }

    #[inline(always)]
    fn atan2_lanes(self, x: Self) -> Self {
        let y = self.to_array();
        let x = x.to_array();

        Self::from_array(std::array::from_fn(|lane| y[lane].atan2(x[lane])))
    }

    #[inline(always)]
    fn degrees_per_radian() -> Self {
        Self::splat(f64::degrees_per_radian())
    }
}

impl SimdVector for F64x4 {
    type Scalar = f64;
    type Indices = [u32; LANE_COUNT];

    const LANES: usize = LANE_COUNT;
    const ALIGNMENT: usize = AVX_ALIGNMENT;
    const NAME: &'static str = "f64x4 (avx2)";

    #[inline(always)]
    fn splat(value: f64) -> Self {
        Self {
            elements: unsafe { _mm256_set1_pd(value) },
        }
    }

    #[inline(always)]
    fn extract(&self, lane: usize) -> f64 {
        self.to_array()[lane]
    }

    #[inline(always)]
    fn insert(&mut self, lane: usize, value: f64) {
        let mut lanes = self.to_array();
        lanes[lane] = value;
        *self = Self::from_array(lanes);
    }

    #[inline(always)]
    fn indices_from_zero() -> [u32; LANE_COUNT] {
        [0, 1, 2, 3]
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self {
        Self {
            elements: _mm256_load_pd(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self {
        Self {
            elements: _mm256_loadu_pd(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_aligned(&self, ptr: *mut f64) {
        _mm256_store_pd(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned(&self, ptr: *mut f64) {
        _mm256_storeu_pd(ptr, self.elements)
    }

    /// Deinterleaves `x0 y0 x1 y1 x2 y2 x3 y3`.
    ///
    /// `unpacklo`/`unpackhi` produce `x0 x2 | x1 x3` and `y0 y2 | y1 y3`;
    /// one cross-lane permute puts them back in order.
    #[inline(always)]
    unsafe fn load_interleaved(ptr: *const f64) -> (Self, Self) {
        let lo = _mm256_loadu_pd(ptr);
        let hi = _mm256_loadu_pd(ptr.add(LANE_COUNT));

        let even = _mm256_unpacklo_pd(lo, hi);
        let odd = _mm256_unpackhi_pd(lo, hi);

        (
            Self {
                elements: _mm256_permute4x64_pd::<0b11_01_10_00>(even),
            },
            Self {
                elements: _mm256_permute4x64_pd::<0b11_01_10_00>(odd),
            },
        )
    }

    #[inline(always)]
    unsafe fn store_interleaved(a: Self, b: Self, ptr: *mut f64) {
        let lo = _mm256_unpacklo_pd(a.elements, b.elements);
        let hi = _mm256_unpackhi_pd(a.elements, b.elements);

        _mm256_storeu_pd(ptr, _mm256_permute2f128_pd::<0x20>(lo, hi));
        _mm256_storeu_pd(ptr.add(LANE_COUNT), _mm256_permute2f128_pd::<0x31>(lo, hi));
    }

    #[inline(always)]
    unsafe fn gather(base: *const f64, indices: &[u32; LANE_COUNT]) -> Self {
        let offsets = _mm_loadu_si128(indices.as_ptr() as *const __m128i);

        Self {
            elements: _mm256_i32gather_pd::<8>(base, offsets),
        }
    }
}
