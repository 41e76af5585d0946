//! ARM NEON 4-lane f32 vector.
//!
//! `F32x4` wraps a `float32x4_t` register.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: every AArch64 core (Advanced SIMD is mandatory)
//! - **Compilation**: `neon` is part of the default AArch64 target features
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 128 bits (4 × f32)
//! - **Memory Alignment**: `vld1q`/`vst1q` accept any alignment, so the
//!   aligned and unaligned entry points compile to the same instruction
//! - **Interleaved access**: `vld2q_f32`/`vst2q_f32` split and merge
//!   `[x0 y0 x1 y1 ...]` in a single structure load or store
//! - **Gather/Scatter**: no hardware support; the trait defaults move one
//!   lane at a time

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, Mul};

use super::NEON_ALIGNMENT;
use crate::simd::SimdVector;
use crate::transform::PolarMath;

pub(crate) const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl F32x4 {
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut lanes = [0.0f32; LANE_COUNT];
        unsafe { vst1q_f32(lanes.as_mut_ptr(), self.elements) };
        lanes
    }

    #[inline(always)]
    pub fn from_array(lanes: [f32; LANE_COUNT]) -> Self {
        Self {
            elements: unsafe { vld1q_f32(lanes.as_ptr()) },
        }
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}

impl PolarMath for F32x4 {
    #[inline(always)]
    fn sqrt_lanes(self) -> Self {
        Self {
            elements: unsafe { vsqrtq_f32(self.elements) },
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
        Self::splat(f32::degrees_per_radian())
    }
}

impl SimdVector for F32x4 {
    type Scalar = f32;
    type Indices = [u32; LANE_COUNT];

    const LANES: usize = LANE_COUNT;
    const ALIGNMENT: usize = NEON_ALIGNMENT;
    const NAME: &'static str = "f32x4 (neon)";

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { vdupq_n_f32(value) },
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
        [0, 1, 2, 3]
    }

    // NEON loads have no alignment requirement
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> Self {
        Self {
            elements: vld1q_f32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self {
        Self {
            elements: vld1q_f32(ptr),
        }
    }

    #[inline(always)]
    unsafe fn store_aligned(&self, ptr: *mut f32) {
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn store_unaligned(&self, ptr: *mut f32) {
        vst1q_f32(ptr, self.elements)
    }

    #[inline(always)]
    unsafe fn load_interleaved(ptr: *const f32) -> (Self, Self) {
        let pair = vld2q_f32(ptr);
        (Self { elements: pair.0 }, Self { elements: pair.1 })
    }

    #[inline(always)]
    unsafe fn store_interleaved(a: Self, b: Self, ptr: *mut f32) {
        vst2q_f32(ptr, float32x4x2_t(a.elements, b.elements))
    }
}
