//! ARM NEON vectors for 128-bit registers.
//!
//! Compiled when the build script selects `cfg(neon)` (every AArch64 host).
//! NEON has structure loads (`vld2q`/`vst2q`) that deinterleave (x, y) pairs
//! in one instruction, but no gather or scatter: indexed access stays lane by
//! lane.

pub mod f32x4;

pub use f32x4::F32x4;

/// NEON memory alignment requirement in bytes.
pub(crate) const NEON_ALIGNMENT: usize = 16;
