//! AVX2 vectors for 256-bit registers.
//!
//! Compiled when the compile target enables AVX2 (`cfg(avx2)`, emitted by
//! the build script from `CARGO_CFG_TARGET_FEATURE`). A host that supports
//! AVX2 but is built without `-C target-cpu=native` or
//! `-C target-feature=+avx2` falls back to the portable vectors.
//!
//! # Available Types
//!
//! - [`F32x8`]: 8 packed single-precision lanes (`__m256`)
//! - [`F64x4`]: 4 packed double-precision lanes (`__m256d`)
//!
//! Both use the hardware `vgather` instructions for indexed loads. AVX2 has
//! no scatter instruction, so indexed stores fall back to one scalar store
//! per lane.

pub mod f32x8;
pub mod f64x4;

pub use f32x8::F32x8;
pub use f64x4::F64x4;

/// AVX2 memory alignment requirement in bytes.
pub(crate) const AVX_ALIGNMENT: usize = 32;
