//! Vector types the benchmarks are instantiated with.
//!
//! The build script selects one instruction set per build (`cfg(avx2)`,
//! `cfg(neon)` or `cfg(fallback)`); [`NativeF32`] and [`NativeF64`] name the
//! widest vector of each element type for that selection. The portable
//! [`portable::Lanes`] vectors are compiled in every configuration.
//!
//! # Compile-time features
//!
//! An instruction set is selected only when the compile target enables it
//! (`CARGO_CFG_TARGET_FEATURE`), not merely when the build host supports it.
//! Intrinsics such as `_mm256_add_ps` are `#[target_feature]` functions: in a
//! crate compiled without `avx2` they cannot inline and every call becomes an
//! out-of-line function call. The repository's `.cargo/config.toml` builds
//! with `-C target-cpu=native`, so an AVX2 host gets the AVX2 vectors:
//!
//! ```bash
//! cargo bench --bench memory_layout
//! # or explicitly, when RUSTFLAGS overrides the config file
//! RUSTFLAGS="-C target-cpu=native" cargo run --release -- --size 1024
//! ```

use std::sync::OnceLock;

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

pub mod portable;
pub mod traits;
pub mod utils;

pub use traits::{Scalar, SimdVector};

#[cfg(avx2)]
pub type NativeF32 = avx2::F32x8;
#[cfg(avx2)]
pub type NativeF64 = avx2::F64x4;

#[cfg(neon)]
pub type NativeF32 = neon::F32x4;
#[cfg(neon)]
pub type NativeF64 = portable::F64x2;

#[cfg(not(any(avx2, neon)))]
pub type NativeF32 = portable::F32x4;
#[cfg(not(any(avx2, neon)))]
pub type NativeF64 = portable::F64x2;

/// Instruction set the vector types were compiled for.
pub const COMPILED_ISA: &str = if cfg!(avx2) {
    "avx2"
} else if cfg!(neon) {
    "neon"
} else {
    "fallback"
};

/// SIMD capabilities of the running CPU.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    pub avx: bool,
    pub avx2: bool,
    pub avx512f: bool,
    pub neon: bool,
}

impl CpuFeatures {
    fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            Self {
                avx: std::is_x86_feature_detected!("avx"),
                avx2: std::is_x86_feature_detected!("avx2"),
                avx512f: std::is_x86_feature_detected!("avx512f"),
                neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                neon: std::arch::is_aarch64_feature_detected!("neon"),
                ..Self::default()
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    /// Whether the running CPU can execute the compiled vector code.
    pub fn supports_compiled_isa(&self) -> bool {
        match COMPILED_ISA {
            "avx2" => self.avx2,
            "neon" => self.neon,
            _ => true,
        }
    }
}

/// Runtime CPU features, probed on first use and cached for the process.
pub fn cpu_features() -> &'static CpuFeatures {
    static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

    FEATURES.get_or_init(|| {
        let features = CpuFeatures::detect();
        log::info!("detected {features:?}, compiled for {COMPILED_ISA}");
        features
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_widths_match_register_size() {
        let f32_bytes = NativeF32::LANES * std::mem::size_of::<f32>();
        let f64_bytes = NativeF64::LANES * std::mem::size_of::<f64>();

        assert_eq!(f32_bytes, f64_bytes, "native vectors must share a register width");
        assert!(f32_bytes == 16 || f32_bytes == 32);
    }

    #[test]
    fn test_selected_isa_is_enabled_at_compile_time() {
        if cfg!(avx2) {
            assert!(cfg!(target_feature = "avx2"), "avx2 vectors without avx2 codegen");
        }
        if cfg!(neon) {
            assert!(cfg!(target_feature = "neon"), "neon vectors without neon codegen");
        }
    }

    #[test]
    fn test_cpu_features_are_cached() {
        let first = cpu_features() as *const CpuFeatures;
        let second = cpu_features() as *const CpuFeatures;
        assert_eq!(first, second);
    }

    #[test]
    fn test_running_cpu_supports_compiled_isa() {
        assert!(cpu_features().supports_compiled_isa());
    }
}
