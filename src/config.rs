//! Run configuration: which input sizes, which seed, which benchmarks.

use std::time::Duration;

use crate::error::{LayoutBenchError, Result};

/// Input sizes probing each level of the cache hierarchy (f32 footprint of
/// the input container in the comments).
pub const DEFAULT_SIZES: &[usize] = &[
    13,        // not a multiple of any vector width
    1_024,     // 8 KiB - L1 cache
    16_384,    // 128 KiB - L1→L2 transition
    262_144,   // 2 MiB - L2/L3
    1_048_576, // 8 MiB - L3 cache
    4_194_304, // 32 MiB - L3→RAM transition
];

pub const DEFAULT_SEED: u64 = 42;

/// Step factor of [`size_range`].
pub const RANGE_MULTIPLIER: usize = 8;

pub const DEFAULT_MIN_TIME: Duration = Duration::from_millis(200);

pub const DEFAULT_MIN_ITERATIONS: u64 = 10;

/// `low`, every power of [`RANGE_MULTIPLIER`] strictly between the bounds,
/// then `high`.
///
/// ```rust
/// use layoutbench::config::size_range;
///
/// assert_eq!(size_range(1, 1000).unwrap(), vec![1, 8, 64, 512, 1000]);
/// ```
pub fn size_range(low: usize, high: usize) -> Result<Vec<usize>> {
    if low == 0 || low > high {
        return Err(LayoutBenchError::InvalidRange { low, high });
    }

    let mut sizes = vec![low];
    let mut power = 1usize;
    while let Some(next) = power.checked_mul(RANGE_MULTIPLIER) {
        power = next;
        if power >= high {
            break;
        }
        if power > low {
            sizes.push(power);
        }
    }
    if high != low {
        sizes.push(high);
    }

    Ok(sizes)
}

/// Validated settings for one run over the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    pub seed: u64,
    /// Substring a benchmark name must contain.
    pub filter: Option<String>,
    /// Free-form tag printed with every result line.
    pub label: Option<String>,
    pub min_time: Duration,
    pub min_iterations: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            seed: DEFAULT_SEED,
            filter: None,
            label: None,
            min_time: DEFAULT_MIN_TIME,
            min_iterations: DEFAULT_MIN_ITERATIONS,
        }
    }
}

impl BenchConfig {
    /// Rejects empty or zero sizes and budgets that cannot run an iteration.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(LayoutBenchError::InvalidInputSize { size: 0 });
        }
        if let Some(&size) = self.sizes.iter().find(|&&size| size == 0) {
            return Err(LayoutBenchError::InvalidInputSize { size });
        }
        if self.min_iterations == 0 {
            return Err(LayoutBenchError::InvalidBudget {
                message: "at least one iteration is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Human-readable byte size of `elements` values of `bytes_per_element`.
pub fn format_size(elements: usize, bytes_per_element: usize) -> String {
    let bytes = elements * bytes_per_element;
    if bytes >= 1_073_741_824 {
        format!("{:.1} GiB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.1} MiB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_range_powers_of_eight() {
        assert_eq!(size_range(1, 4096).unwrap(), vec![1, 8, 64, 512, 4096]);
        assert_eq!(size_range(10, 100).unwrap(), vec![10, 64, 100]);
        assert_eq!(size_range(5, 7).unwrap(), vec![5, 7]);
    }

    #[test]
    fn test_size_range_single_value() {
        assert_eq!(size_range(64, 64).unwrap(), vec![64]);
    }

    #[test]
    fn test_size_range_rejects_bad_bounds() {
        assert_eq!(
            size_range(0, 10),
            Err(LayoutBenchError::InvalidRange { low: 0, high: 10 })
        );
        assert_eq!(
            size_range(9, 3),
            Err(LayoutBenchError::InvalidRange { low: 9, high: 3 })
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = BenchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = BenchConfig {
            sizes: vec![16, 0],
            ..BenchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(LayoutBenchError::InvalidInputSize { size: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = BenchConfig {
            min_iterations: 0,
            ..BenchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutBenchError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(13, 4), "52 B");
        assert_eq!(format_size(1_024, 4), "4.0 KiB");
        assert_eq!(format_size(1_048_576, 8), "8.0 MiB");
    }
}
