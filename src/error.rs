//! Error types for benchmark configuration.
//!
//! The measured hot path (layouts, access strategies, tail handling and the
//! driver loop) has no recoverable failures. Errors only arise while turning
//! user input into a runnable benchmark plan.

use thiserror::Error;

/// Errors that can occur while configuring benchmark runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutBenchError {
    /// An input size of zero was requested.
    #[error("Invalid input size: {size} (input size must be a positive element count)")]
    InvalidInputSize {
        /// The rejected size.
        size: usize,
    },
    /// A size range with its bounds out of order or starting at zero.
    #[error("Invalid size range: {low}..={high} (bounds must satisfy 0 < low <= high)")]
    InvalidRange {
        /// Lower bound of the range.
        low: usize,
        /// Upper bound of the range.
        high: usize,
    },
    /// The benchmark filter did not match any registered combination.
    #[error("No benchmark matches filter '{filter}' ({available} registered)")]
    NoMatchingBenchmark {
        /// The filter text that was applied.
        filter: String,
        /// Number of registered benchmarks.
        available: usize,
    },
    /// A timing budget that cannot run a single iteration.
    #[error("Invalid iteration budget: {message}")]
    InvalidBudget {
        /// Human-readable error message.
        message: String,
    },
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, LayoutBenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_size_display() {
        let error = LayoutBenchError::InvalidInputSize { size: 0 };
        let display = format!("{error}");
        assert!(display.contains("Invalid input size"));
        assert!(display.contains("0"));
    }

    #[test]
    fn test_invalid_range_display() {
        let error = LayoutBenchError::InvalidRange { low: 64, high: 8 };
        let display = format!("{error}");
        assert!(display.contains("Invalid size range"));
        assert!(display.contains("64..=8"));
    }

    #[test]
    fn test_no_matching_benchmark_display() {
        let error = LayoutBenchError::NoMatchingBenchmark {
            filter: "AoVS/Gather".to_string(),
            available: 42,
        };
        let display = format!("{error}");
        assert!(display.contains("'AoVS/Gather'"));
        assert!(display.contains("42 registered"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = LayoutBenchError::InvalidBudget {
            message: "zero iterations".to_string(),
        };

        let _: &dyn std::error::Error = &error;
        assert!(std::error::Error::source(&error).is_none());
    }
}
