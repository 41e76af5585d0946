//! Handling of the `inputSize mod W` elements that do not fill a register.
//!
//! A [`TailPolicy`] is chosen at compile time; [`TailPlan`] turns it into the
//! concrete index ranges the driver iterates:
//!
//! | policy       | container size          | scalar remainder           |
//! |--------------|-------------------------|----------------------------|
//! | [`Padding`]  | `ceil(input / W) * W`   | none                       |
//! | [`RestScalar`] | `input - input mod W` | `[container, input)`       |

use std::iter::StepBy;
use std::ops::Range;

/// Compile-time choice of tail handling.
pub trait TailPolicy {
    /// Whether the remainder runs through the scalar path instead of padding.
    const USE_REST_SCALAR: bool;

    const NAME: &'static str;

    #[inline(always)]
    fn plan(input_size: usize, lanes: usize) -> TailPlan {
        TailPlan::new(input_size, lanes, Self::USE_REST_SCALAR)
    }
}

/// Round the container up to whole registers and fill the extra slots with
/// sentinel values.
#[derive(Copy, Clone, Debug, Default)]
pub struct Padding;

/// Vectorize the aligned prefix and convert the remainder one element at a
/// time.
#[derive(Copy, Clone, Debug, Default)]
pub struct RestScalar;

impl TailPolicy for Padding {
    const USE_REST_SCALAR: bool = false;
    const NAME: &'static str = "Padding";
}

impl TailPolicy for RestScalar {
    const USE_REST_SCALAR: bool = true;
    const NAME: &'static str = "RestScalar";
}

/// Sizes derived from an input size, a vector width and a tail policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TailPlan {
    /// Exact number of logical elements requested.
    pub input_size: usize,
    /// Elements left for the scalar path (always 0 under padding).
    pub missing_size: usize,
    /// Elements covered by the vectorized loop; a multiple of `lanes`.
    pub container_size: usize,
    /// Vector width W.
    pub lanes: usize,
}

impl TailPlan {
    /// # Panics
    ///
    /// Panics if `lanes` is zero.
    pub fn new(input_size: usize, lanes: usize, use_rest_scalar: bool) -> Self {
        assert!(lanes > 0, "Vector width must be positive");

        let missing_size = if use_rest_scalar { input_size % lanes } else { 0 };
        let container_size = if use_rest_scalar {
            input_size - missing_size
        } else {
            input_size.div_ceil(lanes) * lanes
        };

        Self {
            input_size,
            missing_size,
            container_size,
            lanes,
        }
    }

    /// Number of elements to allocate: `container_size + missing_size`.
    #[inline(always)]
    pub fn allocation_size(&self) -> usize {
        self.container_size + self.missing_size
    }

    /// Start index of every vectorized iteration.
    #[inline(always)]
    pub fn vector_starts(&self) -> StepBy<Range<usize>> {
        (0..self.container_size).step_by(self.lanes)
    }

    /// Number of vectorized iterations.
    #[inline(always)]
    pub fn vector_iterations(&self) -> usize {
        self.container_size / self.lanes
    }

    /// Indices converted by the scalar path.
    #[inline(always)]
    pub fn scalar_range(&self) -> Range<usize> {
        (self.input_size - self.missing_size)..self.input_size
    }

    /// Synthetic slots past the input that receive sentinel values.
    #[inline(always)]
    pub fn padding_range(&self) -> Range<usize> {
        self.input_size.min(self.container_size)..self.container_size
    }
}
