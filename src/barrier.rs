//! Optimization barriers for the register-only baseline.
//!
//! Without them the compiler would hoist the conversion of a loop-invariant
//! register out of the timed loop.

use std::hint::black_box;

/// Makes the compiler assume `value` may have been rewritten.
#[inline(always)]
pub fn fake_memory_modification<T>(value: &mut T) {
    black_box(value);
}

/// Makes the compiler assume `value` is read.
#[inline(always)]
pub fn do_not_optimize<T>(value: &T) {
    black_box(value);
}
