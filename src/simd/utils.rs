use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

/// A fixed-length buffer whose storage is aligned for vector loads.
///
/// `Vec<T>` only guarantees `align_of::<T>()`, which is too weak for aligned
/// 256-bit loads of `f32` data. This container owns a single allocation made
/// with the requested alignment, releases it with the same [`Layout`] on drop,
/// and derefs to a plain slice for scalar access.
///
/// # Memory Safety
///
/// - Every element is initialized to `T::default()` on construction
/// - The buffer never grows or shrinks after construction
/// - Allocation failure goes through [`handle_alloc_error`]
pub struct AlignedBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
}

impl<T: Copy + Default> AlignedBuffer<T> {
    /// Allocates `len` default-initialized elements aligned to `align` bytes.
    ///
    /// The effective alignment is the larger of `align` and `align_of::<T>()`.
    ///
    /// # Panics
    ///
    /// * If `align` is not a power of two.
    /// * If `len * size_of::<T>()` overflows.
    pub fn new(len: usize, align: usize) -> Self {
        let align = align.max(std::mem::align_of::<T>());

        let size_bytes = match len.checked_mul(std::mem::size_of::<T>()) {
            Some(s) => s,
            None => panic!("Total size calculation overflowed for buffer of len {len}"),
        };

        let layout = match Layout::from_size_align(size_bytes, align) {
            Ok(l) => l,
            Err(_) => panic!("Failed to create Layout with size {size_bytes} and alignment {align}"),
        };

        if size_bytes == 0 {
            return Self {
                ptr: NonNull::dangling(),
                len,
                layout,
            };
        }

        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc(layout) as *mut T };

        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        };

        for i in 0..len {
            // SAFETY: `i < len` and the allocation holds `len` elements.
            unsafe { ptr.as_ptr().add(i).write(T::default()) };
        }

        Self { ptr, len, layout }
    }
}

impl<T> AlignedBuffer<T> {
    /// Alignment the buffer was allocated with, in bytes.
    #[inline(always)]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // SAFETY: allocated in `new` with exactly this layout.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

impl<T> Deref for AlignedBuffer<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        // SAFETY: `ptr` is valid for `len` initialized elements (or dangling with len 0).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for AlignedBuffer<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("align", &self.layout.align())
            .finish()
    }
}

// SAFETY: the buffer uniquely owns its elements, like `Vec<T>`.
unsafe impl<T: Send> Send for AlignedBuffer<T> {}
unsafe impl<T: Sync> Sync for AlignedBuffer<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_aligned_and_zeroed() {
        let buffer = AlignedBuffer::<f32>::new(37, 64);

        assert_eq!(buffer.len(), 37);
        assert_eq!(buffer.as_ptr() as usize % 64, 0);
        assert_eq!(buffer.alignment(), 64);
        assert!(buffer.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_alignment_never_below_natural() {
        let buffer = AlignedBuffer::<f64>::new(4, 1);
        assert_eq!(buffer.alignment(), std::mem::align_of::<f64>());
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AlignedBuffer::<f64>::new(0, 32);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_writes_through_deref_mut() {
        let mut buffer = AlignedBuffer::<f64>::new(8, 32);
        buffer[3] = 2.5;
        buffer[7] = -1.0;

        assert_eq!(buffer[3], 2.5);
        assert_eq!(buffer[7], -1.0);
        assert_eq!(buffer.iter().sum::<f64>(), 1.5);
    }

    #[test]
    #[should_panic]
    fn test_non_power_of_two_alignment_panics() {
        let _ = AlignedBuffer::<f32>::new(8, 24);
    }
}
