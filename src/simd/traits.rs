use std::fmt::Debug;

use rand::distr::uniform::SampleUniform;

use crate::transform::PolarMath;

/// Element type stored in the benchmark containers.
///
/// Only floating-point types qualify: the polar conversion has no meaning
/// over integer lanes.
pub trait Scalar:
    PolarMath + num::Float + SampleUniform + Default + Debug + Send + Sync + 'static
{
    /// Short type name used in benchmark labels.
    const NAME: &'static str;

    /// Value written to padding slots so they convert to finite results.
    #[inline(always)]
    fn sentinel() -> Self {
        Self::one()
    }

    /// Bounds of the uniform distribution used to seed input coordinates.
    #[inline(always)]
    fn sample_bounds() -> (Self, Self) {
        (-Self::one(), Self::one())
    }
}

impl Scalar for f32 {
    const NAME: &'static str = "f32";
}

impl Scalar for f64 {
    const NAME: &'static str = "f64";
}

/// A fixed-width SIMD register of [`Scalar`] lanes.
///
/// Load and store functions take raw pointers like the hardware intrinsics
/// they wrap; the safe bounds checks live one level up, in the layouts and
/// access strategies that own the memory.
pub trait SimdVector: PolarMath + Debug + Send + Sync + 'static {
    type Scalar: Scalar;

    /// Lane offsets consumed by [`gather`](SimdVector::gather) and
    /// [`scatter`](SimdVector::scatter), one `u32` per lane.
    type Indices: Copy + Debug + PartialEq + AsRef<[u32]> + AsMut<[u32]> + Send + Sync;

    /// Number of lanes (W).
    const LANES: usize;

    /// Byte alignment of aligned loads and stores.
    const ALIGNMENT: usize;

    /// Label used in benchmark names, e.g. `f32x8 (avx2)`.
    const NAME: &'static str;

    /// Broadcasts `value` to every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Reads lane `lane`.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= LANES`.
    fn extract(&self, lane: usize) -> Self::Scalar;

    /// Overwrites lane `lane`.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= LANES`.
    fn insert(&mut self, lane: usize, value: Self::Scalar);

    /// `{0, 1, ..., LANES - 1}`.
    fn indices_from_zero() -> Self::Indices;

    #[inline(always)]
    fn is_aligned(ptr: *const Self::Scalar) -> bool {
        (ptr as usize) % Self::ALIGNMENT == 0
    }

    /// Loads `LANES` elements, choosing the aligned instruction when the
    /// pointer allows it.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANES` elements.
    #[inline(always)]
    unsafe fn load(ptr: *const Self::Scalar) -> Self {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match Self::is_aligned(ptr) {
            true => Self::load_aligned(ptr),
            false => Self::load_unaligned(ptr),
        }
    }

    /// # Safety
    ///
    /// `ptr` must be `ALIGNMENT`-aligned and valid for reads of `LANES` elements.
    unsafe fn load_aligned(ptr: *const Self::Scalar) -> Self;

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `LANES` elements.
    unsafe fn load_unaligned(ptr: *const Self::Scalar) -> Self;

    /// Stores `LANES` elements, choosing the aligned instruction when the
    /// pointer allows it.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `LANES` elements.
    #[inline(always)]
    unsafe fn store(&self, ptr: *mut Self::Scalar) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match Self::is_aligned(ptr) {
            true => self.store_aligned(ptr),
            false => self.store_unaligned(ptr),
        }
    }

    /// # Safety
    ///
    /// `ptr` must be `ALIGNMENT`-aligned and valid for writes of `LANES` elements.
    unsafe fn store_aligned(&self, ptr: *mut Self::Scalar);

    /// # Safety
    ///
    /// `ptr` must be valid for writes of `LANES` elements.
    unsafe fn store_unaligned(&self, ptr: *mut Self::Scalar);

    /// Splits `2 * LANES` interleaved scalars `a0 b0 a1 b1 ...` into
    /// `(a, b)` registers.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `2 * LANES` elements.
    #[inline(always)]
    unsafe fn load_interleaved(ptr: *const Self::Scalar) -> (Self, Self) {
        let mut a = Self::splat(<Self::Scalar as num::Zero>::zero());
        let mut b = Self::splat(<Self::Scalar as num::Zero>::zero());

        for lane in 0..Self::LANES {
            a.insert(lane, *ptr.add(2 * lane));
            b.insert(lane, *ptr.add(2 * lane + 1));
        }

        (a, b)
    }

    /// Writes `a` and `b` back as `2 * LANES` interleaved scalars.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `2 * LANES` elements.
    #[inline(always)]
    unsafe fn store_interleaved(a: Self, b: Self, ptr: *mut Self::Scalar) {
        for lane in 0..Self::LANES {
            *ptr.add(2 * lane) = a.extract(lane);
            *ptr.add(2 * lane + 1) = b.extract(lane);
        }
    }

    /// Loads lane `i` from `base[indices[i]]`.
    ///
    /// # Safety
    ///
    /// Every offset in `indices` must address a readable element of `base`.
    #[inline(always)]
    unsafe fn gather(base: *const Self::Scalar, indices: &Self::Indices) -> Self {
        let mut gathered = Self::splat(<Self::Scalar as num::Zero>::zero());

        for (lane, &offset) in indices.as_ref().iter().enumerate() {
            gathered.insert(lane, *base.add(offset as usize));
        }

        gathered
    }

    /// Stores lane `i` to `base[indices[i]]`.
    ///
    /// # Safety
    ///
    /// Every offset in `indices` must address a writable element of `base`.
    #[inline(always)]
    unsafe fn scatter(&self, base: *mut Self::Scalar, indices: &Self::Indices) {
        for (lane, &offset) in indices.as_ref().iter().enumerate() {
            *base.add(offset as usize) = self.extract(lane);
        }
    }

    /// Copies every lane into a `Vec`.
    fn to_vec(&self) -> Vec<Self::Scalar> {
        (0..Self::LANES).map(|lane| self.extract(lane)).collect()
    }
}
