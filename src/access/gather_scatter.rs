use std::fmt;

use super::{assert_in_bounds, AccessStrategy, VectorOf};
use crate::layout::{Aos, Layout, Soa};
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Running lane indices for gather/scatter: lane `i` addresses logical
/// element `base + i`.
///
/// Starts at `{0, 1, ..., W - 1}`, is reset at the start of every timed
/// iteration and advances by W after every store, so a sweep over
/// `container / W` iterations visits each index of `[0, container)` once.
pub struct IndexVector<V: SimdVector> {
    lanes: V::Indices,
    base: usize,
}

impl<V: SimdVector> IndexVector<V> {
    pub fn from_zero() -> Self {
        Self {
            lanes: V::indices_from_zero(),
            base: 0,
        }
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        self.lanes = V::indices_from_zero();
        self.base = 0;
    }

    /// Adds W to every lane.
    #[inline(always)]
    pub fn advance(&mut self) {
        let step = V::LANES as u32;
        for lane in self.lanes.as_mut() {
            *lane += step;
        }
        self.base += V::LANES;
    }

    /// Logical index held by lane 0.
    #[inline(always)]
    pub fn base(&self) -> usize {
        self.base
    }

    #[inline(always)]
    pub fn lanes(&self) -> &[u32] {
        self.lanes.as_ref()
    }

    /// Physical offsets `index * stride` for a field with `stride` scalars
    /// between consecutive elements.
    #[inline(always)]
    pub fn strided(&self, stride: u32) -> V::Indices {
        let mut offsets = self.lanes;
        if stride != 1 {
            for offset in offsets.as_mut() {
                *offset *= stride;
            }
        }
        offsets
    }
}

impl<V: SimdVector> Clone for IndexVector<V> {
    fn clone(&self) -> Self {
        Self {
            lanes: self.lanes,
            base: self.base,
        }
    }
}

impl<V: SimdVector> fmt::Debug for IndexVector<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexVector")
            .field("lanes", &self.lanes)
            .field("base", &self.base)
            .finish()
    }
}

/// Layouts whose fields sit at a fixed scalar stride, addressable by
/// `field_base + index * STRIDE`.
pub trait GatherStorage: Layout {
    /// Scalars between consecutive elements of one field.
    const STRIDE: u32;

    /// Base pointers of the `x` and `y` input fields.
    fn input_fields(&self) -> [*const <Self::Vector as SimdVector>::Scalar; 2];

    /// Base pointers of the `radius` and `phi` output fields.
    fn output_fields(&mut self) -> [*mut <Self::Vector as SimdVector>::Scalar; 2];
}

/// AoS fields interleave: `x` at even scalar offsets, `y` at odd ones.
impl<V: SimdVector> GatherStorage for Aos<V> {
    const STRIDE: u32 = 2;

    #[inline(always)]
    fn input_fields(&self) -> [*const V::Scalar; 2] {
        let base = self.input_scalars();
        // empty buffers never reach a gather, so the offset base may dangle
        [base, base.wrapping_add(1)]
    }

    #[inline(always)]
    fn output_fields(&mut self) -> [*mut V::Scalar; 2] {
        let base = self.output_scalars();
        [base, base.wrapping_add(1)]
    }
}

impl<V: SimdVector> GatherStorage for Soa<V> {
    const STRIDE: u32 = 1;

    #[inline(always)]
    fn input_fields(&self) -> [*const V::Scalar; 2] {
        [self.x.as_ptr(), self.y.as_ptr()]
    }

    #[inline(always)]
    fn output_fields(&mut self) -> [*mut V::Scalar; 2] {
        [self.radius.as_mut_ptr(), self.phi.as_mut_ptr()]
    }
}

/// Indexed vector loads and stores driven by an [`IndexVector`].
///
/// The strategy is stateful: the `start` passed to `load`/`store` must follow
/// the sweep order `0, W, 2W, ...` that the driver produces after
/// [`setup_loop`](AccessStrategy::setup_loop).
#[derive(Debug)]
pub struct GatherScatterAccess<L: GatherStorage> {
    layout: L,
    indices: IndexVector<L::Vector>,
}

impl<L: GatherStorage> GatherScatterAccess<L> {
    /// Current index vector.
    pub fn indices(&self) -> &IndexVector<L::Vector> {
        &self.indices
    }

    #[inline(always)]
    fn check_cursor(&self, start: usize) {
        debug_assert_eq!(
            start,
            self.indices.base(),
            "Gather/scatter sweep out of order"
        );
        assert_in_bounds(self.indices.base(), L::Vector::LANES, self.layout.capacity());
    }
}

impl<L: GatherStorage> AccessStrategy for GatherScatterAccess<L> {
    type Layout = L;

    const NAME: &'static str = "GatherScatter";

    /// # Panics
    ///
    /// Panics if the largest physical offset does not fit in a signed 32-bit lane.
    fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity.saturating_mul(L::STRIDE as usize) <= i32::MAX as usize,
            "Capacity {capacity} too large for 32-bit gather indices"
        );

        Self {
            layout: L::with_capacity(capacity),
            indices: IndexVector::from_zero(),
        }
    }

    #[inline(always)]
    fn layout(&self) -> &L {
        &self.layout
    }

    #[inline(always)]
    fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    #[inline(always)]
    fn setup_loop(&mut self) {
        self.indices.reset();
    }

    #[inline(always)]
    fn load(&self, start: usize) -> Coordinate<VectorOf<Self>> {
        self.check_cursor(start);

        let offsets = self.indices.strided(L::STRIDE);
        let [x, y] = self.layout.input_fields();

        // SAFETY: every lane index is below `base + W <= capacity`, so every
        // offset addresses an element of its field.
        unsafe {
            Coordinate::new(
                L::Vector::gather(x, &offsets),
                L::Vector::gather(y, &offsets),
            )
        }
    }

    #[inline(always)]
    fn store(&mut self, start: usize, polar: PolarCoordinate<VectorOf<Self>>) {
        self.check_cursor(start);

        let offsets = self.indices.strided(L::STRIDE);
        let [radius, phi] = self.layout.output_fields();

        // SAFETY: same bound as `load`, on the output fields.
        unsafe {
            polar.radius.scatter(radius, &offsets);
            polar.phi.scatter(phi, &offsets);
        }

        self.indices.advance();
    }
}
