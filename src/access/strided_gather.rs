use super::{assert_in_bounds, AccessStrategy, GatherStorage, IndexVector, VectorOf};
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Gather/scatter with a fixed offset vector.
///
/// The offsets `{0, S, 2S, ...}` (S = the layout's field stride) are built
/// once and never advance; each access moves the field base pointers to
/// `start` instead. Unlike [`GatherScatterAccess`](super::GatherScatterAccess)
/// the strategy is stateless, so `load`/`store` accept any aligned start in
/// any order.
#[derive(Debug)]
pub struct StridedGatherAccess<L: GatherStorage> {
    layout: L,
    offsets: <L::Vector as SimdVector>::Indices,
}

impl<L: GatherStorage> StridedGatherAccess<L> {
    /// Fixed per-lane offsets, relative to the element at `start`.
    pub fn offsets(&self) -> &[u32] {
        self.offsets.as_ref()
    }

    /// Scalar distance from a field base to the element at `start`.
    #[inline(always)]
    fn field_offset(&self, start: usize) -> usize {
        assert_in_bounds(start, L::Vector::LANES, self.layout.capacity());
        start * L::STRIDE as usize
    }
}

impl<L: GatherStorage> AccessStrategy for StridedGatherAccess<L> {
    type Layout = L;

    const NAME: &'static str = "StridedGather";

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
            offsets: IndexVector::<L::Vector>::from_zero().strided(L::STRIDE),
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
    fn load(&self, start: usize) -> Coordinate<VectorOf<Self>> {
        let offset = self.field_offset(start);
        let [x, y] = self.layout.input_fields();

        // SAFETY: `start + W <= capacity`, so the shifted bases plus the
        // largest lane offset `(W - 1) * STRIDE` stay inside each field.
        unsafe {
            Coordinate::new(
                L::Vector::gather(x.add(offset), &self.offsets),
                L::Vector::gather(y.add(offset), &self.offsets),
            )
        }
    }

    #[inline(always)]
    fn store(&mut self, start: usize, polar: PolarCoordinate<VectorOf<Self>>) {
        let offset = self.field_offset(start);
        let [radius, phi] = self.layout.output_fields();

        // SAFETY: same bound as `load`, on the output fields.
        unsafe {
            polar.radius.scatter(radius.add(offset), &self.offsets);
            polar.phi.scatter(phi.add(offset), &self.offsets);
        }
    }
}
