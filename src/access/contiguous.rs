use super::{assert_in_bounds, AccessStrategy, VectorOf};
use crate::layout::{Aos, Aovs, Layout, Soa};
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Layouts that keep W consecutive logical elements in one contiguous run,
/// so a register pair moves with bulk instructions.
pub trait ContiguousStorage: Layout {
    /// Label of the bulk mechanism, e.g. `Interleaved` for AoS.
    const METHOD: &'static str;

    /// Reads `[start, start + W)`. `start + W <= capacity` must hold.
    fn load_block(&self, start: usize) -> Coordinate<Self::Vector>;

    /// Writes `[start, start + W)`. `start + W <= capacity` must hold.
    fn store_block(&mut self, start: usize, polar: PolarCoordinate<Self::Vector>);
}

/// AoS records are deinterleaved on load and reinterleaved on store.
impl<V: SimdVector> ContiguousStorage for Aos<V> {
    const METHOD: &'static str = "Interleaved";

    #[inline(always)]
    fn load_block(&self, start: usize) -> Coordinate<V> {
        assert_in_bounds(start, V::LANES, self.capacity());

        // SAFETY: the input buffer holds 2 * capacity scalars and
        // 2 * (start + W) <= 2 * capacity.
        let (x, y) = unsafe { V::load_interleaved(self.input_scalars().add(2 * start)) };
        Coordinate::new(x, y)
    }

    #[inline(always)]
    fn store_block(&mut self, start: usize, polar: PolarCoordinate<V>) {
        assert_in_bounds(start, V::LANES, self.capacity());

        // SAFETY: same bound as `load_block`, on the output buffer.
        unsafe {
            V::store_interleaved(polar.radius, polar.phi, self.output_scalars().add(2 * start));
        }
    }
}

/// SoA fields are loaded and stored straight from their own arrays.
impl<V: SimdVector> ContiguousStorage for Soa<V> {
    const METHOD: &'static str = "LoadStore";

    #[inline(always)]
    fn load_block(&self, start: usize) -> Coordinate<V> {
        assert_in_bounds(start, V::LANES, self.capacity());

        // SAFETY: every field buffer holds `capacity` scalars.
        unsafe {
            Coordinate::new(
                V::load(self.x.as_ptr().add(start)),
                V::load(self.y.as_ptr().add(start)),
            )
        }
    }

    #[inline(always)]
    fn store_block(&mut self, start: usize, polar: PolarCoordinate<V>) {
        assert_in_bounds(start, V::LANES, self.capacity());

        // SAFETY: every field buffer holds `capacity` scalars.
        unsafe {
            polar.radius.store(self.radius.as_mut_ptr().add(start));
            polar.phi.store(self.phi.as_mut_ptr().add(start));
        }
    }
}

/// AoVS blocks already are register pairs; the block at `start / W` is copied
/// whole.
impl<V: SimdVector> ContiguousStorage for Aovs<V> {
    const METHOD: &'static str = "Block";

    #[inline(always)]
    fn load_block(&self, start: usize) -> Coordinate<V> {
        debug_assert_eq!(start % V::LANES, 0, "Block access must start on a block boundary");
        self.input[start / V::LANES]
    }

    #[inline(always)]
    fn store_block(&mut self, start: usize, polar: PolarCoordinate<V>) {
        debug_assert_eq!(start % V::LANES, 0, "Block access must start on a block boundary");
        self.output[start / V::LANES] = polar;
    }
}

/// Bulk vector loads and stores, one instruction sequence per field.
#[derive(Debug)]
pub struct ContiguousAccess<L: ContiguousStorage> {
    layout: L,
}

impl<L: ContiguousStorage> AccessStrategy for ContiguousAccess<L> {
    type Layout = L;

    const NAME: &'static str = L::METHOD;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            layout: L::with_capacity(capacity),
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
        self.layout.load_block(start)
    }

    #[inline(always)]
    fn store(&mut self, start: usize, polar: PolarCoordinate<VectorOf<Self>>) {
        self.layout.store_block(start, polar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::portable::F32x4;

    #[test]
    fn test_method_names() {
        assert_eq!(ContiguousAccess::<Aos<F32x4>>::NAME, "Interleaved");
        assert_eq!(ContiguousAccess::<Soa<F32x4>>::NAME, "LoadStore");
        assert_eq!(ContiguousAccess::<Aovs<F32x4>>::NAME, "Block");
    }

    #[test]
    fn test_aos_store_interleaves_records() {
        let mut access = ContiguousAccess::<Aos<F32x4>>::with_capacity(8);
        let radius = F32x4::from_array([1.0, 2.0, 3.0, 4.0]);
        let phi = F32x4::from_array([10.0, 20.0, 30.0, 40.0]);

        access.store(4, PolarCoordinate::new(radius, phi));

        let layout = access.layout();
        assert_eq!(layout.polar_coordinate(3), PolarCoordinate::new(0.0, 0.0));
        assert_eq!(layout.polar_coordinate(4), PolarCoordinate::new(1.0, 10.0));
        assert_eq!(layout.polar_coordinate(7), PolarCoordinate::new(4.0, 40.0));
    }
}
