use super::{AccessStrategy, VectorOf};
use crate::layout::Layout;
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Builds each register lane by lane through the layout's scalar accessors.
///
/// The slowest mechanism but layout-agnostic: it only needs
/// [`Layout::coordinate`] and [`Layout::set_polar_coordinate`].
#[derive(Debug)]
pub struct SubscriptAccess<L: Layout> {
    layout: L,
}

impl<L: Layout> AccessStrategy for SubscriptAccess<L> {
    type Layout = L;

    const NAME: &'static str = "Subscript";

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
        let zero = L::Vector::splat(<<L::Vector as SimdVector>::Scalar as num::Zero>::zero());
        let mut x = zero;
        let mut y = zero;

        for lane in 0..L::Vector::LANES {
            let coordinate = self.layout.coordinate(start + lane);
            x.insert(lane, coordinate.x);
            y.insert(lane, coordinate.y);
        }

        Coordinate::new(x, y)
    }

    #[inline(always)]
    fn store(&mut self, start: usize, polar: PolarCoordinate<VectorOf<Self>>) {
        for lane in 0..L::Vector::LANES {
            self.layout.set_polar_coordinate(
                start + lane,
                PolarCoordinate::new(polar.radius.extract(lane), polar.phi.extract(lane)),
            );
        }
    }
}
