use super::{AccessStrategy, VectorOf};
use crate::layout::{Layout, Register};
use crate::simd::SimdVector;
use crate::transform::{Coordinate, PolarCoordinate};

/// Reads and writes the single in-register block of a [`Register`] layout.
///
/// Paired with the driver's optimization barriers this measures the bare
/// conversion cost with no memory traffic. The output depends only on the
/// last block written, so it never matches the memory-backed strategies.
#[derive(Debug)]
pub struct BaselineAccess<V: SimdVector> {
    layout: Register<V>,
}

impl<V: SimdVector> AccessStrategy for BaselineAccess<V> {
    type Layout = Register<V>;

    const NAME: &'static str = "Register";

    const MEMORY_BACKED: bool = false;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            layout: Register::with_capacity(capacity),
        }
    }

    #[inline(always)]
    fn layout(&self) -> &Register<V> {
        &self.layout
    }

    #[inline(always)]
    fn layout_mut(&mut self) -> &mut Register<V> {
        &mut self.layout
    }

    #[inline(always)]
    fn load(&self, _start: usize) -> Coordinate<VectorOf<Self>> {
        self.layout.input
    }

    #[inline(always)]
    fn store(&mut self, _start: usize, polar: PolarCoordinate<VectorOf<Self>>) {
        self.layout.output = polar;
    }
}
