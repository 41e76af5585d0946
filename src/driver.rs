//! The benchmark loop shared by every layout, access strategy and tail
//! policy.
//!
//! [`GenericBenchmark`] owns one access strategy sized by a [`TailPlan`].
//! Each timed iteration runs `setup_loop`, the vectorized sweep over
//! `[0, container_size)` and the scalar remainder. The timing itself belongs
//! to a [`TimedLoop`] collaborator: criterion's `Bencher`, the CLI's
//! [`TimedIterations`] or a [`FixedIterations`] count in tests.

use std::marker::PhantomData;
use std::mem::size_of;
use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::access::{AccessStrategy, VectorOf};
use crate::barrier::{do_not_optimize, fake_memory_modification};
use crate::layout::{Layout, ScalarOf};
use crate::simd::{Scalar, SimdVector};
use crate::tail::{TailPlan, TailPolicy};
use crate::transform::{calculate_polar_coordinate, Coordinate, PolarCoordinate};

/// External driver deciding how many timed iterations run.
pub trait TimedLoop {
    /// Returns `true` while another iteration should run.
    fn keep_running(&mut self) -> bool;

    /// Iterations granted so far.
    fn iterations(&self) -> u64;

    fn set_items_processed(&mut self, items: u64);

    fn set_bytes_processed(&mut self, bytes: u64);
}

/// Runs exactly `n` iterations.
#[derive(Debug, Clone, Default)]
pub struct FixedIterations {
    target: u64,
    done: u64,
    pub items_processed: u64,
    pub bytes_processed: u64,
}

impl FixedIterations {
    pub fn new(iterations: u64) -> Self {
        Self {
            target: iterations,
            ..Self::default()
        }
    }
}

impl TimedLoop for FixedIterations {
    #[inline(always)]
    fn keep_running(&mut self) -> bool {
        if self.done < self.target {
            self.done += 1;
            true
        } else {
            false
        }
    }

    fn iterations(&self) -> u64 {
        self.done
    }

    fn set_items_processed(&mut self, items: u64) {
        self.items_processed = items;
    }

    fn set_bytes_processed(&mut self, bytes: u64) {
        self.bytes_processed = bytes;
    }
}

/// Runs until both `min_iterations` and `min_time` are reached.
///
/// The clock is not read before `min_iterations` have run, and afterwards
/// only every `done / 8` iterations, so the stop condition overshoots
/// `min_time` by at most an eighth of the iterations.
#[derive(Debug, Clone)]
pub struct TimedIterations {
    min_time: Duration,
    min_iterations: u64,
    started: Option<Instant>,
    elapsed: Duration,
    done: u64,
    next_check: u64,
    clock_reads: u64,
    pub items_processed: u64,
    pub bytes_processed: u64,
}

impl TimedIterations {
    pub fn new(min_time: Duration, min_iterations: u64) -> Self {
        Self {
            min_time,
            min_iterations,
            started: None,
            elapsed: Duration::ZERO,
            done: 0,
            next_check: min_iterations,
            clock_reads: 0,
            items_processed: 0,
            bytes_processed: 0,
        }
    }

    /// Wall time between the first `keep_running` call and the one that
    /// returned `false`.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Times `keep_running` consulted the clock.
    pub fn clock_reads(&self) -> u64 {
        self.clock_reads
    }
}

impl TimedLoop for TimedIterations {
    #[inline]
    fn keep_running(&mut self) -> bool {
        let started = *self.started.get_or_insert_with(Instant::now);

        if self.done >= self.next_check {
            self.elapsed = started.elapsed();
            self.clock_reads += 1;

            if self.elapsed >= self.min_time {
                return false;
            }
            self.next_check = self.done + (self.done / 8).max(1);
        }

        self.done += 1;
        true
    }

    fn iterations(&self) -> u64 {
        self.done
    }

    fn set_items_processed(&mut self, items: u64) {
        self.items_processed = items;
    }

    fn set_bytes_processed(&mut self, bytes: u64) {
        self.bytes_processed = bytes;
    }
}

/// Throughput counters of one [`GenericBenchmark::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Report {
    pub iterations: u64,
    /// `iterations * input_size`; padding slots are not counted.
    pub items_processed: u64,
    /// `items_processed * size_of::<scalar>()`.
    pub bytes_processed: u64,
    pub elapsed: Duration,
}

impl Report {
    /// Logical elements converted per second, 0 when nothing was timed.
    pub fn items_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.items_processed as f64 / seconds
        } else {
            0.0
        }
    }
}

/// One benchmark instantiation: access strategy `A` (which fixes the layout
/// and vector width) under tail policy `P`.
#[derive(Debug)]
pub struct GenericBenchmark<A: AccessStrategy, P: TailPolicy> {
    access: A,
    plan: TailPlan,
    _policy: PhantomData<P>,
}

impl<A: AccessStrategy, P: TailPolicy> GenericBenchmark<A, P> {
    /// Allocates `container_size + missing_size` elements, draws the real
    /// inputs from `rng` and fills the padding slots with the sentinel.
    pub fn new<R: Rng>(input_size: usize, rng: &mut R) -> Self {
        let plan = P::plan(input_size, <VectorOf<A> as SimdVector>::LANES);
        let mut access = A::with_capacity(plan.allocation_size());

        let (low, high) = <ScalarOf<A::Layout> as Scalar>::sample_bounds();
        let layout = access.layout_mut();
        for index in 0..input_size {
            let x = rng.random_range(low..high);
            let y = rng.random_range(low..high);
            layout.set_coordinate(index, Coordinate::new(x, y));
        }

        let sentinel = <ScalarOf<A::Layout> as Scalar>::sentinel();
        for index in plan.padding_range() {
            layout.set_coordinate(index, Coordinate::new(sentinel, sentinel));
        }

        debug!(
            "{}: input {} container {} missing {}",
            Self::name(),
            plan.input_size,
            plan.container_size,
            plan.missing_size
        );

        Self {
            access,
            plan,
            _policy: PhantomData,
        }
    }

    /// [`new`](Self::new) with a `StdRng` seeded from `seed`.
    pub fn with_seed(input_size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(input_size, &mut rng)
    }

    /// `vector/layout/access/tail`, e.g. `f32x8 (avx2)/SoA/LoadStore/Padding`.
    pub fn name() -> String {
        format!(
            "{}/{}/{}/{}",
            <VectorOf<A> as SimdVector>::NAME,
            <A::Layout as Layout>::NAME,
            A::NAME,
            P::NAME
        )
    }

    pub fn plan(&self) -> &TailPlan {
        &self.plan
    }

    pub fn access(&self) -> &A {
        &self.access
    }

    /// One timed-region body: vectorized sweep, then scalar remainder.
    #[inline]
    pub fn run_iteration(&mut self) {
        self.access.setup_loop();

        for start in self.plan.vector_starts() {
            let mut coordinate = self.access.load(start);
            if !A::MEMORY_BACKED {
                fake_memory_modification(&mut coordinate);
            }

            let polar = calculate_polar_coordinate(coordinate);
            if !A::MEMORY_BACKED {
                do_not_optimize(&polar);
            }

            self.access.store(start, polar);
        }

        let layout = self.access.layout_mut();
        for index in self.plan.scalar_range() {
            let polar = calculate_polar_coordinate(layout.coordinate(index));
            layout.set_polar_coordinate(index, polar);
        }
    }

    /// Runs iterations while `timer` allows, then reports the counters to it.
    pub fn run<T: TimedLoop + ?Sized>(&mut self, timer: &mut T) -> Report {
        let started = Instant::now();
        while timer.keep_running() {
            self.run_iteration();
        }
        let elapsed = started.elapsed();

        let iterations = timer.iterations();
        let items_processed = iterations * self.plan.input_size as u64;
        let bytes_processed = items_processed * size_of::<ScalarOf<A::Layout>>() as u64;

        timer.set_items_processed(items_processed);
        timer.set_bytes_processed(bytes_processed);

        Report {
            iterations,
            items_processed,
            bytes_processed,
            elapsed,
        }
    }

    /// The first `input_size` input coordinates.
    pub fn inputs(&self) -> Vec<Coordinate<ScalarOf<A::Layout>>> {
        let layout = self.access.layout();
        (0..self.plan.input_size)
            .map(|index| layout.coordinate(index))
            .collect()
    }

    /// The first `input_size` results; padding slots are excluded.
    pub fn outputs(&self) -> Vec<PolarCoordinate<ScalarOf<A::Layout>>> {
        let layout = self.access.layout();
        (0..self.plan.input_size)
            .map(|index| layout.polar_coordinate(index))
            .collect()
    }
}
