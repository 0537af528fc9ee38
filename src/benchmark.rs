//! Timing of convolution strategies.
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::convolution::{ConvolutionEngine, ExecutionMode};
use crate::images::TypedImage;
use crate::pixels::U8x3;
use crate::threading::WorkerPool;
use crate::BenchmarkError;

pub const DEFAULT_WARM_UP_ITERATIONS: usize = 3;
pub const DEFAULT_TRIALS: usize = 3;

/// Monotonic source of time.
pub trait Clock {
    /// Time elapsed since some fixed moment. Must never decrease.
    fn now(&self) -> Duration;
}

/// Wall-clock time based on [Instant].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Elapsed times of measured invocations, in seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingSample {
    times: Vec<f64>,
}

impl TimingSample {
    pub fn new(times: Vec<f64>) -> Self {
        Self { times }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Arithmetic mean. Returns `NaN` for an empty sample.
    pub fn mean(&self) -> f64 {
        self.times.iter().sum::<f64>() / self.times.len() as f64
    }

    /// Unbiased sample variance (sum of squared deviations divided by `n - 1`).
    pub fn variance(&self) -> Result<f64, BenchmarkError> {
        let trials = self.times.len();
        if trials < 2 {
            return Err(BenchmarkError::InsufficientTrials { trials });
        }
        let mean = self.mean();
        let sum_of_squares: f64 = self
            .times
            .iter()
            .map(|&time| {
                let diff = mean - time;
                diff * diff
            })
            .sum();
        Ok(sum_of_squares / (trials - 1) as f64)
    }

    pub fn stats(&self) -> Result<TimingStats, BenchmarkError> {
        Ok(TimingStats {
            mean: self.mean(),
            variance: self.variance()?,
        })
    }
}

/// Mean and sample variance of elapsed times, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingStats {
    pub mean: f64,
    pub variance: f64,
}

/// Result of benchmarking of one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub width: u32,
    pub height: u32,
    pub source_path: PathBuf,
    pub label: String,
    pub sequential: TimingStats,
    pub parallel: TimingStats,
}

/// Runs a timed function a fixed number of times: first `warm_up`
/// invocations are discarded, next `trials` invocations are measured.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness<C: Clock = MonotonicClock> {
    warm_up: usize,
    trials: usize,
    clock: C,
}

impl BenchmarkHarness<MonotonicClock> {
    pub fn new(warm_up: usize, trials: usize) -> Result<Self, BenchmarkError> {
        Self::with_clock(warm_up, trials, MonotonicClock::new())
    }
}

impl Default for BenchmarkHarness<MonotonicClock> {
    fn default() -> Self {
        Self {
            warm_up: DEFAULT_WARM_UP_ITERATIONS,
            trials: DEFAULT_TRIALS,
            clock: MonotonicClock::new(),
        }
    }
}

impl<C: Clock> BenchmarkHarness<C> {
    /// Returns [BenchmarkError::InsufficientTrials] if `trials < 2`.
    pub fn with_clock(warm_up: usize, trials: usize, clock: C) -> Result<Self, BenchmarkError> {
        if trials < 2 {
            return Err(BenchmarkError::InsufficientTrials { trials });
        }
        Ok(Self {
            warm_up,
            trials,
            clock,
        })
    }

    #[inline]
    pub fn warm_up(&self) -> usize {
        self.warm_up
    }

    #[inline]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Times `f` as a black box.
    pub fn measure<T>(&self, mut f: impl FnMut() -> T) -> TimingSample {
        for _ in 0..self.warm_up {
            black_box(f());
        }
        let times = (0..self.trials)
            .map(|trial| {
                let start = self.clock.now();
                black_box(f());
                let end = self.clock.now();
                let elapsed = end.saturating_sub(start).as_secs_f64();
                trace!("Trial #{trial}: {elapsed:.6} s");
                elapsed
            })
            .collect();
        TimingSample::new(times)
    }

    /// Measures the sequential and then the parallel entry point of the engine.
    /// Every invocation convolves `src_image` from scratch.
    pub fn run(
        &self,
        engine: &ConvolutionEngine,
        src_image: &TypedImage<U8x3>,
        pool: &WorkerPool,
        source_path: impl AsRef<Path>,
    ) -> Result<BenchmarkReport, BenchmarkError> {
        let strategy = engine.strategy();
        let sequential = self.run_mode(engine, src_image, pool, ExecutionMode::Sequential)?;
        let parallel = self.run_mode(engine, src_image, pool, ExecutionMode::Parallel)?;

        Ok(BenchmarkReport {
            width: src_image.width(),
            height: src_image.height(),
            source_path: source_path.as_ref().to_path_buf(),
            label: strategy.label().to_owned(),
            sequential,
            parallel,
        })
    }

    fn run_mode(
        &self,
        engine: &ConvolutionEngine,
        src_image: &TypedImage<U8x3>,
        pool: &WorkerPool,
        mode: ExecutionMode,
    ) -> Result<TimingStats, BenchmarkError> {
        debug!(
            "Benchmark {:?} in {:?} mode: {} warm-up iterations, {} trials",
            engine.strategy(),
            mode,
            self.warm_up,
            self.trials
        );
        self.measure(|| engine.run(src_image, mode, pool)).stats()
    }
}
