use std::num::NonZeroUsize;

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::WorkerPoolError;

const DEFAULT_CHUNK_ROWS: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(v) => v,
    None => unreachable!(),
};

/// Fixed-size pool of worker threads used by parallel entry points
/// of the convolution engine.
///
/// The pool is created explicitly and passed into every parallel call,
/// so the process-wide rayon pool is never reconfigured.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    chunk_rows: NonZeroUsize,
}

impl WorkerPool {
    /// Create a pool with given count of threads.
    /// `0` means the count of logical CPUs.
    pub fn new(num_threads: usize) -> Result<Self, WorkerPoolError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("convolution-worker-{index}"))
            .build()?;
        debug!(
            "Worker pool with {} threads is created",
            pool.current_num_threads()
        );
        Ok(Self {
            pool,
            chunk_rows: DEFAULT_CHUNK_ROWS,
        })
    }

    /// Set count of rows in one chunk of static partitioning.
    pub fn with_chunk_rows(mut self, chunk_rows: NonZeroUsize) -> Self {
        self.chunk_rows = chunk_rows;
        self
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn chunk_rows(&self) -> NonZeroUsize {
        self.chunk_rows
    }

    /// Runs `op` inside the pool and waits for its completion.
    #[inline]
    pub(crate) fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

/// Contiguous band of rows of an image.
#[derive(Debug)]
pub(crate) struct RowsBand<'a, P> {
    pub first_row: usize,
    pub pixels: &'a mut [P],
}

/// Splits first `height` rows of the image into `num_parts` contiguous
/// bands with almost equal heights.
///
/// Count of parts is limited by [calculate_max_h_parts_number].
pub(crate) fn split_rows_into_bands<P>(
    pixels: &mut [P],
    width: usize,
    height: usize,
    num_parts: usize,
) -> Vec<RowsBand<'_, P>> {
    let max_num_parts = calculate_max_h_parts_number(width, height);
    let num_parts = num_parts.min(max_num_parts).max(1);
    let mut res = Vec::with_capacity(num_parts);
    if width == 0 || height == 0 {
        return res;
    }
    let step = height / num_parts;
    let mut modulo = height % num_parts;
    let mut top = 0;
    let mut remains_pixels = &mut pixels[..height * width];
    for _ in 0..num_parts {
        let mut part_height = step;
        if modulo > 0 {
            part_height += 1;
            modulo -= 1;
        }
        let (part, rest) = remains_pixels.split_at_mut(part_height * width);
        res.push(RowsBand {
            first_row: top,
            pixels: part,
        });
        remains_pixels = rest;
        top += part_height;
    }
    res
}

/// It is not optimal to split images on too small parts.
/// We have to calculate minimal height of one part.
/// For small images, it is equal to `constant / area`.
/// For tall images, it is equal to `height / 256`.
fn calculate_max_h_parts_number(width: usize, height: usize) -> usize {
    if width == 0 || height == 0 {
        return 1;
    }
    let area = height * height.max(width);
    let min_height = ((1 << 14) / area).max(height / 256);
    height / min_height.max(1)
}
