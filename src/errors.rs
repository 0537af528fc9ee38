use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer is smaller than required")]
    InvalidBufferSize,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Count of pixels is smaller than width * height of the image")]
pub struct InvalidPixelsSize;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Count of weights is even or is not a perfect square.
    #[error("Kernel must be a square matrix of odd size, but {count} weights were given")]
    InvalidKernelShape { count: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkError {
    #[error("Sample variance requires at least 2 measured trials, but {trials} were requested")]
    InsufficientTrials { trials: usize },
}

#[derive(Error, Debug)]
#[error("Failed to build the pool of worker threads")]
pub struct WorkerPoolError(#[from] rayon::ThreadPoolBuildError);
