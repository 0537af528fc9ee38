use log::trace;

use crate::images::TypedImage;
use crate::kernel::Kernel;
use crate::padding::PaddedImage;
use crate::pixels::U8x3;
use crate::threading::WorkerPool;
use crate::CpuExtensions;

mod banded;
mod reduction;
mod scalar;
mod vector;

/// Way of execution of the convolution loop nest.
///
/// All strategies compute the same correlation of the zero-padded image
/// with the kernel; they differ only in execution mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Naive nested loops with indexed access to pixels and weights.
    Scalar,
    /// Iterator-based loops; the parallel entry point splits output rows
    /// into static chunks and reduces per-channel sums over kernel rows
    /// in parallel.
    ReductionParallel,
    /// Multiply-add of all channels of a pixel as one operation
    /// over 4-lane vector of `f64`.
    ExplicitVector,
    /// Same as `ExplicitVector`, but output rows are split into contiguous
    /// bands, one band per worker thread.
    ExplicitVectorParallel,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Scalar,
        Strategy::ReductionParallel,
        Strategy::ExplicitVector,
        Strategy::ExplicitVectorParallel,
    ];

    /// Short name used in names of files with results.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "NoOpt",
            Self::ReductionParallel => "O2Opt",
            Self::ExplicitVector => "Intrinsics",
            Self::ExplicitVectorParallel => "IntrinsicsBanded",
        }
    }

    /// Human-readable name used in benchmark reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar => "Without optimisations",
            Self::ReductionParallel => "Loop reduction",
            Self::ExplicitVector => "Explicit SIMD",
            Self::ExplicitVectorParallel => "Explicit SIMD with row bands",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

impl ExecutionMode {
    pub const ALL: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Sequential => "Seq",
            Self::Parallel => "Par",
        }
    }
}

/// Applies a kernel to RGB images with one of [strategies](Strategy).
///
/// Every call builds a fresh [PaddedImage] from the source image,
/// nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ConvolutionEngine {
    kernel: Kernel,
    strategy: Strategy,
    cpu_extensions: CpuExtensions,
}

impl ConvolutionEngine {
    pub fn new(kernel: Kernel, strategy: Strategy) -> Self {
        Self {
            kernel,
            strategy,
            cpu_extensions: Default::default(),
        }
    }

    #[inline]
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn cpu_extensions(&self) -> CpuExtensions {
        self.cpu_extensions
    }

    /// # Safety
    /// This is unsafe because this method allows you to set a CPU extension
    /// that is not supported by your CPU.
    pub unsafe fn set_cpu_extensions(&mut self, extensions: CpuExtensions) {
        self.cpu_extensions = extensions;
    }

    /// Sequential entry point. Runs the whole computation in the current thread.
    pub fn convolve(&self, src_image: &TypedImage<U8x3>) -> TypedImage<U8x3> {
        let padded = PaddedImage::new(src_image, &self.kernel);
        let mut dst_image = TypedImage::new(src_image.width(), src_image.height());
        let args = LoopArgs::new(&padded, &self.kernel, &dst_image);
        trace!("{:?}: sequential convolution, {:?}", self.strategy, args);
        if args.is_empty() {
            return dst_image;
        }

        match self.strategy {
            Strategy::Scalar => scalar::convolve(&args, &mut dst_image),
            Strategy::ReductionParallel => reduction::convolve(&args, &mut dst_image),
            Strategy::ExplicitVector => {
                vector::convolve(&args, &mut dst_image, self.cpu_extensions)
            }
            Strategy::ExplicitVectorParallel => {
                banded::convolve(&args, &mut dst_image, self.cpu_extensions)
            }
        }
        dst_image
    }

    /// Parallel entry point. Output is the same as output of [Self::convolve].
    pub fn convolve_parallel(
        &self,
        src_image: &TypedImage<U8x3>,
        pool: &WorkerPool,
    ) -> TypedImage<U8x3> {
        let padded = PaddedImage::new(src_image, &self.kernel);
        let mut dst_image = TypedImage::new(src_image.width(), src_image.height());
        let args = LoopArgs::new(&padded, &self.kernel, &dst_image);
        trace!(
            "{:?}: parallel convolution in {} threads, {:?}",
            self.strategy,
            pool.num_threads(),
            args
        );
        if args.is_empty() {
            return dst_image;
        }

        let dst = &mut dst_image;
        pool.install(|| match self.strategy {
            Strategy::Scalar => scalar::convolve_parallel(&args, dst),
            Strategy::ReductionParallel => {
                reduction::convolve_parallel(&args, dst, pool.chunk_rows().get())
            }
            Strategy::ExplicitVector => {
                vector::convolve_parallel(&args, dst, self.cpu_extensions)
            }
            Strategy::ExplicitVectorParallel => {
                banded::convolve_parallel(&args, dst, self.cpu_extensions, pool.num_threads())
            }
        });
        dst_image
    }

    pub fn run(
        &self,
        src_image: &TypedImage<U8x3>,
        mode: ExecutionMode,
        pool: &WorkerPool,
    ) -> TypedImage<U8x3> {
        match mode {
            ExecutionMode::Sequential => self.convolve(src_image),
            ExecutionMode::Parallel => self.convolve_parallel(src_image, pool),
        }
    }
}

/// Geometry shared by all loop nests.
///
/// Output pixel `(row, col)` is computed from the window of the padded
/// image with top-left corner at `(row, col)`.
#[derive(Clone, Copy)]
pub(crate) struct LoopArgs<'a> {
    pub padded: &'a PaddedImage,
    pub kernel: &'a Kernel,
    /// Count of output rows to compute.
    pub rows: usize,
    /// Count of output columns to compute.
    pub cols: usize,
    /// Width of the output image.
    pub dst_width: usize,
}

impl<'a> LoopArgs<'a> {
    fn new(padded: &'a PaddedImage, kernel: &'a Kernel, dst_image: &TypedImage<U8x3>) -> Self {
        Self {
            padded,
            kernel,
            rows: padded.covered_rows(dst_image.height()),
            cols: padded.covered_cols(dst_image.width()),
            dst_width: dst_image.width() as usize,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Output rows which must be computed.
    #[inline]
    pub fn dst_rows<'b>(&self, dst_image: &'b mut TypedImage<U8x3>) -> &'b mut [U8x3] {
        &mut dst_image.pixels_mut()[..self.rows * self.dst_width]
    }
}

impl std::fmt::Debug for LoopArgs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopArgs")
            .field("kernel_size", &self.kernel.size())
            .field("padded_rows", &self.padded.rows())
            .field("padded_cols", &self.padded.cols())
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}
