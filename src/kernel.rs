use crate::KernelError;

/// Weights of the default kernel. It detects horizontal edges.
const EDGE_DETECTION_WEIGHTS: [f64; 9] = [
    -1., -1., -1., //
    2., 2., 2., //
    -1., -1., -1.,
];

/// Immutable square convolution kernel with odd size of side.
///
/// Weights are stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Create a kernel from a flat list of weights in row-major order.
    ///
    /// The default kernel is returned if `weights` is empty.
    /// Count of weights must be odd and must be a perfect square,
    /// otherwise [KernelError::InvalidKernelShape] is returned.
    pub fn from_weights(weights: Vec<f64>) -> Result<Self, KernelError> {
        let count = weights.len();
        if count == 0 {
            return Ok(Self::default());
        }
        let size = (count as f64).sqrt().round() as usize;
        if count % 2 == 0 || size * size != count {
            return Err(KernelError::InvalidKernelShape { count });
        }
        Ok(Self { size, weights })
    }

    /// Horizontal edge detector:
    /// ```text
    /// -1 -1 -1
    ///  2  2  2
    /// -1 -1 -1
    /// ```
    pub fn edge_detection() -> Self {
        Self {
            size: 3,
            weights: EDGE_DETECTION_WEIGHTS.to_vec(),
        }
    }

    /// Length of a side of the kernel.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Radius of the kernel around its center, `size / 2`.
    #[inline]
    pub fn half(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Returns weight from given row and column.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is out of the kernel.
    #[inline(always)]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.size);
        self.weights[row * self.size + col]
    }

    #[inline]
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.weights.chunks_exact(self.size)
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::edge_detection()
    }
}
