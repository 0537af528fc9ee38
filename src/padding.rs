use crate::images::TypedImage;
use crate::kernel::Kernel;
use crate::pixels::{F64x3, U8x3};

/// Zero-padded copy of a source image with components widened into `f64`.
///
/// The padded extent is `(rows + k - k/2, cols + k - k/2)` and the source
/// is placed at offset `(k/2, k/2)`. So there are `k/2` zero rows (columns)
/// before the source and exactly one after it.
#[derive(Debug, Clone)]
pub struct PaddedImage {
    rows: usize,
    cols: usize,
    offset: usize,
    pixels: Vec<F64x3>,
}

impl PaddedImage {
    pub fn new(src_image: &TypedImage<U8x3>, kernel: &Kernel) -> Self {
        let size = kernel.size();
        let offset = kernel.half();
        let src_cols = src_image.width() as usize;
        let src_rows = src_image.height() as usize;
        let rows = src_rows + size - offset;
        let cols = src_cols + size - offset;

        let mut pixels = vec![F64x3::default(); rows * cols];
        if src_cols > 0 {
            let dst_rows = pixels.chunks_exact_mut(cols).skip(offset);
            for (dst_row, src_row) in dst_rows.zip(src_image.iter_rows(0)) {
                let dst_row = &mut dst_row[offset..offset + src_cols];
                for (dst, &src) in dst_row.iter_mut().zip(src_row) {
                    *dst = src.into();
                }
            }
        }

        Self {
            rows,
            cols,
            offset,
            pixels,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Offset of the source image inside the padded one. Equal to `k/2`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn pixels(&self) -> &[F64x3] {
        &self.pixels
    }

    /// Returns pixel from given row and column.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is out of the padded image.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> F64x3 {
        assert!(col < self.cols);
        self.pixels[row * self.cols + col]
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &[F64x3] {
        let start = row * self.cols;
        &self.pixels[start..start + self.cols]
    }

    /// Returns `count` consecutive rows, starting from `first_row`.
    #[inline(always)]
    pub fn window_rows(
        &self,
        first_row: usize,
        count: usize,
    ) -> std::slice::ChunksExact<'_, F64x3> {
        let start = first_row * self.cols;
        let end = start + count * self.cols;
        self.pixels[start..end].chunks_exact(self.cols)
    }

    /// Count of output rows which have the whole kernel support
    /// inside the padded image, limited by height of the output image.
    #[inline]
    pub fn covered_rows(&self, dst_height: u32) -> usize {
        self.rows.saturating_sub(2 * self.offset).min(dst_height as usize)
    }

    /// Count of output columns which have the whole kernel support
    /// inside the padded image, limited by width of the output image.
    #[inline]
    pub fn covered_cols(&self, dst_width: u32) -> usize {
        self.cols.saturating_sub(2 * self.offset).min(dst_width as usize)
    }
}
