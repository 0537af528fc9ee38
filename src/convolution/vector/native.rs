use wide::f64x4;

use crate::convolution::LoopArgs;
use crate::pixels::{F64x3, U8x3};

pub(crate) fn convolve_row(args: &LoopArgs, row: usize, dst_row: &mut [U8x3]) {
    let size = args.kernel.size();
    for (col, dst_pixel) in dst_row[..args.cols].iter_mut().enumerate() {
        let mut sums = f64x4::default();
        let window = args.padded.window_rows(row, size);
        for (src_row, weights) in window.zip(args.kernel.rows()) {
            for (pixel, &weight) in src_row[col..col + size].iter().zip(weights) {
                let [r, g, b] = pixel.0;
                let rgb0 = f64x4::new([r, g, b, 0.]);
                sums = sums + rgb0 * f64x4::splat(weight);
            }
        }
        let [r, g, b, _] = sums.to_array();
        *dst_pixel = F64x3([r, g, b]).saturate_to_u8();
    }
}
