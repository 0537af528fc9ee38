use std::arch::x86_64::*;

use crate::convolution::LoopArgs;
use crate::pixels::{F64x3, U8x3};

/// For safety, it is necessary to ensure the following conditions:
/// - CPU supports AVX
/// - `dst_row.len() >= args.cols`
/// - window of every output pixel of the row is inside the padded image
#[target_feature(enable = "avx")]
pub(crate) unsafe fn convolve_row(args: &LoopArgs, row: usize, dst_row: &mut [U8x3]) {
    /*
        |R  G  B  0|
        |00 01 02 03|
    */
    let size = args.kernel.size();
    let mut lanes = [0f64; 4];
    for (col, dst_pixel) in dst_row[..args.cols].iter_mut().enumerate() {
        let mut sums = _mm256_setzero_pd();
        let window = args.padded.window_rows(row, size);
        for (src_row, weights) in window.zip(args.kernel.rows()) {
            for (pixel, &weight) in src_row[col..col + size].iter().zip(weights) {
                let [r, g, b] = pixel.0;
                let rgb0 = _mm256_set_pd(0., b, g, r);
                let weight_f64x4 = _mm256_set1_pd(weight);
                sums = _mm256_add_pd(sums, _mm256_mul_pd(rgb0, weight_f64x4));
            }
        }
        _mm256_storeu_pd(lanes.as_mut_ptr(), sums);
        *dst_pixel = F64x3([lanes[0], lanes[1], lanes[2]]).saturate_to_u8();
    }
}
