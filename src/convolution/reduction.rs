use rayon::prelude::*;

use crate::images::TypedImage;
use crate::pixels::{F64x3, U8x3, CHANNELS};

use super::LoopArgs;

type Sums = [f64; CHANNELS];

pub(crate) fn convolve(args: &LoopArgs, dst_image: &mut TypedImage<U8x3>) {
    let dst_rows = args.dst_rows(dst_image).chunks_exact_mut(args.dst_width);
    for (row, dst_row) in dst_rows.enumerate() {
        convolve_row(args, row, dst_row);
    }
}

/// Output rows are split into static chunks of `chunk_rows` rows.
/// Sums of every output pixel are reduced over rows of the kernel
/// in parallel too.
pub(crate) fn convolve_parallel(
    args: &LoopArgs,
    dst_image: &mut TypedImage<U8x3>,
    chunk_rows: usize,
) {
    let chunk_len = args.dst_width * chunk_rows;
    args.dst_rows(dst_image)
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(chunk_index, dst_chunk)| {
            let first_row = chunk_index * chunk_rows;
            let dst_rows = dst_chunk.chunks_exact_mut(args.dst_width);
            for (row, dst_row) in (first_row..).zip(dst_rows) {
                reduce_row(args, row, dst_row);
            }
        });
}

fn convolve_row(args: &LoopArgs, row: usize, dst_row: &mut [U8x3]) {
    let size = args.kernel.size();
    for (col, dst_pixel) in dst_row[..args.cols].iter_mut().enumerate() {
        let mut sums: Sums = [0.; CHANNELS];
        let window = args.padded.window_rows(row, size);
        for (src_row, weights) in window.zip(args.kernel.rows()) {
            accumulate(&mut sums, &src_row[col..col + size], weights);
        }
        *dst_pixel = F64x3(sums).saturate_to_u8();
    }
}

fn reduce_row(args: &LoopArgs, row: usize, dst_row: &mut [U8x3]) {
    let size = args.kernel.size();
    for (col, dst_pixel) in dst_row[..args.cols].iter_mut().enumerate() {
        let sums = args
            .kernel
            .weights()
            .par_chunks_exact(size)
            .enumerate()
            .map(|(u, weights)| {
                let mut sums: Sums = [0.; CHANNELS];
                let src_row = args.padded.row(row + u);
                accumulate(&mut sums, &src_row[col..col + size], weights);
                sums
            })
            .reduce(|| [0.; CHANNELS], add_sums);
        *dst_pixel = F64x3(sums).saturate_to_u8();
    }
}

#[inline(always)]
fn accumulate(sums: &mut Sums, pixels: &[F64x3], weights: &[f64]) {
    for (pixel, &weight) in pixels.iter().zip(weights) {
        for (sum, component) in sums.iter_mut().zip(pixel.0) {
            *sum += component * weight;
        }
    }
}

#[inline(always)]
fn add_sums(a: Sums, b: Sums) -> Sums {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}
