use rayon::prelude::*;

use crate::images::TypedImage;
use crate::pixels::{F64x3, U8x3};

use super::LoopArgs;

pub(crate) fn convolve(args: &LoopArgs, dst_image: &mut TypedImage<U8x3>) {
    let dst_rows = args.dst_rows(dst_image).chunks_exact_mut(args.dst_width);
    for (row, dst_row) in dst_rows.enumerate() {
        convolve_row(args, row, dst_row);
    }
}

pub(crate) fn convolve_parallel(args: &LoopArgs, dst_image: &mut TypedImage<U8x3>) {
    args.dst_rows(dst_image)
        .par_chunks_exact_mut(args.dst_width)
        .enumerate()
        .for_each(|(row, dst_row)| convolve_row(args, row, dst_row));
}

fn convolve_row(args: &LoopArgs, row: usize, dst_row: &mut [U8x3]) {
    let size = args.kernel.size();
    for col in 0..args.cols {
        let mut r = 0.;
        let mut g = 0.;
        let mut b = 0.;
        for u in 0..size {
            for v in 0..size {
                let pixel = args.padded.get(row + u, col + v);
                let weight = args.kernel.weight(u, v);
                r += pixel.0[0] * weight;
                g += pixel.0[1] * weight;
                b += pixel.0[2] * weight;
            }
        }
        dst_row[col] = F64x3([r, g, b]).saturate_to_u8();
    }
}
