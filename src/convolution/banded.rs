use rayon::prelude::*;

use crate::images::TypedImage;
use crate::pixels::U8x3;
use crate::threading::split_rows_into_bands;
use crate::CpuExtensions;

use super::{vector, LoopArgs};

/// The whole image is processed as one band.
pub(crate) fn convolve(
    args: &LoopArgs,
    dst_image: &mut TypedImage<U8x3>,
    cpu_extensions: CpuExtensions,
) {
    vector::convolve_rows(args, 0, args.dst_rows(dst_image), cpu_extensions);
}

/// Every worker owns a contiguous band of output rows.
pub(crate) fn convolve_parallel(
    args: &LoopArgs,
    dst_image: &mut TypedImage<U8x3>,
    cpu_extensions: CpuExtensions,
    num_threads: usize,
) {
    let bands = split_rows_into_bands(
        dst_image.pixels_mut(),
        args.dst_width,
        args.rows,
        num_threads,
    );
    bands.into_par_iter().for_each(|band| {
        vector::convolve_rows(args, band.first_row, band.pixels, cpu_extensions);
    });
}
