use rayon::prelude::*;

use crate::images::TypedImage;
use crate::pixels::U8x3;
use crate::CpuExtensions;

use super::LoopArgs;

#[cfg(target_arch = "x86_64")]
mod avx;
mod native;

pub(crate) fn convolve(
    args: &LoopArgs,
    dst_image: &mut TypedImage<U8x3>,
    cpu_extensions: CpuExtensions,
) {
    convolve_rows(args, 0, args.dst_rows(dst_image), cpu_extensions);
}

pub(crate) fn convolve_parallel(
    args: &LoopArgs,
    dst_image: &mut TypedImage<U8x3>,
    cpu_extensions: CpuExtensions,
) {
    args.dst_rows(dst_image)
        .par_chunks_exact_mut(args.dst_width)
        .enumerate()
        .for_each(|(row, dst_row)| convolve_row(args, row, dst_row, cpu_extensions));
}

/// Computes consecutive output rows starting from `first_row`.
pub(crate) fn convolve_rows(
    args: &LoopArgs,
    first_row: usize,
    dst_rows: &mut [U8x3],
    cpu_extensions: CpuExtensions,
) {
    let dst_rows = dst_rows.chunks_exact_mut(args.dst_width);
    for (row, dst_row) in (first_row..).zip(dst_rows) {
        convolve_row(args, row, dst_row, cpu_extensions);
    }
}

#[inline]
fn convolve_row(
    args: &LoopArgs,
    row: usize,
    dst_row: &mut [U8x3],
    cpu_extensions: CpuExtensions,
) {
    match cpu_extensions {
        #[cfg(target_arch = "x86_64")]
        CpuExtensions::Avx => unsafe { avx::convolve_row(args, row, dst_row) },
        _ => native::convolve_row(args, row, dst_row),
    }
}
