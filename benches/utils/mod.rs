pub use bencher::*;

mod bencher;

use fast_image_convolution::images::TypedImage;
use fast_image_convolution::pixels::U8x3;

/// Synthetic source image with a smooth gradient and some noise.
pub fn source_image(width: u32, height: u32) -> TypedImage<U8x3> {
    let mut seed = 0x2545_f491u32;
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let noise = (seed & 0x1f) as u8;
            U8x3::new(
                (x % 256) as u8 ^ noise,
                (y % 256) as u8,
                ((x + y) % 256) as u8 ^ noise,
            )
        })
        .collect();
    TypedImage::from_pixels(width, height, pixels).unwrap()
}
