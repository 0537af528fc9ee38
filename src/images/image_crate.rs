use image::{DynamicImage, RgbImage};

use crate::images::TypedImage;
use crate::pixels::U8x3;

impl From<&RgbImage> for TypedImage<U8x3> {
    fn from(image: &RgbImage) -> Self {
        let mut typed_image = TypedImage::new(image.width(), image.height());
        // Raw buffer of the image may be longer than its pixels
        let dst_buffer: &mut [u8] = bytemuck::cast_slice_mut(typed_image.pixels_mut());
        let len = dst_buffer.len();
        dst_buffer.copy_from_slice(&image.as_raw()[..len]);
        typed_image
    }
}

/// Any color type is converted into `RGB8`; alpha channel is dropped.
impl From<&DynamicImage> for TypedImage<U8x3> {
    fn from(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageRgb8(rgb_image) => rgb_image.into(),
            _ => (&image.to_rgb8()).into(),
        }
    }
}
