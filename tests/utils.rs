#![allow(dead_code)]
use fast_image_convolution::images::TypedImage;
use fast_image_convolution::pixels::U8x3;
use fast_image_convolution::CpuExtensions;

/// Image where components depend on coordinates of pixels.
pub fn gradient_image(width: u32, height: u32) -> TypedImage<U8x3> {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                U8x3::new(
                    (x * 37 + y * 11) as u8,
                    (x * 5 + y * 61) as u8,
                    (x * y + 7) as u8,
                )
            })
        })
        .collect();
    TypedImage::from_pixels(width, height, pixels).unwrap()
}

pub fn uniform_image(width: u32, height: u32, value: u8) -> TypedImage<U8x3> {
    TypedImage::filled(width, height, U8x3::new(value, value, value))
}

/// CPU extensions supported by the current CPU.
pub fn cpu_extensions() -> Vec<CpuExtensions> {
    let all = [
        CpuExtensions::None,
        #[cfg(target_arch = "x86_64")]
        CpuExtensions::Avx,
    ];
    all.into_iter().filter(|e| e.is_supported()).collect()
}

pub fn row(image: &TypedImage<U8x3>, y: u32) -> Vec<U8x3> {
    (0..image.width())
        .map(|x| image.get_pixel(x, y).unwrap())
        .collect()
}

pub fn column(image: &TypedImage<U8x3>, x: u32) -> Vec<U8x3> {
    (0..image.height())
        .map(|y| image.get_pixel(x, y).unwrap())
        .collect()
}
