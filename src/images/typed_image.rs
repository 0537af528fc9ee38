use std::fmt::Debug;

use bytemuck::Pod;

use crate::pixels::U8x3;
use crate::{ImageBufferError, InvalidPixelsSize};

/// Generic image container that owns its pixels.
///
/// Pixels are stored row by row without gaps between rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedImage<P> {
    width: u32,
    height: u32,
    pixels: Vec<P>,
}

impl<P: Default + Copy + Debug> TypedImage<P> {
    /// Create an image filled by default (zero) pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels_count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![P::default(); pixels_count],
        }
    }

    /// Create an image where every pixel is equal to given one.
    pub fn filled(width: u32, height: u32, pixel: P) -> Self {
        let pixels_count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![pixel; pixels_count],
        }
    }
}

impl<P: Copy> TypedImage<P> {
    pub fn from_pixels(
        width: u32,
        height: u32,
        mut pixels: Vec<P>,
    ) -> Result<Self, InvalidPixelsSize> {
        let pixels_count = width as usize * height as usize;
        if pixels.len() < pixels_count {
            return Err(InvalidPixelsSize);
        }
        pixels.truncate(pixels_count);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.get(index).copied()
    }

    pub fn iter_rows(&self, start_row: u32) -> impl Iterator<Item = &[P]> {
        let width = self.width as usize;
        let start = start_row as usize * width;
        // Image without columns has no pixels at all
        self.pixels
            .get(start..)
            .unwrap_or_default()
            .chunks_exact(width.max(1))
    }
}

impl<P: Pod> TypedImage<P> {
    /// Buffer with image pixels data.
    #[inline]
    pub fn buffer(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl TypedImage<U8x3> {
    /// Create an image from packed `RGB8` bytes.
    pub fn from_vec_u8(width: u32, height: u32, buffer: Vec<u8>) -> Result<Self, ImageBufferError> {
        let size = width as usize * height as usize * size_of::<U8x3>();
        let bytes = buffer.get(..size).ok_or(ImageBufferError::InvalidBufferSize)?;
        let pixels: &[U8x3] =
            bytemuck::try_cast_slice(bytes).map_err(|_| ImageBufferError::InvalidBufferSize)?;
        Self::from_pixels(width, height, pixels.to_vec())
            .map_err(|_| ImageBufferError::InvalidBufferSize)
    }
}
