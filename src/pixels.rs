//! Pixel types used by the convolution engine.
use bytemuck::{Pod, Zeroable};

/// Count of color channels in every pixel.
pub const CHANNELS: usize = 3;

/// RGB pixel with 8-bit components. Layout matches a packed `RGB8` buffer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct U8x3(pub [u8; CHANNELS]);

/// RGB pixel with double precision components.
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct F64x3(pub [f64; CHANNELS]);

impl U8x3 {
    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

impl F64x3 {
    /// Narrows every component into `u8`.
    ///
    /// Values are rounded to the nearest integer (ties to even) and
    /// saturated into `[0, 255]`. `NaN` becomes `0`.
    #[inline(always)]
    pub fn saturate_to_u8(self) -> U8x3 {
        U8x3(self.0.map(saturate_u8))
    }
}

impl From<U8x3> for F64x3 {
    #[inline(always)]
    fn from(pixel: U8x3) -> Self {
        Self(pixel.0.map(f64::from))
    }
}

#[inline(always)]
fn saturate_u8(v: f64) -> u8 {
    // `as` saturates out-of-range values and maps NaN to 0
    v.round_ties_even() as u8
}
