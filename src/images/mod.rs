//! Contains the image container used by the convolution engine.
pub use typed_image::*;

mod typed_image;

#[cfg(feature = "image")]
mod image_crate;
