#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use benchmark::{
    BenchmarkHarness, BenchmarkReport, Clock, MonotonicClock, TimingSample, TimingStats,
};
pub use convolution::{ConvolutionEngine, ExecutionMode, Strategy};
pub use cpu_extensions::CpuExtensions;
pub use errors::*;
pub use kernel::Kernel;
pub use padding::PaddedImage;
pub use report::strip_header_lines;
pub use threading::WorkerPool;

pub mod benchmark;
mod convolution;
mod cpu_extensions;
mod errors;
pub mod images;
mod kernel;
mod padding;
pub mod pixels;
mod report;
mod threading;
