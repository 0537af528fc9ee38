use std::ffi::OsString;
use std::path::{Path, PathBuf};

use fast_image_convolution as fc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Naive nested loops
    Scalar,
    /// Iterator-based loops with parallel reduction of sums
    Reduction,
    /// Explicit 4-lane vectors of f64
    Vector,
    /// Explicit 4-lane vectors of f64, rows are split into bands
    VectorBands,
}

impl From<Strategy> for fc::Strategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Scalar => fc::Strategy::Scalar,
            Strategy::Reduction => fc::Strategy::ReductionParallel,
            Strategy::Vector => fc::Strategy::ExplicitVector,
            Strategy::VectorBands => fc::Strategy::ExplicitVectorParallel,
        }
    }
}

/// Adds `_<suffix>` to the file name of the path, before its extension.
///
/// `out/foo.png` -> `out/foo_NoOptSeq.png`
pub fn path_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut file_name = OsString::new();
    if let Some(stem) = path.file_stem() {
        file_name.push(stem);
    }
    file_name.push("_");
    file_name.push(suffix);
    if let Some(ext) = path.extension() {
        file_name.push(".");
        file_name.push(ext);
    }
    path.with_file_name(file_name)
}
