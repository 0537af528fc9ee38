//! Text form of benchmark results.
use std::fmt;

use crate::benchmark::{BenchmarkReport, TimingStats};

/// Count of lines at the start of a report which describe the source image.
pub const HEADER_LINES: usize = 2;

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image size: {} x {}", self.width, self.height)?;
        writeln!(f, "Image path: {}", self.source_path.display())?;
        write_timing(f, &self.label, "sequential", &self.sequential)?;
        write_timing(f, &self.label, "parallel", &self.parallel)
    }
}

fn write_timing(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    mode: &str,
    stats: &TimingStats,
) -> fmt::Result {
    writeln!(
        f,
        "{label}, {mode} execution: Mean time: {:.6} Variance: {:.6}",
        stats.mean, stats.variance
    )
}

/// Removes lines with image size and path from the report.
///
/// These lines are the same for all strategies applied to one image.
pub fn strip_header_lines(report: &str) -> String {
    report
        .lines()
        .skip(HEADER_LINES)
        .flat_map(|line| [line, "\n"])
        .collect()
}
