use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use fast_image_convolution as fc;
use fast_image_convolution::images::TypedImage;
use fast_image_convolution::pixels::U8x3;
use image::{ColorType, ImageReader};
use log::{debug, info};

mod structs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(allow_negative_numbers = true)]
struct Cli {
    /// Path to source image file
    #[clap(value_parser)]
    source_path: PathBuf,

    /// Base path of result image files. Names of a strategy and an execution
    /// mode are added to the file name, before its extension.
    #[clap(value_parser)]
    destination_path: PathBuf,

    /// Weights of a square kernel of odd size, in row-major order.
    /// The horizontal edge detector is used if weights are absent.
    #[clap(value_parser)]
    kernel: Vec<f64>,

    /// Count of worker threads used by parallel execution, 0 - count of CPUs
    #[clap(short, long, value_parser, default_value_t = 0)]
    threads: usize,

    /// Count of rows in one chunk of static partitioning
    #[clap(long, value_parser, default_value = "2")]
    chunk_rows: NonZeroUsize,

    /// Count of discarded warm-up iterations
    #[clap(long, value_parser, default_value_t = fc::benchmark::DEFAULT_WARM_UP_ITERATIONS)]
    warm_up: usize,

    /// Count of measured iterations, at least 2
    #[clap(long, value_parser, default_value_t = fc::benchmark::DEFAULT_TRIALS)]
    trials: usize,

    /// Path to text file with benchmark reports
    #[clap(short, long, value_parser, default_value = "results.txt")]
    results_path: PathBuf,

    /// Strategy of convolution. Can be repeated. All strategies are used by default.
    #[clap(short, long, value_enum)]
    strategy: Vec<structs::Strategy>,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    convolve(&cli)
}

fn convolve(cli: &Cli) -> Result<()> {
    // Size of the kernel defines the padding of the image,
    // so it must be checked before the image is loaded.
    let kernel = fc::Kernel::from_weights(cli.kernel.clone())
        .with_context(|| "Invalid convolution kernel")?;
    debug!("Kernel {}x{}: {:?}", kernel.size(), kernel.size(), kernel.weights());

    let src_image = open_source_image(&cli.source_path)?;
    let pool = fc::WorkerPool::new(cli.threads)?.with_chunk_rows(cli.chunk_rows);
    let harness = fc::BenchmarkHarness::new(cli.warm_up, cli.trials)?;

    let results_path = &cli.results_path;
    let mut results_file = File::create(results_path)
        .with_context(|| format!("Failed to create results file {:?}", results_path))?;

    for (index, strategy) in selected_strategies(cli).into_iter().enumerate() {
        info!("Benchmark of {:?} strategy", strategy);
        let engine = fc::ConvolutionEngine::new(kernel.clone(), strategy);
        let report = harness
            .run(&engine, &src_image, &pool, &cli.source_path)?
            .to_string();
        print!("{report}");

        for mode in fc::ExecutionMode::ALL {
            let dst_image = engine.run(&src_image, mode, &pool);
            let suffix = format!("{}{}", strategy.name(), mode.suffix());
            let dst_path = structs::path_with_suffix(&cli.destination_path, &suffix);
            save_result(&dst_path, &dst_image)?;
        }

        let text = if index == 0 {
            report
        } else {
            fc::strip_header_lines(&report)
        };
        results_file
            .write_all(text.as_bytes())
            .with_context(|| format!("Failed to write into results file {:?}", results_path))?;
    }
    Ok(())
}

fn selected_strategies(cli: &Cli) -> Vec<fc::Strategy> {
    if cli.strategy.is_empty() {
        fc::Strategy::ALL.to_vec()
    } else {
        cli.strategy.iter().map(|&s| s.into()).collect()
    }
}

fn open_source_image(source_path: &Path) -> Result<TypedImage<U8x3>> {
    debug!("Opening the source image {:?}", source_path);
    let image = ImageReader::open(source_path)
        .with_context(|| format!("Failed to read source file from {:?}", source_path))?
        .decode()
        .with_context(|| "Failed to decode source image")?;
    Ok(TypedImage::from(&image))
}

fn save_result(result_path: &Path, image: &TypedImage<U8x3>) -> Result<()> {
    debug!("Save the result image into the file {:?}", result_path);
    image::save_buffer(
        result_path,
        image.buffer(),
        image.width(),
        image.height(),
        ColorType::Rgb8,
    )
    .with_context(|| format!("Failed to save the result image into {:?}", result_path))
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }

    #[test]
    fn two_paths_are_required() {
        let res = Cli::try_parse_from(["convolver"]);
        assert_eq!(
            res.err().map(|e| e.kind()),
            Some(ErrorKind::MissingRequiredArgument)
        );
        let res = Cli::try_parse_from(["convolver", "in.png"]);
        assert_eq!(
            res.err().map(|e| e.kind()),
            Some(ErrorKind::MissingRequiredArgument)
        );
    }

    #[test]
    fn negative_kernel_weights() {
        let cli = Cli::try_parse_from([
            "convolver", "in.png", "out.png", "-1", "0", "1", "-2", "0", "2", "-1", "0", "1",
        ])
        .unwrap();
        assert_eq!(cli.kernel, [-1., 0., 1., -2., 0., 2., -1., 0., 1.]);
        assert_eq!(cli.trials, 3);
        assert_eq!(cli.warm_up, 3);
        assert_eq!(cli.chunk_rows.get(), 2);
        assert_eq!(selected_strategies(&cli), fc::Strategy::ALL);
    }

    #[test]
    fn selected_strategies_keep_order() {
        let cli = Cli::try_parse_from([
            "convolver",
            "in.png",
            "out.png",
            "-s",
            "vector-bands",
            "-s",
            "scalar",
        ])
        .unwrap();
        assert!(cli.kernel.is_empty());
        assert_eq!(
            selected_strategies(&cli),
            [fc::Strategy::ExplicitVectorParallel, fc::Strategy::Scalar]
        );
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("convolver-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn invalid_kernel_is_rejected_before_loading_image() {
        let dir = test_dir("invalid-kernel");
        let cli = Cli::try_parse_from([
            "convolver",
            dir.join("absent.png").to_str().unwrap(),
            dir.join("out.png").to_str().unwrap(),
            "1",
            "2",
            "3",
            "4",
        ])
        .unwrap();
        let err = convolve(&cli).unwrap_err();
        assert!(err.downcast_ref::<fc::KernelError>().is_some());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn absent_source_image() {
        let dir = test_dir("absent-image");
        let cli = Cli::try_parse_from([
            "convolver",
            dir.join("absent.png").to_str().unwrap(),
            dir.join("out.png").to_str().unwrap(),
        ])
        .unwrap();
        let err = convolve(&cli).unwrap_err();
        assert!(format!("{err}").starts_with("Failed to read source file"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn convolve_all_strategies() {
        let dir = test_dir("all-strategies");
        let src_path = dir.join("src.png");
        RgbImage::from_pixel(7, 5, Rgb([128, 128, 128]))
            .save(&src_path)
            .unwrap();
        let dst_path = dir.join("dst.png");
        let results_path = dir.join("results.txt");
        let cli = Cli::try_parse_from([
            "convolver",
            src_path.to_str().unwrap(),
            dst_path.to_str().unwrap(),
            "--warm-up",
            "1",
            "--trials",
            "2",
            "--threads",
            "2",
            "--results-path",
            results_path.to_str().unwrap(),
        ])
        .unwrap();
        convolve(&cli).unwrap();

        for strategy in fc::Strategy::ALL {
            for mode in fc::ExecutionMode::ALL {
                let suffix = format!("{}{}", strategy.name(), mode.suffix());
                let path = structs::path_with_suffix(&dst_path, &suffix);
                let image = ImageReader::open(&path).unwrap().decode().unwrap();
                assert_eq!((image.width(), image.height()), (7, 5));
                // Middle rows see the whole kernel inside the uniform image.
                let image = image.to_rgb8();
                assert_eq!(image.get_pixel(3, 2), &Rgb([0, 0, 0]));
            }
        }

        let results = std::fs::read_to_string(&results_path).unwrap();
        let lines: Vec<&str> = results.lines().collect();
        // Header of the first report and two lines per strategy
        assert_eq!(lines.len(), 2 + 2 * fc::Strategy::ALL.len());
        assert_eq!(lines[0], "Image size: 7 x 5");
        assert!(lines[1].starts_with("Image path: "));
        assert!(lines[2].starts_with("Without optimisations, sequential execution: Mean time: "));
        assert_eq!(lines.iter().filter(|l| l.starts_with("Image ")).count(), 2);

        std::fs::remove_dir_all(dir).unwrap();
    }
}
