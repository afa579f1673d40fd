use clap::{Args, Parser, Subcommand};
use image::GrayImage;
use rust_binarize::tools::{binary_stats, grayscale_stats, load_gray, save_gray};
use rust_binarize::{
    BernsenParams, BinaryColorPair, Guide, KernelSize, NiblackParams, Otsu2DParams, SauvolaParams,
    StructuringElement, bernsen, niblack, otsu_2d, sauvola,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thresh", version, about = "Locally-adaptive binarization")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Common {
    /// Input image (any format supported by `image`)
    #[arg(long)]
    input: PathBuf,
    /// Output image, format follows the extension
    #[arg(long)]
    output: PathBuf,
    /// White objects on a black background
    #[arg(long)]
    inverse: bool,
}

#[derive(Args)]
struct Window {
    /// Window width in pixels
    #[arg(long, default_value_t = 75)]
    width: usize,
    /// Window height in pixels
    #[arg(long, default_value_t = 75)]
    height: usize,
}

impl Window {
    fn size(&self) -> KernelSize {
        KernelSize::new(self.width, self.height)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Local contrast with a global fallback in flat regions
    Bernsen {
        #[command(flatten)]
        common: Common,
        #[command(flatten)]
        window: Window,
        #[arg(long, default_value_t = 25.0)]
        contrast_limit: f64,
        #[arg(long, default_value_t = 100.0)]
        global_threshold: f64,
        /// Use a rectangular neighborhood instead of an ellipse
        #[arg(long)]
        rectangle: bool,
    },
    /// mean + k * stddev
    Niblack {
        #[command(flatten)]
        common: Common,
        #[command(flatten)]
        window: Window,
        #[arg(long, default_value_t = -0.2, allow_hyphen_values = true)]
        k: f64,
    },
    /// mean * (1 + k * (stddev / r - 1))
    Sauvola {
        #[command(flatten)]
        common: Common,
        #[command(flatten)]
        window: Window,
        #[arg(long, default_value_t = 0.2, allow_hyphen_values = true)]
        k: f64,
        #[arg(long, default_value_t = 128.0, allow_hyphen_values = true)]
        r: f64,
    },
    /// Global threshold from the (pixel, local average) histogram
    Otsu2d {
        #[command(flatten)]
        common: Common,
        #[command(flatten)]
        window: Window,
        /// Guide image instead of the local average
        #[arg(long)]
        guide: Option<PathBuf>,
        #[arg(long)]
        edge_as_background: bool,
        #[arg(long)]
        noise_as_object: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    let (common, result) = match command {
        Command::Bernsen {
            common,
            window,
            contrast_limit,
            global_threshold,
            rectangle,
        } => {
            let input = load(&common)?;
            let kernel = if rectangle {
                StructuringElement::rectangle(window.size())
            } else {
                StructuringElement::ellipse(window.size())
            }
            .map_err(|e| e.to_string())?;
            let params = BernsenParams {
                contrast_limit,
                global_threshold,
                kernel,
            };
            let result = timed("bernsen", || bernsen(&input, !common.inverse, &params));
            (common, result)
        }
        Command::Niblack { common, window, k } => {
            let input = load(&common)?;
            let params = NiblackParams {
                kernel_size: window.size(),
                k,
            };
            let result = timed("niblack", || niblack(&input, !common.inverse, &params));
            (common, result)
        }
        Command::Sauvola {
            common,
            window,
            k,
            r,
        } => {
            let input = load(&common)?;
            let params = SauvolaParams {
                kernel_size: window.size(),
                k,
                r,
            };
            let result = timed("sauvola", || sauvola(&input, !common.inverse, &params));
            (common, result)
        }
        Command::Otsu2d {
            common,
            window,
            guide,
            edge_as_background,
            noise_as_object,
        } => {
            let input = load(&common)?;
            let guide = match guide {
                Some(path) => Guide::Image(
                    load_gray(&path).map_err(|e| format!("{}: {}", path.display(), e))?,
                ),
                None => Guide::Average(window.size()),
            };
            let params = Otsu2DParams {
                guide,
                edge_role_as_background: edge_as_background,
                noise_role_as_background: !noise_as_object,
            };
            let result = timed("otsu2d", || otsu_2d(&input, !common.inverse, &params));
            (common, result)
        }
    };

    let output = result.map_err(|e| e.to_string())?;
    save_gray(&common.output, &output).map_err(|e| format!("{}: {}", common.output.display(), e))?;

    let object = BinaryColorPair::for_background(!common.inverse).object;
    let stats = binary_stats(&output, object);
    println!(
        "Wrote {} ({}x{}), object pixels: {} ({:.1}%)",
        common.output.display(),
        output.width(),
        output.height(),
        stats.object_pixels,
        stats.object_ratio * 100.0
    );
    Ok(())
}

fn load(common: &Common) -> Result<GrayImage, String> {
    let input = load_gray(&common.input).map_err(|e| format!("{}: {}", common.input.display(), e))?;
    let stats = grayscale_stats(&input);
    println!(
        "Image: {} ({}x{}), min={} max={} avg={}",
        common.input.display(),
        input.width(),
        input.height(),
        stats.min,
        stats.max,
        stats.avg
    );
    Ok(input)
}

fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    println!("{} took {:.2?}", name, start.elapsed());
    value
}
