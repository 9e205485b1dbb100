use clap::{Parser, Subcommand};
use cropfill::{Quality, Thumbnailer, config, logging, output};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Shared flags for commands that emit an image.
#[derive(clap::Args, Clone)]
struct EmitArgs {
    /// Source image (.jpg, .jpeg, .png or .gif)
    input: PathBuf,

    /// Quality 0-100: JPEG quality, PNG compression level, ignored for GIF
    #[arg(long, short)]
    quality: Option<Quality>,

    /// Write the image here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print Content-Disposition and Content-Type lines to stderr
    #[arg(long)]
    headers: bool,
}

#[derive(Parser)]
#[command(name = "cropfill")]
#[command(about = "Crop-to-fill thumbnails for JPEG, PNG and GIF images")]
#[command(long_about = "\
Crop-to-fill thumbnails for JPEG, PNG and GIF images

A thumbnail always matches the requested box exactly. The source is scaled
until it covers the box, then the overflow is cropped evenly from both sides:

  800x600 source, 100x100 box → scaled to 133x100, about 17px trimmed left and right

The output format follows the detected source format. Quality means JPEG
quality for JPEG, a compression level (0-100 mapped onto 0-9) for PNG, and is
ignored for GIF.

Run 'cropfill gen-config' to generate a documented cropfill.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./cropfill.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop-to-fill an image into a width x height box
    Thumbnail {
        #[command(flatten)]
        emit: EmitArgs,

        /// Target width in pixels
        #[arg(long, short = 'W')]
        width: Option<u32>,

        /// Target height in pixels
        #[arg(long, short = 'H')]
        height: Option<u32>,
    },
    /// Re-encode an image at the given quality without resizing
    Convert(EmitArgs),
    /// Show detected format, dimensions and path parts
    Info {
        /// Source image
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock cropfill.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Thumbnail {
            emit,
            width,
            height,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let target = (
                width.unwrap_or(cfg.thumbnail.width),
                height.unwrap_or(cfg.thumbnail.height),
            );
            run_emit(&emit, &cfg, Some(target))?;
        }
        Command::Convert(emit) => {
            let cfg = config::load_config(cli.config.as_deref())?;
            run_emit(&emit, &cfg, None)?;
        }
        Command::Info { input, json } => {
            let mut image = Thumbnailer::open(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(image.source())?);
            } else {
                output::print_source_info(image.source());
            }
            image.release()?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Open, optionally thumbnail, encode, write, release.
fn run_emit(
    args: &EmitArgs,
    cfg: &config::Config,
    target: Option<(u32, u32)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let quality = match args.quality {
        Some(q) => q,
        None => Quality::new(cfg.output.quality as f64)?,
    };

    let mut image = Thumbnailer::open(&args.input)?;
    if let Some((width, height)) = target {
        image.thumbnail(width, height)?;
    }

    let bytes = image.encode(quality)?;
    write_output(args.output.as_deref(), &bytes)?;

    if args.headers {
        output::print_headers(&image.response_headers());
    }
    output::print_emit_summary(image.source(), target, quality, bytes.len());
    info!(input = %args.input.display(), bytes = bytes.len(), "emitted image");

    image.release()?;
    Ok(())
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        }
    }
}
