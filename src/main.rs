use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use bmpbin::{BmpError, BmpFile, DEFAULT_OUTPUT, binarize};

/// Binarize a 24-bit BMP image with a luminance threshold.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// A path to the 24-bit BMP file
    input: PathBuf,

    /// Binarization threshold; pixels darker than this become black
    threshold: u8,

    /// Where to write the binarized image
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

/// Exit status per failing stage.
#[derive(Clone, Copy)]
enum Stage {
    Open = 4,
    Verify = 5,
    Load = 6,
    Save = 7,
}

fn fail(stage: Stage, err: BmpError) -> ExitCode {
    error!("{err}");
    ExitCode::from(stage as u8)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    info!("Opening {}...", args.input.display());
    let reader = match bmpbin::bmp::open(&args.input) {
        Ok(reader) => reader,
        Err(err) => return fail(Stage::Open, err),
    };

    info!("Verifying the file...");
    let mut file = match BmpFile::verify(reader, &args.input) {
        Ok(file) => file,
        Err(err) => return fail(Stage::Verify, err),
    };

    info!("Loading image...");
    let image = match file.load() {
        Ok(image) => image,
        Err(err) => return fail(Stage::Load, err),
    };

    info!("Performing image binarization (threshold={})...", args.threshold);
    binarize(image.pixels_mut(), args.threshold);

    info!("Saving {}...", args.output.display());
    if let Err(err) = file.write(&args.output) {
        return fail(Stage::Save, err);
    }

    file.release();
    info!("Done.");
    ExitCode::SUCCESS
}
