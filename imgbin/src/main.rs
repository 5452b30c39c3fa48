mod filemanager;

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, LevelFilter};

use filemanager::ImageHandlingError;

#[derive(Parser)]
#[command(name = "imgbin")]
#[command(about = "Convert an image into a palette-indexed binary asset")]
struct Cli {
    /// Source image (png, jpg, bmp, ...)
    input: PathBuf,

    /// Destination path, defaults to the input with a .bin extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf, ImageHandlingError> {
    let output = filemanager::output_path(&cli.input, cli.output.as_deref());
    filemanager::convert(&cli.input, &output)?;
    Ok(output)
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    lib_imgbin::init_logging(cli.log_level());

    match run(&cli) {
        Ok(output) => {
            info!("Wrote {}", output.display());
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}: {}", cli.input.display(), e);
            std::process::ExitCode::FAILURE
        }
    }
}
