use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lab_record_pdf::{Error, Record, RenderOptions};

/// Render a lab record (JSON) as a notebook-style PDF.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Record JSON file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Output file; writes stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Watermark image (defaults to $LAB_RECORD_WATERMARK or ./download.png)
    #[arg(long, conflicts_with = "no_watermark")]
    watermark: Option<PathBuf>,

    /// Do not draw a watermark
    #[arg(long)]
    no_watermark: bool,

    /// Footer label printed at the bottom right of every page
    #[arg(long)]
    footer: Option<String>,

    /// Write the PDF as base64 text instead of binary
    #[arg(long)]
    base64: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_input(input: Option<&PathBuf>) -> Result<Vec<u8>, Error> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read(path)?),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let record = Record::from_json(&read_input(cli.input.as_ref())?)?;

    let mut options = RenderOptions::default();
    if cli.no_watermark {
        options.watermark = None;
    } else if let Some(path) = &cli.watermark {
        options.watermark = Some(path.clone());
    }
    if let Some(footer) = &cli.footer {
        options.footer_label = footer.clone();
    }

    let bytes = if cli.base64 {
        lab_record_pdf::render_base64(&record, &options)?.into_bytes()
    } else {
        lab_record_pdf::render(&record, &options)?
    };

    match &cli.output {
        Some(path) => std::fs::write(path, &bytes)?,
        None => std::io::stdout().lock().write_all(&bytes)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
