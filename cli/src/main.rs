//! docxtext CLI - plain text extraction from Word documents
//!
//! Reads the main document part of a .docx package and writes its
//! paragraph text to a file or stdout.

use clap::{Parser, ValueEnum};
use colored::*;
use docxtext::{ConvertOptions, JsonFormat, OutputFormat, DEFAULT_OUTPUT};
use std::io::{self, Write};
use std::path::PathBuf;

/// Extract plain text from Word (.docx) documents
#[derive(Parser)]
#[command(
    name = "docxtext",
    author = "iyulab",
    version,
    about = "Extract plain text from Word documents",
    long_about = "docxtext - plain text extraction from Word (.docx) packages.\n\n\
                  Concatenates the text runs of every paragraph and writes one\n\
                  paragraph per line."
)]
struct Cli {
    /// Input .docx file
    input: PathBuf,

    /// Output file path ("-" for stdout)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    format: Format,

    /// Output compact JSON (no indentation)
    #[arg(long)]
    compact: bool,

    /// On failure, write "Error: <details>" as the output and exit successfully
    #[arg(long)]
    error_as_text: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output format
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Plain text, one paragraph per line
    Text,
    /// JSON object with a paragraph list
    Json,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        match self.format {
            Format::Text => OutputFormat::Text,
            Format::Json if self.compact => OutputFormat::Json(JsonFormat::Compact),
            Format::Json => OutputFormat::Json(JsonFormat::Pretty),
        }
    }

    fn writes_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.writes_stdout() {
        return write_stdout(&cli);
    }

    let options = ConvertOptions::new(&cli.input)
        .with_output(&cli.output)
        .with_format(cli.output_format())
        .with_error_as_text(cli.error_as_text);

    let report = docxtext::convert(&options)?;

    if report.is_error_text {
        println!(
            "{} Extraction failed, error written to {}",
            "!".yellow().bold(),
            report.output().display()
        );
    } else {
        println!(
            "{} Extracted {} paragraphs to {}",
            "✓".green().bold(),
            report.paragraphs,
            report.output().display()
        );
    }

    Ok(())
}

fn write_stdout(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let content = match docxtext::extract(&cli.input)
        .and_then(|extraction| docxtext::render::render(&extraction, cli.output_format()))
    {
        Ok(content) => content,
        Err(e) if cli.error_as_text => {
            log::warn!("extraction of {} failed: {}", cli.input.display(), e);
            e.to_error_text()
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{}", content)?;
    handle.flush()?;
    Ok(())
}
