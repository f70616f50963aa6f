//! PDF Folder Merge front-end
//!
//! Collects the three merge form fields, from options or by asking for
//! them, runs the merge and prints the status report.

use anyhow::Context;
use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::{self, BufRead, Write};
use std::path::Path;

use pdf_folder_merge::{merge_folder, MergeRequest};

/// PDF Folder Merge - Combine every PDF in a folder into one file
#[derive(Parser)]
#[command(name = "pdf-folder-merge")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Fields left out on the command line are asked for interactively.

PDF files in the input folder are merged in file name order. An existing
output file is overwritten.

EXAMPLES:
    # Merge all PDFs in ./handouts into ./out/all.pdf
    pdf-folder-merge --input handouts --output-dir out --name all

    # Merge in place; the previous merged.pdf is never read back in
    pdf-folder-merge -i scans -o scans -n merged --open")]
struct Cli {
    /// Folder with PDF files
    #[arg(short, long)]
    input: Option<String>,

    /// Folder to save the merged PDF in (created if missing)
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Output PDF file name (the .pdf extension is optional)
    #[arg(short, long)]
    name: Option<String>,

    /// Open the merged file after it is written
    #[arg(long)]
    open: bool,

    /// More log output on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let request = collect_request(&cli)?;
    let report = merge_folder(&request);

    println!("{report}");

    if cli.open {
        if let Some(path) = &report.output_path {
            open_file(path)?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("Warning: could not initialise logging");
    }
}

/// Build the request from options, asking for any missing field
fn collect_request(cli: &Cli) -> anyhow::Result<MergeRequest> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let input_folder = field_or_prompt(&mut input, cli.input.as_deref(), "Folder with PDF files")?;
    let output_folder = field_or_prompt(
        &mut input,
        cli.output_dir.as_deref(),
        "Folder to save merged PDF",
    )?;
    let output_file_name = field_or_prompt(
        &mut input,
        cli.name.as_deref(),
        "Output PDF filename (without .pdf)",
    )?;

    Ok(MergeRequest::new(input_folder, output_folder, output_file_name))
}

/// Use the given value, or read one line from `input` after printing a label
///
/// Empty answers are passed through; the merge reports them as errors.
fn field_or_prompt(input: &mut impl BufRead, value: Option<&str>, label: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }

    let mut stderr = io::stderr();
    write!(stderr, "{label}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| format!("failed to read '{label}'"))?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}
