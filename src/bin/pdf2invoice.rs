use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use invoice_layout::{
    DocumentOutcome, ExtractOptions, ExtractWarning, ExtractionReport, InvoiceRecord,
    PageSelection, PageSource, PdfFile, TextFile, extract_batch, write_parts_csv,
    write_summary_csv,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pdf2invoice",
    version,
    about = "Recover invoice fields and part rows from invoice PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract one invoice record per input document.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input documents: PDFs, or `.txt` files with form-feed separated pages.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Scan every page even after all fields are found.
    #[arg(long)]
    no_early_exit: bool,

    /// Write the invoice summary table to this CSV path.
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Write flattened part rows to this CSV path.
    #[arg(long)]
    parts_csv: Option<PathBuf>,

    /// Output delimiter character for CSV files.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct DocumentJson<'a> {
    document: &'a str,
    #[serde(flatten)]
    record: &'a InvoiceRecord,
    warnings: &'a [ExtractWarning],
}

fn parse_options(args: &ExtractArgs) -> Result<ExtractOptions> {
    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    Ok(ExtractOptions {
        pages,
        early_exit: !args.no_early_exit,
        ..ExtractOptions::default()
    })
}

fn open_source(path: &Path) -> Box<dyn PageSource> {
    let is_text = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("txt"));
    if is_text {
        Box::new(TextFile::new(path))
    } else {
        Box::new(PdfFile::new(path))
    }
}

fn log_report(name: &str, report: &ExtractionReport, verbose: bool) {
    let (filled, total) = report.record.coverage();
    eprintln!(
        "{name}: {filled}/{total} fields, {} part(s), {} page(s) scanned",
        report.record.parts.len(),
        report.pages_scanned
    );
    if verbose {
        for warning in &report.warnings {
            eprintln!(
                "  - {:?} page={:?} field={:?}: {}",
                warning.code, warning.page, warning.field, warning.message
            );
        }
    }
}

fn write_csv_outputs(args: &ExtractArgs, reports: &[(&str, &ExtractionReport)]) -> Result<()> {
    let records = reports
        .iter()
        .map(|(name, report)| (*name, &report.record))
        .collect::<Vec<_>>();
    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }
    let delimiter = args.delimiter as u8;

    if let Some(path) = &args.summary_csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        write_summary_csv(file, &records, delimiter)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }
    if let Some(path) = &args.parts_csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create '{}'", path.display()))?;
        write_parts_csv(file, &records, delimiter)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
    }
    Ok(())
}

fn print_json(reports: &[(&str, &ExtractionReport)]) -> Result<()> {
    let documents = reports
        .iter()
        .map(|(document, report)| DocumentJson {
            document,
            record: &report.record,
            warnings: &report.warnings,
        })
        .collect::<Vec<_>>();
    let mut stdout = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut stdout, &documents).context("failed to encode JSON")?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Exit code 1 when any document was unreadable, 2 when nothing was found.
fn run_extract(args: &ExtractArgs) -> Result<u8> {
    let options = parse_options(args)?;
    let sources = args
        .inputs
        .iter()
        .map(|path| open_source(path))
        .collect::<Vec<_>>();

    let outcomes = extract_batch(&sources, &options);
    let mut unreadable = false;
    let mut reports = Vec::new();
    for DocumentOutcome { name, result } in &outcomes {
        match result {
            Ok(report) => {
                log_report(name, report, args.verbose);
                reports.push((name.as_str(), report));
            }
            Err(error) => {
                eprintln!("error: {name}: {error}");
                unreadable |= error.is_unreadable();
            }
        }
    }

    print_json(&reports)?;
    write_csv_outputs(args, &reports)?;

    if unreadable {
        Ok(1)
    } else if reports.iter().all(|(_, report)| report.record.is_empty()) {
        Ok(2)
    } else {
        Ok(0)
    }
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("invoice_layout=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(code) => ExitCode::from(code),
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
