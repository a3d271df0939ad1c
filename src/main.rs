use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tally::{QueryResult, ReportError, ReportRequest, ReportService};

// Many short-lived buffers per report; mimalloc keeps fragmentation down.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Render a query result JSON file as a PDF or XLSX report.
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
struct Args {
    /// Path to a `{ "data": ... }` / `{ "errors": [...] }` JSON file.
    #[arg(required_unless_present = "list_resources")]
    input: Option<PathBuf>,

    /// Output format: pdf or excel.
    #[arg(short, long, default_value = "pdf")]
    format: String,

    /// Where to write the report. Defaults to the configured filename.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resource name checked against the configured allow-list.
    #[arg(short, long, default_value = tally::service::DEFAULT_RESOURCE)]
    resource: String,

    /// Print a JSON summary instead of writing the report.
    #[arg(long)]
    meta: bool,

    /// Date the query was filtered by; echoed in the `--meta` summary.
    #[arg(long)]
    date: Option<String>,

    /// Print the configured resource names and exit.
    #[arg(long)]
    list_resources: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid query result JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn run(args: Args) -> Result<(), CliError> {
    let mut builder = ReportService::builder();
    if let Some(path) = &args.config {
        builder = builder.with_config_file(path)?;
    }
    let service = builder.build()?;

    if args.list_resources {
        for resource in service.resources() {
            println!("{}", resource);
        }
        return Ok(());
    }

    let Some(input) = &args.input else {
        return Ok(());
    };
    log::info!("Loading query result from {}", input.display());
    let result: QueryResult = serde_json::from_str(&fs::read_to_string(input)?)?;
    let mut request = ReportRequest::new(args.resource.clone(), args.format.clone(), result);
    if let Some(date) = &args.date {
        request = request.with_date(date.clone());
    }

    if args.meta {
        let summary = service.describe(&request)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let report = service.resolve_request(&request)?;
    let output = args.output.clone().unwrap_or_else(|| PathBuf::from(&report.filename));
    fs::write(&output, &report.bytes)?;
    println!("Wrote {} ({}, {} bytes)", output.display(), report.mime_type, report.bytes.len());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
