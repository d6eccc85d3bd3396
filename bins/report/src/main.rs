//! Consign seller detail report builder
//!
//! Joins a vehicle detail table and a charge table, paginates the result and
//! writes the report with its page layout as JSON for the rendering step.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use consign_core::pagination::{PageSet, Paginator};
use consign_core::reports::{Entry, ReportMeta, ReportService, SellerReport};
use consign_core::table::RawTable;
use consign_shared::{AppConfig, AppError, AppResult};

/// Shown instead of a report while a source is missing.
const WAITING_NOTICE: &str = "Waiting for data...";

#[derive(Parser, Debug)]
#[command(name = "consign", version, about = "Build a seller detail report")]
struct Cli {
    /// Vehicle detail table (JSON object of columns)
    #[arg(long)]
    detail: Option<PathBuf>,

    /// Charge table (JSON object of columns)
    #[arg(long)]
    charges: Option<PathBuf>,

    /// Extra configuration file layered over config/default
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (default stdout)
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory to write `seller-detail-<seller>.json` into
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Report and page layout handed to the renderer.
#[derive(Debug, Serialize)]
struct Rendered<'a> {
    report: &'a SellerReport,
    total_pages: usize,
    pages: PageSet<'a, Entry>,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "consign=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.downcast_ref::<AppError>();
            let code = app_error.map_or(1, AppError::exit_code);
            tracing::error!(
                error = %format!("{err:#}"),
                error_code = app_error.map_or("UNKNOWN_ERROR", AppError::error_code),
                exit_code = code,
                "Report failed"
            );
            eprintln!("Error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let detail = cli.detail.as_deref().map(load_table).transpose()?;
    let charges = cli.charges.as_deref().map(load_table).transpose()?;

    let meta = ReportMeta {
        report_date: config
            .report
            .report_date
            .clone()
            .unwrap_or_else(default_report_date),
        page_number: config.report.page_number_seed(),
    };

    let Some(report) =
        ReportService::assemble(detail.as_ref(), charges.as_ref(), &config.columns, meta)
    else {
        println!("{WAITING_NOTICE}");
        return Ok(());
    };

    let paginator = Paginator::from_layout(&config.layout);
    let pages = paginator.paginate(report.entries());
    if pages.is_empty() {
        info!(seller = %report.seller_name(), "Report has no entries; no pages to render");
    }
    info!(
        seller = %report.seller_name(),
        entries = report.entries().len(),
        pages = pages.total_pages(),
        total_net_proceeds = %report.totals().total_net_proceeds,
        "Report built"
    );

    let rendered = Rendered {
        report: &report,
        total_pages: pages.total_pages(),
        pages,
    };
    let target = output_path(cli, &report);
    write_output(target.as_deref(), &rendered).context("Failed to write report")?;
    if let Some(path) = target {
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}

fn load_table(path: &Path) -> AppResult<RawTable> {
    let file = File::open(path)
        .map_err(|e| AppError::Source(format!("{}: {e}", path.display())))?;
    RawTable::from_json_reader(BufReader::new(file))
        .map_err(|e| AppError::Source(format!("{}: {e}", path.display())))
}

/// `M/D/YYYY, h:mm:ss AM` in local time.
fn default_report_date() -> String {
    chrono::Local::now()
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

fn output_path(cli: &Cli, report: &SellerReport) -> Option<PathBuf> {
    cli.output.clone().or_else(|| {
        cli.output_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", report.export_file_stem())))
    })
}

fn write_output(target: Option<&Path>, rendered: &Rendered<'_>) -> AppResult<()> {
    let output_error = |e: &dyn std::fmt::Display| AppError::Output(e.to_string());

    let mut writer: Box<dyn Write> = match target {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            AppError::Output(format!("{}: {e}", path.display()))
        })?)),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, rendered).map_err(|e| output_error(&e))?;
    writeln!(writer).map_err(|e| output_error(&e))?;
    writer.flush().map_err(|e| output_error(&e))
}
