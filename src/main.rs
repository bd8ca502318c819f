// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use sales_ingest::utils::logging::{
    format_card, format_error, format_info, format_step, format_success, format_warning,
};
use sales_ingest::{
    Aggregator, BackendClient, ColumnRole, Config, CsvExporter, DashboardView, IngestOutcome,
    IngestPipeline, JsonExporter, ProgressTracker, Validator,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

const LABEL_WIDTH: usize = 24;

#[derive(Parser)]
#[command(name = "sales_ingest")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Encoding-tolerant sales CSV ingestion and per-product aggregation", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest one or more files and print a per-file summary
    Ingest {
        #[arg(required = true, value_name = "FILES")]
        files: Vec<PathBuf>,

        #[arg(long)]
        export: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        pretty: bool,

        /// Also write a normalized csv next to the json exports
        #[arg(long)]
        csv: bool,
    },

    /// Summary cards and the ranked top products for one file
    Summary {
        file: PathBuf,

        #[arg(short, long, value_name = "N")]
        top: Option<usize>,
    },

    /// Show cleaned headers and the roles they were classified as
    Headers { file: PathBuf },

    /// Send a file to the ingestion backend
    Upload {
        file: PathBuf,

        #[arg(long, value_name = "NAME")]
        target_column: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    colored::control::set_override(cli.color);
    sales_ingest::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Sales ingest");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Ingest {
            files,
            export,
            output,
            pretty,
            csv,
        } => {
            cmd_ingest(&config, &files, export, output, pretty, csv, cli.color).await?;
        }
        Commands::Summary { file, top } => {
            cmd_summary(&config, &file, top).await?;
        }
        Commands::Headers { file } => {
            cmd_headers(&config, &file).await?;
        }
        Commands::Upload {
            file,
            target_column,
        } => {
            cmd_upload(&config, &file, target_column.as_deref()).await?;
        }
    }

    Ok(())
}

fn check_input(path: &Path) -> Result<()> {
    Validator::validate_file_path(path)?;
    if let Err(e) = Validator::validate_csv_extension(path) {
        warn!("{}", e);
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn cmd_ingest(
    config: &Config,
    files: &[PathBuf],
    export: bool,
    output: Option<PathBuf>,
    pretty: bool,
    csv: bool,
    colored_output: bool,
) -> Result<()> {
    info!("Starting ingestion of {} file(s)", files.len());
    let start_time = Instant::now();

    let pipeline = IngestPipeline::new(config).context("Failed to build ingest pipeline")?;

    let output_dir = output.unwrap_or_else(|| config.export.output_dir.clone());
    let json_exporter = if export {
        Some(JsonExporter::new(&output_dir, pretty || config.export.pretty)?)
    } else {
        None
    };
    let csv_exporter = if export && csv {
        Some(CsvExporter::new(&output_dir)?)
    } else {
        None
    };

    let tracker = ProgressTracker::with_color(files.len(), colored_output);

    for (idx, path) in files.iter().enumerate() {
        let name = display_name(path);
        tracker.set_current(&name);

        let result = match check_input(path) {
            Ok(()) => pipeline.ingest_file(path).await.map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => {
                let view = pipeline.dashboard(&outcome);
                tracker.println(&format_step(idx + 1, files.len(), &name));
                tracker.println(&render_outcome_line(&outcome, &view));

                if let Some(exporter) = &json_exporter {
                    let manifest = exporter.export_all(path, &outcome.payload, &view)?;
                    for file in &manifest.files {
                        tracker.println(&format_info(&format!("wrote {}", file.display())));
                    }
                }
                if let Some(exporter) = &csv_exporter {
                    let written = exporter.export(path, &outcome.payload)?;
                    tracker.println(&format_info(&format!("wrote {}", written.display())));
                }

                tracker.file_ingested(
                    outcome.payload.data.len(),
                    outcome.report.rows_dropped,
                    outcome.report.file_size,
                );
            }
            Err(e) => {
                error!("Failed to ingest {}: {}", path.display(), e);
                tracker.println(&format_error(&format!("{}: {}", name, e)));
                tracker.file_failed();
            }
        }
    }

    tracker.finish();
    let stats = tracker.get_stats();

    println!();
    println!(
        "{}",
        format_card("Files", &format!("{} ok, {} failed", stats.files_ingested, stats.files_failed))
    );
    println!("{}", format_card("Records", &stats.records_created.to_string()));
    println!("{}", format_card("Dropped rows", &stats.rows_dropped.to_string()));
    println!("{}", format_card("Bytes read", &stats.total_bytes.to_string()));

    info!(
        "Ingestion complete in {:.2}s ({:.0} records/s)",
        start_time.elapsed().as_secs_f64(),
        stats.records_per_second()
    );

    if stats.files_ingested == 0 {
        return Err(anyhow::anyhow!("No files could be ingested"));
    }

    Ok(())
}

fn render_outcome_line(outcome: &IngestOutcome, view: &DashboardView) -> String {
    let report = &outcome.report;
    if outcome.payload.is_empty() {
        return format_warning(&format!(
            "{} row(s) read, none had a product name ({})",
            report.rows_parsed, report.encoding
        ));
    }

    format_success(&format!(
        "{} record(s), {} product(s), total sales {:.2} ({}, {} dropped)",
        outcome.payload.data.len(),
        view.summary.product_count,
        view.summary.total_sales,
        report.encoding,
        report.rows_dropped
    ))
}

async fn cmd_summary(config: &Config, file: &Path, top: Option<usize>) -> Result<()> {
    check_input(file)?;

    let pipeline = IngestPipeline::new(config).context("Failed to build ingest pipeline")?;
    let outcome = pipeline
        .ingest_file(file)
        .await
        .with_context(|| format!("Failed to ingest {}", file.display()))?;

    let view = match top {
        Some(top_n) => {
            Validator::validate_top_n(top_n)?;
            Aggregator::new(top_n).dashboard(&outcome.payload.data)
        }
        None => pipeline.dashboard(&outcome),
    };

    if outcome.payload.is_empty() {
        println!(
            "\n{}\n",
            format_warning("No usable data: no row had a product name")
        );
        print_missing_roles(&outcome);
        return Ok(());
    }

    let summary = &view.summary;
    println!("\n{}\n", display_name(file).bold());
    println!("{}", format_card("Products", &summary.product_count.to_string()));
    println!("{}", format_card("Total quantity", &summary.total_quantity.to_string()));
    println!("{}", format_card("Total sales", &format!("{:.2}", summary.total_sales)));
    println!(
        "{}",
        format_card(
            "Top product",
            summary.top_product.as_deref().unwrap_or("-")
        )
    );

    println!("\n{}", "=".repeat(64));
    println!(
        "{:>3}  {:<width$} {:>12} {:>16}",
        "#",
        "Product",
        "Quantity",
        "Sales",
        width = LABEL_WIDTH
    );
    println!("{}", "-".repeat(64));

    for (idx, product) in view.top_products.iter().enumerate() {
        println!(
            "{:>3}  {:<width$} {:>12} {:>16.2}",
            idx + 1,
            Validator::truncate_label(&product.name, LABEL_WIDTH),
            product.total_quantity,
            product.total_sales,
            width = LABEL_WIDTH
        );
    }
    println!("{}\n", "=".repeat(64));

    print_missing_roles(&outcome);
    Ok(())
}

fn print_missing_roles(outcome: &IngestOutcome) {
    for role in outcome.report.mapping.missing_roles() {
        println!(
            "{}",
            format_warning(&format!("No column matched {}", role.canonical_key()))
        );
    }
}

async fn cmd_headers(config: &Config, file: &Path) -> Result<()> {
    check_input(file)?;

    let pipeline = IngestPipeline::new(config).context("Failed to build ingest pipeline")?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let schema = pipeline.inspect(&bytes)?;

    println!("\n{}\n", display_name(file).bold());
    for (idx, header) in schema.headers.iter().enumerate() {
        let roles = schema.mapping.roles_at(idx);
        let label = if roles.is_empty() {
            "-".dimmed().to_string()
        } else {
            roles
                .iter()
                .map(ColumnRole::to_string)
                .collect::<Vec<_>>()
                .join(", ")
                .green()
                .to_string()
        };
        println!("{:>3}  {:<width$} {}", idx, header, label, width = LABEL_WIDTH);
    }
    println!();

    for role in schema.mapping.missing_roles() {
        println!(
            "{}",
            format_warning(&format!("No column matched {}", role.canonical_key()))
        );
    }

    Ok(())
}

async fn cmd_upload(config: &Config, file: &Path, target_column: Option<&str>) -> Result<()> {
    check_input(file)?;
    Validator::validate_file_size(
        std::fs::metadata(file)
            .with_context(|| format!("Failed to stat {}", file.display()))?
            .len(),
        config.ingest.max_file_size_mb,
    )?;

    let client = BackendClient::new(&config.backend).context("Failed to create backend client")?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    info!("Uploading {} to {}", file.display(), client.upload_url());
    let descriptor = client
        .upload(&display_name(file), bytes, target_column)
        .await
        .context("Upload failed")?;

    println!("\n{}\n", format_success("Upload accepted"));
    println!("{}", format_card("File id", &descriptor.file_id));
    println!("{}", format_card("Filename", &descriptor.filename));
    println!("{}", format_card("Rows", &descriptor.row_count.to_string()));
    println!("{}", format_card("Columns", &descriptor.columns.join(", ")));
    println!(
        "{}",
        format_card(
            "Quantity column",
            descriptor.matched_quantity_column.as_deref().unwrap_or("-")
        )
    );
    println!(
        "{}",
        format_card(
            "Price column",
            descriptor.matched_price_column.as_deref().unwrap_or("-")
        )
    );
    if let Some(uploaded_at) = &descriptor.uploaded_at {
        println!("{}", format_card("Uploaded at", uploaded_at));
    }

    let mapping = descriptor.matched_mapping();
    for role in [ColumnRole::Price, ColumnRole::Quantity] {
        if mapping.get(role).is_none() {
            println!(
                "{}",
                format_warning(&format!("Backend matched no {} column", role.canonical_key()))
            );
        }
    }

    Ok(())
}
