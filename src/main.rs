use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fii_dii_tracker::api::{run_server, AppState};
use fii_dii_tracker::codec::{load_snapshot, to_json_pretty, write_annotated};
use fii_dii_tracker::config::AppConfig;
use fii_dii_tracker::engine::{Assessment, SentimentEngine};
use fii_dii_tracker::error::TrackerError;
use fii_dii_tracker::report::render_text;
use fii_dii_tracker::sample::sample_snapshot_today;

#[derive(Parser)]
#[command(name = "fii_dii_tracker")]
#[command(about = "Classifies daily FII/DII F&O positioning and derives the overall market trend.", version)]
struct Cli {
    /// YAML config file (falls back to TRACKER_CONFIG, then ./config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a snapshot JSON file.
    Annotate {
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Print the built-in sample day, annotated.
    Sample {
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Serve the HTTP API.
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[tokio::main]
async fn main() -> Result<(), TrackerError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    // Setup Logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Loaded Configuration: {:?}", config);
    let engine = config.sentiment.build_engine();

    match cli.command {
        Commands::Annotate {
            input,
            output,
            format,
        } => {
            let snapshot = load_snapshot(&input)?;
            let assessment = engine.assess(&snapshot);
            match (output, format) {
                (Some(path), OutputFormat::Json) => {
                    write_annotated(&path, &assessment.snapshot)?;
                    log_written(&assessment, &path);
                }
                (Some(path), OutputFormat::Text) => {
                    std::fs::write(&path, render_text(&assessment))
                        .map_err(|e| TrackerError::io(path.display().to_string(), e))?;
                    log_written(&assessment, &path);
                }
                (None, format) => println!("{}", render(&assessment, format)?),
            }
        }
        Commands::Sample { format } => {
            let assessment = engine.assess(&sample_snapshot_today());
            println!("{}", render(&assessment, format)?);
        }
        Commands::Serve { bind } => {
            let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
            serve(engine, &bind_addr).await?;
        }
    }

    Ok(())
}

fn render(assessment: &Assessment, format: OutputFormat) -> Result<String, TrackerError> {
    match format {
        OutputFormat::Json => to_json_pretty(&assessment.snapshot),
        OutputFormat::Text => Ok(render_text(assessment)),
    }
}

fn log_written(assessment: &Assessment, path: &Path) {
    info!(
        "Wrote {} annotation for {} to {}",
        assessment.snapshot.overall_trend,
        assessment.snapshot.date,
        path.display()
    );
}

async fn serve(engine: SentimentEngine, bind_addr: &str) -> Result<(), TrackerError> {
    info!("Initializing API Server...");
    let state = Arc::new(AppState { engine });
    run_server(state, bind_addr).await
}
