use std::path::PathBuf;

use cellrank::config::{CellRankConfig, ConfigBuilder, ConfigLoader, LogFormat, LogLevel};
use cellrank_cli::args::resolve_log_level;
use cellrank_cli::commands::Commands;
use cellrank_cli::context::{CellRankCliContext, load_model};
use cellrank_cli::handlers::*;
use cellrank_cli::output::output_error;
use clap::Parser;

#[derive(Parser)]
#[command(name = "cellrank")]
#[command(about = "Graph-based entity disambiguation for table cells", long_about = None)]
#[command(version = cellrank::VERSION)]
struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Surface-form index file (json or tsv)
    #[arg(long, global = true)]
    surface_forms: Option<PathBuf>,

    /// Embedding model file (word2vec text format)
    #[arg(long, global = true)]
    embeddings: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Priority: machine flag > env var > cli arg > default
    let output_format = if cli.machine {
        "json".to_string()
    } else if let Ok(env_output) = std::env::var("CELLRANK_OUTPUT") {
        env_output
    } else {
        cli.output.clone()
    };

    if let Err(e) = run(cli, &output_format).await {
        output_error(&e, &output_format);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output_format: &str) -> cellrank::Result<()> {
    if matches!(cli.command, Commands::Version) {
        println!("Cellrank CLI v{}", cellrank::VERSION);
        return Ok(());
    }

    let config = load_config(&cli)?;

    // Keep the file writer alive until exit.
    let _log_guard = cellrank::logging::init(&config.logging)?;

    match cli.command {
        Commands::Version => {}

        Commands::Link(args) => {
            let config = apply_link_overrides(config, &args)?;
            let ctx = CellRankCliContext::new(config).await?;
            handle_link_command(&ctx, &args, output_format)?;
        }

        Commands::Candidates(args) => {
            let ctx = CellRankCliContext::new(config).await?;
            handle_candidates_command(&ctx, &args.text, output_format);
        }

        Commands::Similarity(args) => {
            let model = load_model(&config).await?;
            handle_similarity_command(&model, &args.a, &args.b, output_format);
        }

        Commands::Model(args) => {
            let model = load_model(&config).await?;
            handle_model_command(&model, args.vector.as_deref(), output_format);
        }
    }

    Ok(())
}

/// Layered configuration with the global flags applied on top.
fn load_config(cli: &Cli) -> cellrank::Result<CellRankConfig> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let mut builder = ConfigBuilder::from_config(config);

    if let Some(path) = &cli.surface_forms {
        builder = builder.with_surface_forms(path);
    }
    if let Some(path) = &cli.embeddings {
        builder = builder.with_embeddings(path);
    }

    let is_quiet = cli.quiet
        || std::env::var("CELLRANK_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    match resolve_log_level(is_quiet, cli.machine, cli.verbose, cli.log_level.as_deref())? {
        Some(level) => builder = builder.with_log_level(level),
        None if cli.config.is_none() => {
            builder = builder
                .with_log_level(LogLevel::Warn)
                .with_log_format(LogFormat::Compact);
        }
        None => {}
    }

    Ok(builder.build()?)
}
