//! CLI entrypoint for Examforge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use examforge_application::{
    KnowledgeStore, LlmGateway, RunPipelineInput, RunPipelineOutput, RunPipelineUseCase,
};
use examforge_domain::{Document, Item};
use examforge_infrastructure::{
    ConfigLoader, FileConfig, HttpKnowledgeStore, InMemoryKnowledgeStore, OpenAiCompatGateway,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod progress;

use progress::ConsoleProgress;

#[derive(Parser)]
#[command(name = "examforge", version, about = "Retrieval-grounded exam item generation")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a config file (overrides discovered configs)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ignore all config files and use built-in defaults
    #[arg(long, global = true)]
    no_config: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one generation/validation/decision pass
    Run {
        /// Free-form teacher instructions for this run
        #[arg(short, long)]
        prompt: String,

        /// JSON file with previously accepted items to re-validate
        #[arg(short, long)]
        items: Option<PathBuf>,

        /// Suppress progress output on stderr
        #[arg(short, long)]
        quiet: bool,
    },

    /// Add documents to the knowledge base
    Ingest {
        /// JSON array of documents, or a plain-text file ingested whole
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    match cli.command {
        Commands::Run {
            prompt,
            items,
            quiet,
        } => run(&config, prompt, items, quiet).await,
        Commands::Ingest { file } => ingest(&config, &file).await,
    }
}

async fn run(config: &FileConfig, prompt: String, items: Option<PathBuf>, quiet: bool) -> Result<()> {
    let old_items = match items {
        Some(path) => load_items(&path)?,
        None => vec![],
    };

    info!(old_items = old_items.len(), "Starting run");

    // === Dependency Injection ===
    let timeout = Duration::from_secs(config.provider.timeout_seconds);
    let gateway = Arc::new(OpenAiCompatGateway::new(
        &config.provider.base_url,
        &config.provider.api_key_env,
        timeout,
    )?);

    // The knowledge store is the only adapter chosen at runtime: a remote
    // vector store when configured, an in-process index otherwise.
    match &config.retrieval.base_url {
        Some(url) => {
            let store = Arc::new(HttpKnowledgeStore::new(url, timeout)?);
            execute(gateway, store, config, prompt, old_items, quiet).await
        }
        None => {
            let store = Arc::new(InMemoryKnowledgeStore::new());
            execute(gateway, store, config, prompt, old_items, quiet).await
        }
    }
}

async fn execute<G, S>(
    gateway: Arc<G>,
    store: Arc<S>,
    config: &FileConfig,
    prompt: String,
    old_items: Vec<Item>,
    quiet: bool,
) -> Result<()>
where
    G: LlmGateway + 'static,
    S: KnowledgeStore + 'static,
{
    let use_case = RunPipelineUseCase::new(gateway, store, config.to_settings());
    let input = RunPipelineInput::new(prompt).with_old_items(old_items);

    let output = if quiet {
        use_case.execute(input).await?
    } else {
        let progress = ConsoleProgress::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    println!("{}", format_report(&output)?);
    Ok(())
}

/// Serialize the run outcome as a JSON report on stdout
fn format_report(output: &RunPipelineOutput) -> Result<String> {
    let report = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "accepted_bank": output.accepted_bank.items(),
        "rejected_bank": output.rejected_bank.items(),
        "newly_generated": output.newly_generated,
        "high_threshold": output.thresholds.high(),
        "low_threshold": output.thresholds.low(),
        "telemetry": {
            "generation_parse_failures": output.telemetry.generation_parse_failures,
            "scoring_fallbacks": output.telemetry.scoring_fallbacks,
            "validated_kept": output.telemetry.validated_kept,
            "validated_dropped": output.telemetry.validated_dropped,
            "accepted": output.telemetry.accepted,
            "rejected": output.telemetry.rejected,
            "review_resolved": output.telemetry.review_resolved,
        },
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

fn load_items(path: &PathBuf) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file {}", path.display()))?;
    let items: Vec<Item> = serde_json::from_str(&content)
        .with_context(|| format!("Items file {} is not a JSON array of items", path.display()))?;
    Ok(items)
}

async fn ingest(config: &FileConfig, file: &PathBuf) -> Result<()> {
    let Some(url) = &config.retrieval.base_url else {
        bail!("Ingest requires a configured knowledge store ([retrieval] base_url)");
    };

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    // JSON files carry explicit documents; anything else is one document
    let documents: Vec<Document> = if file.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("{} is not a JSON array of documents", file.display()))?
    } else {
        vec![Document::new(content)
            .with_metadata(serde_json::json!({ "source": file.display().to_string() }))]
    };

    let timeout = Duration::from_secs(config.provider.timeout_seconds);
    let store = HttpKnowledgeStore::new(url, timeout)?;
    let inserted = store.add_documents(&documents).await?;

    println!("Inserted {inserted} document(s)");
    Ok(())
}
