//! RAG console binary
//!
//! Run with: cargo run -p rag-console -- [COMMAND]
//!
//! Without a command the interactive console starts. Each subcommand runs a
//! single workflow and prints the resulting panel.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rag_console::interactive::{render, Console, StdinConfirm};
use rag_console::types::DocumentId;
use rag_console::workflows::{AutoConfirm, Confirm, Settled};
use rag_console::{ConsoleConfig, HttpGateway, Store, Tab, TabController, Workflows};

#[derive(Parser)]
#[command(name = "rag-console")]
#[command(about = "Ask questions, upload PDFs and manage documents of a RAG backend")]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/rag-console/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend origin, e.g. http://localhost:8000
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question
    Ask {
        /// Question text
        question: Vec<String>,
    },

    /// List documents in the knowledge base
    List,

    /// Add a text document
    Add {
        /// Document content
        content: String,

        /// Metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,
    },

    /// Delete a document
    Delete {
        /// Document id
        id: String,

        /// Skip the confirmation question
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload a PDF file
    Upload {
        /// Path to the PDF
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        ConsoleConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
        config.validate().context("Invalid --backend-url")?;
    }
    if cli.no_color || !config.display.color {
        console::set_colors_enabled(false);
    }

    // Logs go to stderr so they never interleave with rendered panels
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rag_console={}", config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Backend: {}", config.backend.base_url);

    let gateway = Arc::new(HttpGateway::new(&config.backend));
    let workflows = Workflows::new(Store::new(), gateway);

    let Some(command) = cli.command else {
        Console::new(workflows).run().await?;
        return Ok(());
    };

    let tabs = TabController::new(workflows.store().clone());
    let settled = match command {
        Commands::Ask { question } => {
            tabs.select(Tab::Query);
            workflows.set_query(question.join(" "));
            workflows.submit_query().await
        }
        Commands::List => {
            tabs.select(Tab::Manage);
            let settled = workflows.refresh_documents().await;
            if settled.is_failure() {
                eprintln!("Could not load documents from {}", config.backend.base_url);
            }
            settled
        }
        Commands::Add { content, metadata } => {
            tabs.select(Tab::Manage);
            workflows.set_document_content(content);
            workflows.set_document_metadata(metadata.unwrap_or_default());
            workflows.add_document().await
        }
        Commands::Delete { id, yes } => {
            tabs.select(Tab::Manage);
            let mut confirmer: Box<dyn Confirm> = if yes {
                Box::new(AutoConfirm(true))
            } else {
                Box::new(StdinConfirm)
            };
            match workflows
                .confirm_delete(confirmer.as_mut(), DocumentId::new(id))
                .await
            {
                Some(confirmed) => workflows.delete_document(confirmed).await,
                None => Settled::Skipped,
            }
        }
        Commands::Upload { path } => {
            tabs.select(Tab::Upload);
            let path = path.to_string_lossy().into_owned();
            match workflows.select_path(&shellexpand::tilde(&path)) {
                Settled::Succeeded => workflows.upload_selected().await,
                other => other,
            }
        }
    };

    println!("{}", render::render_active(&workflows.store().snapshot()));

    if settled.is_failure() {
        std::process::exit(1);
    }
    Ok(())
}
