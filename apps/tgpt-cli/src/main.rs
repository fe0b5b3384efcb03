//! `tgpt`: ingest saved wiki pages, search them, and suggest NFR categories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tgpt_core::config::{Config, Settings};
use tgpt_core::traits::Embedder;
use tgpt_core::wiki::parse_content_response;
use tgpt_core::NfrCategory;
use tgpt_vector::{build_embedder, SearchCore};

#[derive(Parser, Debug)]
#[command(name = "tgpt", version, about = "Vector search over wiki pages and NFR categories")]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use the deterministic hashing embedder instead of MiniLM
    #[arg(long, global = true)]
    fake_embeddings: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ingest a saved content response and report what was indexed
    Ingest {
        #[arg(long)]
        pages: PathBuf,
    },
    /// Ingest a saved content response, then query it
    Search {
        #[arg(long)]
        pages: PathBuf,
        /// Number of results (defaults to search.default_top_k)
        #[arg(short)]
        k: Option<usize>,
        query: String,
    },
    /// Suggest the three closest NFR categories for a requirement
    Suggest { text: String },
    /// List the NFR categories
    Categories,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn,tgpt=info,tgpt_vector=info",
        1 => "info,tgpt_vector=debug,tgpt_embed=debug",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Categories = cli.command {
        for c in NfrCategory::ALL {
            println!("{:<16} {}", c.as_str(), c.description());
        }
        return Ok(());
    }

    if cli.fake_embeddings {
        std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");
    }
    let settings = Config::load().and_then(|c| c.settings()).context("Error loading config")?;
    let base = std::env::current_dir()?;
    let bar = ProgressBar::hidden();
    let embedder = ProgressEmbedder { inner: build_embedder(&settings.embed, &base)?, bar: bar.clone() };
    let core = SearchCore::new(Arc::new(embedder), settings.search.clone())?;

    match &cli.command {
        Commands::Ingest { pages } => {
            let report = ingest(&core, &settings, pages, &bar)?;
            println!("{report}");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Search { pages, k, query } => {
            ingest(&core, &settings, pages, &bar)?;
            let hits = match k {
                Some(k) => core.query(query, *k)?,
                None => core.query_default(query)?,
            };
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Suggest { text } => {
            let suggestions = core.suggest_category(text)?;
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        Commands::Categories => {}
    }
    Ok(())
}

fn ingest(core: &SearchCore, settings: &Settings, path: &Path, bar: &ProgressBar) -> Result<tgpt_vector::IngestReport> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let base_url = settings.wiki.base_url.as_deref().unwrap_or_default();
    let space_key = settings.wiki.space_key.as_deref().unwrap_or_default();
    let pages = parse_content_response(&json, base_url, space_key)?;
    debug!(pages = pages.len(), path = %path.display(), "parsed content response");

    bar.set_length(pages.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%)")?
            .progress_chars("#>-"),
    );
    bar.set_draw_target(ProgressDrawTarget::stderr());
    let report = core.ingest_documents(pages);
    bar.finish_and_clear();
    Ok(report?)
}

/// Advances a progress bar by the number of texts embedded.
struct ProgressEmbedder {
    inner: Arc<dyn Embedder>,
    bar: ProgressBar,
}

impl Embedder for ProgressEmbedder {
    fn embedder_id(&self) -> &str { self.inner.embedder_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        let out = self.inner.embed_batch(texts)?;
        self.bar.inc(texts.len() as u64);
        Ok(out)
    }
}
