use anyhow::{Context, Result};
use clap::Parser;
use fitcheck_core::{AugmentRequest, Identity, Secrets, Settings};
use std::path::PathBuf;

mod app;
mod commands;
mod staging;
mod theme;

#[derive(Parser)]
#[command(name = "fitcheck")]
#[command(about = "FitCheck - should this be AI?")]
#[command(version)]
struct Cli {
    /// Run a single prompt, print the transcript, and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Your name
    #[arg(long, default_value = "")]
    name: String,

    /// Your district email
    #[arg(long, default_value = "")]
    email: String,

    /// Access code
    #[arg(long)]
    code: Option<String>,

    /// Attach an excerpt of this file to the first message
    #[arg(long)]
    file: Option<PathBuf>,

    /// Add web search results for this query to the first message
    #[arg(long)]
    search: Option<String>,

    /// Generate an image for this prompt with the first message
    #[arg(long)]
    image: Option<String>,

    /// Chat model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color theme (dark, chalkboard, paper)
    #[arg(long, default_value = "dark")]
    theme: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Settings::load(),
    };

    if let Some(ref model) = cli.model {
        settings.llm.model = model.clone();
    }
    if let Some(temperature) = cli.temperature {
        settings.llm.temperature = temperature;
    }

    let secrets = Secrets::from_env(&settings);
    let mut session = settings
        .build_session(&secrets)?
        .with_identity(Identity::new(&cli.name, &cli.email));
    if let Some(code) = cli.code {
        session.set_access_code(code);
    }

    let mut request = AugmentRequest {
        upload: None,
        search_query: cli.search,
        image_prompt: cli.image,
    };
    if let Some(path) = &cli.file {
        if let Err(e) = request.attach_file(path) {
            tracing::warn!("continuing without {}: {e}", path.display());
        }
    }

    if let Some(prompt) = cli.prompt {
        app::run_single_prompt(session, &prompt, request).await?;
    } else {
        app::run_tui(session, &cli.theme, request).await?;
    }

    Ok(())
}
