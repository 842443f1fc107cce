use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ezlo::session::Session;
use ezlo::store::Store;

mod cmd;

#[derive(Parser)]
#[command(name = "ezlo")]
#[command(version, about = "AI powered article generator for Hugo blogs")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the state store (defaults to <config dir>/ezlo/store.json)
    #[arg(long, global = true, env = "EZLO_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure API key, Hugo site path and blog niche
    Config {
        /// Hugo site root
        #[arg(long)]
        site_path: Option<PathBuf>,
        /// API key for the generation backend
        #[arg(long)]
        api_key: Option<String>,
        /// What the blog is about
        #[arg(long)]
        niche: Option<String>,
    },
    /// Show configuration and draft progress
    Status,
    /// List ideas, generate 3 new ones, or clear them
    Ideas {
        #[arg(value_enum)]
        action: Option<IdeasAction>,
    },
    /// Print the draft path, create a new draft, or open it in $EDITOR
    Draft {
        #[arg(value_enum)]
        action: Option<DraftAction>,
    },
    /// Print the thesis, or select idea <INDEX> and generate its thesis
    Thesis { index: Option<usize> },
    /// Generate an article body from the thesis
    Body,
    /// Preview the banner, or generate one for the active idea
    Banner {
        #[arg(value_enum)]
        action: Option<BannerAction>,
    },
    /// Copy the draft and banner into the Hugo site
    Publish,
    /// Start the audio generator page
    Audio {
        /// Port to serve on
        #[arg(short, long, default_value_t = ezlo::preview::DEFAULT_PORT)]
        port: u16,

        /// Don't open the browser
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IdeasAction {
    /// Generate 3 new ideas
    Gen,
    /// Clear all ideas
    Clear,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DraftAction {
    /// Create a new draft
    New,
    /// Open the draft in $EDITOR
    Edit,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BannerAction {
    /// Generate a banner for the active idea
    Gen,
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        match &cli.command {
            Some(Commands::Audio { .. }) => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // A missing .env is fine; everything it could set has a default.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(&cli);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    let store_path = cli.store.unwrap_or_else(Store::default_path);

    if let Err(e) = run(store_path, command).await {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(store_path: PathBuf, command: Commands) -> Result<()> {
    tracing::debug!(store = %store_path.display(), "opening store");
    let mut session = Session::open(&store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    if let Commands::Config {
        site_path,
        api_key,
        niche,
    } = command
    {
        return cmd::cmd_config(
            &mut session,
            cmd::ConfigArgs {
                site_path,
                api_key,
                niche,
            },
        );
    }

    if let Commands::Status = command {
        return cmd::cmd_status(&session);
    }

    let client = cmd::build_client(&session)?;

    match command {
        Commands::Config { .. } | Commands::Status => unreachable!("handled above"),
        Commands::Ideas { action } => cmd::cmd_ideas(&mut session, client.as_ref(), action).await?,
        Commands::Draft { action } => cmd::cmd_draft(&mut session, action)?,
        Commands::Thesis { index } => cmd::cmd_thesis(&mut session, client.as_ref(), index).await?,
        Commands::Body => cmd::cmd_body(&mut session, client.as_ref()).await?,
        Commands::Banner { action } => {
            cmd::cmd_banner(&mut session, client.as_ref(), action).await?
        }
        Commands::Publish => cmd::cmd_publish(&mut session)?,
        Commands::Audio { port, no_open } => {
            cmd::cmd_audio(&session, client, port, !no_open).await?
        }
    }

    Ok(())
}
