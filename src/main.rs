// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use harbor_ops::config::DEFAULT_CONFIG_PATH;
use harbor_ops::launcher::{self, VenvProvisioner};
use harbor_ops::utils::logging::format_error;
use harbor_ops::workflow::{self, Action, InspectOptions};
use harbor_ops::{BackendClient, Config, Validator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "harbor")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "Operator CLI for the Harbor RAG backend", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    /// Backend base URL, overriding backend.base_url from the config file
    #[arg(long, value_name = "URL", env = "HARBOR_BACKEND_URL")]
    backend_url: Option<String>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stats, ask the backend to index a site, show stats again
    Index {
        /// Site to crawl (defaults to indexing.base_url)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Show stats, discovered URLs and a preview of stored documents
    Inspect {
        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long, value_name = "NUM")]
        offset: Option<usize>,

        #[arg(long, value_name = "NUM")]
        preview_lines: Option<usize>,

        /// Site root passed to the discover endpoint
        #[arg(long, value_name = "URL")]
        discover_url: Option<String>,
    },

    /// Prepare the backend's environment and start it in the foreground
    Launch {
        #[arg(long, value_name = "DIR")]
        backend_dir: Option<PathBuf>,

        /// Interpreter used to create the virtual environment
        #[arg(long)]
        python: Option<String>,
    },

    /// Print the backend's health reply
    Health,

    /// Print index statistics
    Stats,

    /// List the URLs the backend would crawl
    Discover {
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Report stored documents with a content preview
    Documents {
        #[arg(short, long, value_name = "NUM")]
        limit: Option<usize>,

        #[arg(long, value_name = "NUM")]
        offset: Option<usize>,

        #[arg(long, value_name = "NUM")]
        preview_lines: Option<usize>,
    },

    /// Ask the backend a question
    Chat { question: String },

    /// Print the backend's suggested questions
    Questions,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    harbor_ops::utils::logging::init_logger(cli.color, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format_error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;

    if let Some(url) = &cli.backend_url {
        config.backend.base_url = url.clone();
    }

    match cli.command {
        Commands::Index { base_url } => {
            let base_url = base_url.unwrap_or_else(|| config.indexing.base_url.clone());
            Validator::validate_url(&base_url)?;
            cmd_index(&config, &base_url).await?;
        }
        Commands::Inspect {
            limit,
            offset,
            preview_lines,
            discover_url,
        } => {
            let options = InspectOptions {
                limit: limit.unwrap_or(config.inspect.document_limit),
                offset,
                preview_lines: preview_lines.unwrap_or(config.inspect.preview_lines),
                discover_base_url: discover_url,
            };
            cmd_inspect(&config, &options).await?;
        }
        Commands::Launch {
            backend_dir,
            python,
        } => {
            if let Some(dir) = backend_dir {
                config.launcher.backend_dir = dir;
            }
            if let Some(python) = python {
                config.launcher.python = python;
            }
            cmd_launch(&config)?;
        }
        Commands::Health => cmd_action(&config, Action::Health).await?,
        Commands::Stats => cmd_action(&config, Action::Stats).await?,
        Commands::Discover { base_url } => {
            cmd_action(&config, Action::Discover { base_url }).await?
        }
        Commands::Documents {
            limit,
            offset,
            preview_lines,
        } => {
            let action = Action::Documents {
                limit: limit.unwrap_or(config.inspect.document_limit),
                offset,
                preview_lines: preview_lines.unwrap_or(config.inspect.preview_lines),
            };
            cmd_action(&config, action).await?
        }
        Commands::Chat { question } => cmd_action(&config, Action::Chat { question }).await?,
        Commands::Questions => cmd_action(&config, Action::Questions).await?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    debug!("Loading configuration from: {}", cli.config.display());

    if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")
    } else {
        if cli.config != PathBuf::from(DEFAULT_CONFIG_PATH) {
            warn!(
                "Config file {} not found, using default configuration",
                cli.config.display()
            );
        }
        Config::load(None).context("Failed to load configuration")
    }
}

fn backend_client(config: &Config) -> Result<BackendClient> {
    BackendClient::new(&config.backend).context("Failed to create backend client")
}

async fn cmd_index(config: &Config, base_url: &str) -> Result<()> {
    info!("Index run against {}", config.backend.base_url);

    let client = backend_client(config)?;
    let mut out = std::io::stdout();
    workflow::run_indexing(&client, base_url, &mut out).await?;

    Ok(())
}

async fn cmd_inspect(config: &Config, options: &InspectOptions) -> Result<()> {
    Validator::validate_limit(options.limit)?;
    Validator::validate_limit(options.preview_lines)?;

    let client = backend_client(config)?;
    let mut out = std::io::stdout();
    let shown = workflow::run_inspection(&client, options, &mut out).await?;
    info!("Reported {} documents", shown);

    Ok(())
}

async fn cmd_action(config: &Config, action: Action) -> Result<()> {
    if let Action::Documents {
        limit,
        preview_lines,
        ..
    } = &action
    {
        Validator::validate_limit(*limit)?;
        Validator::validate_limit(*preview_lines)?;
    }

    let client = backend_client(config)?;
    let mut out = std::io::stdout();
    workflow::run_action(&client, &action, &mut out).await?;

    Ok(())
}

fn cmd_launch(config: &Config) -> Result<()> {
    info!(
        "Launching backend from {}",
        config.launcher.backend_dir.display()
    );

    let provisioner = VenvProvisioner::from_config(&config.launcher)?;
    let mut out = std::io::stdout();
    launcher::launch(&config.launcher, &provisioner, &mut out)?;

    Ok(())
}
