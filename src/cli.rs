//! Command-line interface for tracelens.
//!
//! Paste-and-inspect workflow: point the binary at a file holding the
//! `extensions` object of an Apollo GraphQL response (or pipe it on
//! stdin) and get the waterfall on stdout.

use crate::core::{Config, ConfigBuilder, Result, TraceLensError};
use crate::render;
use crate::session::Session;
use clap::Parser;
use std::io::Read as _;
use std::path::PathBuf;

/// Terminal-native flame-graph inspector for Apollo GraphQL traces
#[derive(Parser, Debug)]
#[command(name = "tracelens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Trace file to inspect; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Short-span threshold as a percentage of total duration
    #[arg(long, env = "TRACELENS_THRESHOLD")]
    pub threshold: Option<u8>,

    /// Hide spans shorter than the threshold
    #[arg(long, env = "TRACELENS_HIDE_SHORT")]
    pub hide_short: bool,

    /// Timeline width in terminal columns
    #[arg(long, env = "TRACELENS_WIDTH")]
    pub width: Option<usize>,

    /// Print the per-span detail listing after the waterfall
    #[arg(long)]
    pub details: bool,

    /// Inspect the embedded demo trace
    #[arg(long, conflicts_with = "file")]
    pub demo: bool,

    /// Validate the input and print a summary without rendering
    #[arg(long)]
    pub check: bool,

    /// Enable debug logging
    #[arg(short, long, env = "TRACELENS_DEBUG")]
    pub debug: bool,

    /// Configuration file path (default: ~/.config/tracelens/config.yaml)
    #[arg(short, long, env = "TRACELENS_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Load configuration with proper precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest priority)
    pub fn load_config(&self) -> Result<Config> {
        let mut builder = ConfigBuilder::new();

        let config_path = if let Some(path) = &self.config {
            Some(path.clone())
        } else {
            dirs::config_dir()
                .map(|d| d.join("tracelens").join("config.yaml"))
                .filter(|p| p.exists())
        };

        if let Some(path) = config_path {
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    builder = builder.from_yaml(&content)?;
                    tracing::info!("Loaded configuration from: {:?}", path);
                }
                Err(e) => {
                    return Err(TraceLensError::config(format!(
                        "Failed to read config file {:?}: {}",
                        path, e
                    )));
                }
            }
        }

        self.build_config_from_args(builder)
    }

    fn build_config_from_args(&self, mut builder: ConfigBuilder) -> Result<Config> {
        if let Some(threshold) = self.threshold {
            builder = builder.threshold_percent(threshold);
        }
        if let Some(width) = self.width {
            builder = builder.width(width);
        }
        if self.hide_short {
            builder = builder.hide_short_spans(true);
        }
        if self.details {
            builder = builder.details(true);
        }

        builder.debug(self.debug).build()
    }

    /// Initialize logging based on flags and environment.
    pub fn init_logging(&self) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let env_log_level =
            std::env::var("TRACELENS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
        let log_level = if self.debug {
            "debug"
        } else {
            env_log_level.as_str()
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TraceLensError::config(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }

    /// Reads the raw trace text from the file argument or stdin.
    fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                Ok(input)
            }
        }
    }
}

/// Execute the tracelens command.
pub fn execute(cli: Cli) -> Result<()> {
    cli.init_logging()?;

    let config = cli.load_config()?;

    let mut session = Session::with_view(config.view);
    if cli.demo {
        session.load_demo();
    } else {
        let input = cli.read_input()?;
        if let Err(e) = session.load(&input) {
            tracing::error!(category = e.category(), "rejected trace input");
            return Err(e);
        }
    }

    // load resets the view to defaults; re-apply the resolved config
    session.set_threshold_percent(config.view.threshold());
    session.set_hide_short_spans(config.view.hide_short_spans);

    if cli.check {
        return print_summary(&session, &config);
    }

    print!("{}", render::render_session(&session, &config.render)?);
    Ok(())
}

fn print_summary(session: &Session, config: &Config) -> Result<()> {
    let payload = session
        .payload()
        .ok_or_else(|| TraceLensError::render("no trace loaded"))?;

    println!("Trace is valid!");
    if let Some(version) = payload.version {
        println!("  Version: {}", version);
    }
    println!("  Total duration: {:.4} ms", payload.duration_ms());
    println!("  Resolvers: {}", payload.resolver_count());
    println!("  Roots: {}", session.forest().len());

    if config.render.details {
        println!("{}", serde_json::to_string_pretty(payload)?);
    }

    Ok(())
}
