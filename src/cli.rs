use std::path::{Path, PathBuf};

mod replay;
mod session;
mod table;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use replay::Replay;
use session::Session;
use table::Output;
use terminal::Styled;
use tracing::instrument;
use vacations::{App, Config};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file with the starting roster and vacations
    ///
    /// Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Session(Session::default()))
            .run(self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to prompts and tables
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Record vacations interactively (default)
    Session(Session),

    /// Show the vacations on record, latest start date first
    Table(List),

    /// Apply a script of form actions and show the result
    ///
    /// One action per line: `employee NAME`, `type TYPE`, `start DATE`,
    /// `end DATE`, `submit`, `add-employee`, `name NAME`, `confirm`,
    /// `cancel`. Blank lines and lines starting with '#' are skipped.
    Replay(Replay),

    /// Write a starter configuration file
    Init(Init),
}

impl Command {
    fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Session(command) => command.run(&load_config(config)?)?,
            Self::Table(command) => command.run(&load_config(config)?)?,
            Self::Replay(command) => command.run(&load_config(config)?)?,
            Self::Init(command) => command.run(config)?,
        }
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!("{e}")),
        None => {
            tracing::debug!("No configuration given, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct List {
    #[command(flatten)]
    output: Output,
}

impl List {
    #[instrument(skip_all)]
    fn run(self, config: &Config) -> anyhow::Result<()> {
        let app = App::from_config(config).context("Failed to load vacations on record")?;
        self.output.print(app.sorted())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Where to write the configuration (defaults to --config, then
    /// 'vacations.toml')
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument(skip(self))]
    fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        let path = self
            .path
            .or_else(|| config.map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("vacations.toml"));

        if path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite it)",
                path.display()
            );
        }

        Config::default()
            .save(&path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        println!("{}", format!("Created {}", path.display()).recorded());
        println!();
        println!("Next steps:");
        println!("  vac --config {} session", path.display());
        Ok(())
    }
}
