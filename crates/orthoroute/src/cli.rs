use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use orthoroute::{Cell, Direction, Region, RoutingConfig};

#[derive(Parser)]
#[command(name = "orthoroute")]
#[command(author, version, about)]
#[command(long_about = "Orthogonal connector routing for grid diagrams.\n\n\
    Routes right-angle connectors between shapes on a character grid, keeping \
    clear of both shapes and preferring few bends.\n\n\
    Examples:\n  \
    orthoroute route --from 4,4 --from-region 0,0:7,6 --to 17,17 --to-region 12,15:20,23\n  \
    orthoroute route --from 2,2 --to 2,12 --events\n  \
    orthoroute batch connectors.yaml --format json\n  \
    orthoroute config set routing.turn_penalty 1.0")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route a single connector
    Route(RouteArgs),

    /// Route every connector listed in a YAML file
    Batch {
        /// YAML file with a top-level `connectors:` list
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
pub struct RouteArgs {
    /// Start cell
    #[arg(long, value_name = "ROW,COL", allow_hyphen_values = true)]
    pub from: Cell,

    /// Bounding box of the shape owning the start cell
    #[arg(long, value_name = "TOP,LEFT:BOTTOM,RIGHT", allow_hyphen_values = true)]
    pub from_region: Option<Region>,

    /// Direction to leave the start cell (up, right, down, left)
    #[arg(long, value_name = "DIR")]
    pub from_dir: Option<Direction>,

    /// End cell
    #[arg(long, value_name = "ROW,COL", allow_hyphen_values = true)]
    pub to: Cell,

    /// Bounding box of the shape owning the end cell
    #[arg(long, value_name = "TOP,LEFT:BOTTOM,RIGHT", allow_hyphen_values = true)]
    pub to_region: Option<Region>,

    /// Side of the end cell the path arrives from (up, right, down, left)
    #[arg(long, value_name = "DIR")]
    pub to_dir: Option<Direction>,

    /// Also print the search output before center-line correction
    #[arg(long)]
    pub raw: bool,

    /// Print the per-cell drawing events
    #[arg(long)]
    pub events: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Per-invocation overrides of the configured engine settings.
#[derive(Args)]
pub struct EngineArgs {
    /// Extra search cost per bend
    #[arg(long, value_name = "COST")]
    pub turn_penalty: Option<f64>,

    /// Skip moving runs onto the center line
    #[arg(long)]
    pub no_center: bool,
}

impl EngineArgs {
    pub fn apply(&self, mut config: RoutingConfig) -> anyhow::Result<RoutingConfig> {
        if let Some(penalty) = self.turn_penalty {
            if !penalty.is_finite() || penalty < 0.0 {
                anyhow::bail!("Invalid --turn-penalty: {penalty}. Must be zero or positive.");
            }
            config.turn_penalty = penalty;
        }
        if self.no_center {
            config.center_line = false;
        }
        Ok(config)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (routing.turn_penalty, routing.center_line)
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the configuration file location
    Path,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Route(args)) => crate::commands::route::run(args),
            Some(Commands::Batch {
                file,
                format,
                engine,
            }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::batch::run(&file, format, &engine, self.quiet)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::print_version();
                Ok(())
            }
            None => {
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
