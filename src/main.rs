use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use etfdiff::core::log::init_logging;
use etfdiff::core::rank::{SortDirection, SortKey, SortState};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SortArgs {
    /// Sort column: ticker, name, old-shares, new-shares, delta-shares, value
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Sort ascending instead of descending
    #[arg(short, long)]
    asc: bool,
}

impl From<SortArgs> for SortState {
    fn from(args: SortArgs) -> SortState {
        let default = SortState::default();
        SortState {
            key: args.sort.or(default.key),
            direction: if args.asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display aggregated holdings changes across all funds
    Changes {
        #[command(flatten)]
        sort: SortArgs,
    },
    /// Display one fund's changes and full current holdings
    Fund {
        /// Fund identifier, e.g. 00981A
        fund_id: String,

        #[command(flatten)]
        sort: SortArgs,
    },
}

impl From<Commands> for etfdiff::AppCommand {
    fn from(cmd: Commands) -> etfdiff::AppCommand {
        match cmd {
            Commands::Changes { sort } => etfdiff::AppCommand::Changes { sort: sort.into() },
            Commands::Fund { fund_id, sort } => etfdiff::AppCommand::Fund {
                fund_id,
                sort: sort.into(),
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => etfdiff::cli::setup::setup(),
        Some(cmd) => etfdiff::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
