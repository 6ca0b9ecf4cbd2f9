mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use tracing_subscriber::EnvFilter;

use portfolio_kit_stats::summary::DEFAULT_RANGE;

#[derive(Parser)]
#[command(name = "portfolio-kit")]
#[command(version, about = "Coding-activity stats for a personal portfolio page", long_about = None)]
struct Cli {
    /// Log requests and failures at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Configure the WakaTime token and relay
    ///
    /// Find your secret API key at: https://wakatime.com/settings/api-key
    /// The WAKATIME_API_KEY environment variable overrides the saved token.
    Configure,

    /// Fetch an endpoint under /users/current/ and print the JSON
    Fetch {
        /// Endpoint suffix, e.g. "summaries" or "stats/last_7_days"
        endpoint: String,

        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Skip the relay and call the API host directly
        #[arg(long)]
        direct: bool,

        /// Log failures and print nothing instead of exiting with an error
        #[arg(long)]
        lenient: bool,
    },

    /// Show total coding time for a stats range
    Summary {
        /// Stats range, e.g. last_7_days, last_30_days, all_time
        #[arg(short, long, default_value = DEFAULT_RANGE)]
        range: String,

        /// Skip the relay and call the API host directly
        #[arg(long)]
        direct: bool,
    },

    /// Show the active configuration
    Status,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,portfolio_kit=debug,portfolio_kit_stats=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Configure => commands::configure::run().await,
        Command::Fetch {
            endpoint,
            compact,
            direct,
            lenient,
        } => commands::fetch::run(&endpoint, compact, direct, lenient).await,
        Command::Summary { range, direct } => commands::summary::run(&range, direct).await,
        Command::Status => commands::status::run().await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "portfolio-kit", &mut io::stdout());
            Ok(())
        }
    }
}
