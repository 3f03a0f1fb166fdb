mod daily;
mod rank;
mod report;
mod schedule;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use drama_core::TimeWindow;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "autodrama")]
#[command(about = "Finds controversial Reddit threads and cross-posts a drama report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Post today's most relatively based and most based threads
    Daily {
        /// Render the reports and print them instead of posting
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the daily post on the configured cron schedule until interrupted
    Schedule,
    /// Print ranked controversial submissions
    Rank {
        /// Subreddit to scan (defaults to the configured one)
        #[arg(long)]
        subreddit: Option<String>,

        /// Listing window: hour, day, week, month, year or all
        #[arg(long, default_value = "day")]
        window: TimeWindow,

        /// Maximum submissions to fetch (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Sort by absolute instead of relative basedness
        #[arg(long)]
        absolute: bool,
    },
    /// Render the report for one submission to a markdown file
    Report {
        /// Bare submission id, e.g. `1abcde`
        #[arg(long)]
        submission: String,

        /// Use the absolute comment basedness scale
        #[arg(long)]
        absolute: bool,

        /// Directory the report is written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = drama_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Daily { dry_run }) => daily::run_daily_command(&config, dry_run).await?,
        Some(Commands::Schedule) => schedule::run_schedule(config).await?,
        Some(Commands::Rank {
            subreddit,
            window,
            limit,
            absolute,
        }) => rank::run_rank(&config, subreddit.as_deref(), window, limit, absolute).await?,
        Some(Commands::Report {
            submission,
            absolute,
            out_dir,
        }) => {
            let path = report::run_report(&config, &submission, absolute, &out_dir).await?;
            println!("wrote {}", path.display());
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
