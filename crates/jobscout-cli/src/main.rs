mod export;
mod hunt;
mod listings;
mod tracker;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobscout_core::Environment;
use tracing_subscriber::EnvFilter;

use tracker::TrackerCommands;

#[derive(Debug, Parser)]
#[command(name = "jobscout")]
#[command(about = "Job board harvester, scorer and application tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest, filter, score, record and export using the hunt configuration
    Hunt {
        /// Hunt YAML to use instead of `JOBSCOUT_HUNT_CONFIG`
        #[arg(long)]
        config: Option<PathBuf>,
        /// Score and print matches without writing to the tracker or export folder
        #[arg(long)]
        dry_run: bool,
    },
    /// Harvest search results and store them as listings
    Search {
        /// Search keyword; repeat for several
        #[arg(long = "keyword", required = true)]
        keywords: Vec<String>,
        /// Listing group to store under
        #[arg(long, default_value = "default")]
        group: String,
        /// Recorded as the author of every stored row
        #[arg(long, default_value = "cli")]
        created_by: String,
        /// Result pages to walk per keyword
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one page of stored listings
    Listings {
        #[arg(long, default_value = "default")]
        group: String,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        /// Token printed by the previous page
        #[arg(long)]
        token: Option<String>,
    },
    /// Application tracker
    Tracker {
        #[command(subcommand)]
        command: TrackerCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

/// Production logs are written without ANSI colour codes.
fn plain_logs(env: &Environment) -> bool {
    matches!(env, Environment::Production)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = jobscout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);
    if plain_logs(&config.env) {
        subscriber.with_ansi(false).init();
    } else {
        subscriber.compact().init();
    }

    let Some(command) = cli.command else {
        println!("no command given; see `jobscout --help`");
        return Ok(());
    };

    let pool_config = jobscout_db::PoolConfig::from_app_config(&config);
    let pool = jobscout_db::connect_pool(&config.database_url, pool_config).await?;

    if let Commands::Db { command } = &command {
        match command {
            DbCommands::Ping => {
                jobscout_db::ping(&pool).await?;
                println!("database ok");
            }
            DbCommands::Migrate => {
                let applied = jobscout_db::run_migrations(&pool).await?;
                println!("applied {applied} migration(s)");
            }
        }
        return Ok(());
    }

    jobscout_db::run_migrations(&pool).await?;

    match command {
        Commands::Hunt {
            config: hunt_path,
            dry_run,
        } => hunt::run_hunt(&pool, &config, hunt_path.as_deref(), dry_run).await?,
        Commands::Search {
            keywords,
            group,
            created_by,
            pages,
        } => listings::run_search(&pool, &config, &keywords, &group, &created_by, pages).await?,
        Commands::Listings {
            group,
            page_size,
            token,
        } => listings::run_listings(&pool, &group, page_size, token.as_deref()).await?,
        Commands::Tracker { command } => tracker::run_tracker(&pool, command).await?,
        Commands::Db { .. } => {}
    }

    Ok(())
}
