//! betfeed
//!
//! Ingests pasted betting feeds and predicts over/under goal outcomes,
//! either as an HTTP API or one-shot from the command line.

use betfeed::{
    config::Config,
    pipeline::FeedService,
    server::{self, AppState},
    storage::Database,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "betfeed")]
#[command(about = "Betting feed parser and over/under goals predictor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "betfeed.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,
    /// Ingest a historical results feed
    Results {
        /// Feed file (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Ingest an odds feed and predict every fixture
    Odds {
        /// Feed file (reads stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Predict a single fixture from stored history
    Analyze {
        home: String,
        away: String,
        /// Bookmaker goal line
        #[arg(short, long, default_value = "2.5")]
        goal_line: f64,
    },
    /// Show the most recent predictions
    Predictions {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;
    let db = Database::connect(&config.database.url()).await?;
    let service = Arc::new(FeedService::new(Arc::new(db)));

    match cli.command {
        Commands::Serve => {
            let state = AppState::new(service, config.feed.list_limit);
            server::serve(state, &config.server.bind_addr).await?;
        }
        Commands::Results { file } => {
            let input = read_input(file).await?;
            let ingest = service.ingest_results(&input).await?;
            print_json(&ingest)?;
        }
        Commands::Odds { file } => {
            let input = read_input(file).await?;
            let ingest = service.ingest_odds(&input).await?;
            print_json(&ingest)?;
        }
        Commands::Analyze {
            home,
            away,
            goal_line,
        } => {
            let analysis = service
                .analyzer()
                .analyze_match(&home, &away, goal_line)
                .await?;
            print_json(&analysis)?;
        }
        Commands::Predictions { limit } => {
            let predictions = service.recent_predictions(limit).await?;
            print_json(&predictions)?;
        }
    }

    Ok(())
}

async fn read_input(file: Option<PathBuf>) -> anyhow::Result<String> {
    let input = match file {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    Ok(input)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
