use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;

use shelfscan::api::ScrapeServer;
use shelfscan::config::Config;
use shelfscan::presentation::{RatingLocale, render_cards};
use shelfscan::service::{ScrapeError, ScrapeService};

#[derive(Parser)]
#[command(version, about = "Scrape marketplace search results into product records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API until interrupted
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Scrape one keyword and print the results
    Search {
        keyword: String,
        #[arg(long, value_enum, default_value_t = DisplayLocale::En)]
        locale: DisplayLocale,
        /// Print the raw JSON records instead of cards
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DisplayLocale {
    PtBr,
    En,
}

impl DisplayLocale {
    fn rating_locale(self) -> RatingLocale {
        match self {
            DisplayLocale::PtBr => RatingLocale::SOURCE,
            DisplayLocale::En => RatingLocale::ENGLISH,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (also picks up the log crate macros)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    let service = ScrapeService::from_config(&config).context("failed to set up fetcher")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let handle = ScrapeServer::new(&config, Arc::new(service)).start().await?;
            tokio::signal::ctrl_c()
                .await
                .context("failed to listen for ctrl-c")?;
            tracing::info!("shutting down");
            handle.shutdown().await?;
        }
        Command::Search {
            keyword,
            locale,
            json,
        } => match service.scrape(&keyword).await {
            Ok(outcome) => {
                let records = outcome.into_records();
                if json {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                } else {
                    println!("{}", render_cards(&records, &locale.rating_locale()));
                }
            }
            Err(ScrapeError::NotFound) => println!("No products found."),
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
