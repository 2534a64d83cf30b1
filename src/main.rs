pub mod types;
pub mod error;
pub mod config;
pub mod data;
pub mod selection;
pub mod series;
pub mod summary;
pub mod overlay;
pub mod secrets;
pub mod narrative;
pub mod render;
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Print the summary statistics for one country
    Summary {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        #[arg(long)]
        country: String,
    },
    /// Ask the chat completion API for a short text about one country
    Narrate {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
        #[arg(long)]
        country: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_table(&app_config.input.data_csv)?;
            server::start_server(app_config, table).await?;
        }
        Commands::Summary { config, country } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_table(&app_config.input.data_csv)?;

            let years = series::YearRange::STANDARD;
            let row = selection::select(&table, country)?;
            let stats = summary::summarize(&series::build_series(row, &years));

            println!("Summary Statistics for {}", row.country_name);
            for line in summary::summary_lines(&stats, years.last) {
                println!("{}", line);
            }
        }
        Commands::Narrate { config, country } => {
            let app_config = config::AppConfig::load_from_file(config)?;
            let table = data::load_table(&app_config.input.data_csv)?;
            let row = selection::select(&table, country)?;

            let client = narrative::NarrativeClient::new(&app_config.narrative)?;
            match client.fetch_narrative(&row.country_name).await {
                Ok(narrative) => println!("{}", narrative.text),
                Err(error::NarrativeError::Rejected { status, body }) => {
                    eprintln!("Request failed with status code: {}", status);
                    eprintln!("{}", body);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
