use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use log::{debug, info};
use reqwest::Client;

use seat_scraper::{Catalog, Config, Http, Influx};

/// Records the open seats of every section on a catalog page.
#[derive(Parser, Debug)]
#[command(name = "seat-scraper")]
struct Args {
    /// A link to the page you wish to monitor (like https://app.testudo.umd.edu/soc/202008/CMSC)
    pagelink: String,

    /// Accepted for compatibility; schedule repeated runs externally
    #[arg(short, long, default_value_t = false)]
    auto: bool,

    /// Configuration file, layered over the defaults and under SEATS_* variables
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the points as JSON instead of writing them
    #[arg(short = 'n', long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.auto {
        debug!("--auto has no effect");
    }

    let config = Config::load(args.config.as_deref())?;
    let client = Client::new();
    let catalog = Catalog::new(Http::new(client.clone()), &config);

    if args.dry_run {
        let points = catalog.scrape(&args.pagelink, Utc::now()).await?;
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    let influx = Influx::new(client, &config)?;
    let written = seat_scraper::record(&catalog, &influx, &args.pagelink).await?;
    info!("recorded {} sections from {}", written, args.pagelink);

    Ok(())
}
