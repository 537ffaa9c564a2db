use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use reqwest::blocking::Client;
use std::path::PathBuf;

use lyngsat_scraper::{read_url_cache, refresh_url_cache, scrape_urls, today_compact};

/// Scrape archived lyngsat.com snapshots for regional Free TV channel tables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Site whose archived snapshots are scraped
    #[arg(long, default_value = "http://www.lyngsat.com")]
    host: String,

    /// Start of the capture window (YYYYMMDD)
    #[arg(long, default_value = "20000101")]
    from: String,

    /// End of the capture window (YYYYMMDD)
    #[arg(long, default_value_t = today_compact())]
    to: String,

    /// Snapshot URL cache; refetched only when the file does not exist
    #[arg(long, default_value = "wayback_urls.json")]
    cache_file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    NaiveDate::parse_from_str(&cli.from, "%Y%m%d").context("--from must be a YYYYMMDD date")?;
    NaiveDate::parse_from_str(&cli.to, "%Y%m%d").context("--to must be a YYYYMMDD date")?;

    let client = Client::new();

    // The cache file's existence alone decides whether to hit the archive
    // index again; its contents are never checked for staleness.
    if cli.cache_file.exists() {
        println!(
            "{}",
            "📁 Wayback URLs file already exists. Reading from file...\n".green()
        );
    } else {
        println!(
            "{}",
            "📁 Wayback URLs file not found. Fetching archived URLs...\n".yellow()
        );
        refresh_url_cache(&client, &cli.host, &cli.from, &cli.to, &cli.cache_file)?;
    }

    match read_url_cache(&cli.cache_file) {
        Ok(snapshots) => {
            let urls: Vec<String> = snapshots.into_values().collect();
            println!(
                "{}",
                format!("\n🔎 Processing {} URLs...\n", urls.len()).cyan()
            );
            scrape_urls(&client, &urls);
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!("\n❌ Error reading or parsing the JSON file: {}", e).red()
            );
        }
    }

    println!("{}", "\n✅ Script execution completed.\n".green());

    Ok(())
}
