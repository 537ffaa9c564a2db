use anyhow::Result;
use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::path::Path;

use lyngsat_scraper::{fetch_monthly_snapshots, today_compact, write_url_cache};

fn main() -> Result<()> {
    // Get target URL and optional date bounds from command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Please provide a URL as an argument");
        eprintln!("Usage: cargo run --bin archive_index <URL> [FROM] [TO]");
        eprintln!("Example: cargo run --bin archive_index http://www.lyngsat.com 20000101 20101231");
        std::process::exit(1);
    }

    let target_url = &args[1];
    let from = args.get(2).cloned().unwrap_or_else(|| "20000101".to_string());
    let to = args.get(3).cloned().unwrap_or_else(today_compact);

    // Validate date bounds
    if NaiveDate::parse_from_str(&from, "%Y%m%d").is_err() {
        eprintln!("FROM must be in YYYYMMDD format (e.g., 20000101)");
        std::process::exit(1);
    }
    if NaiveDate::parse_from_str(&to, "%Y%m%d").is_err() {
        eprintln!("TO must be in YYYYMMDD format (e.g., 20101231)");
        std::process::exit(1);
    }

    println!("Querying the archive index for {}...", target_url);

    let client = Client::new();
    let snapshots = fetch_monthly_snapshots(&client, target_url, &from, &to)?;

    println!(
        "Found {} monthly captures of {} between {} and {}",
        snapshots.len(),
        target_url,
        from,
        to
    );

    if snapshots.is_empty() {
        println!("No captures found for this period");
        return Ok(());
    }

    println!();
    for (timestamp, archived_url) in &snapshots {
        println!("{}  {}", timestamp, archived_url);
    }

    // Write to file as JSON
    let output_file_name = format!("snapshots_{}_{}.json", from, to);
    write_url_cache(Path::new(&output_file_name), &snapshots)?;

    println!("\nSnapshot map saved to {}", output_file_name);

    Ok(())
}
