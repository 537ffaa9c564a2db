use anyhow::{Context, Result};
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use std::env;
use std::fs;
use std::path::Path;
use url::Url;

use lyngsat_scraper::{collect_region_links, find_free_tv_url, select_listing_table};

fn main() -> Result<()> {
    // Get URL from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Please provide a URL and a test name");
        eprintln!("Usage: cargo run --bin save_scrape_failure <URL> <test_name>");
        std::process::exit(1);
    }

    let url = &args[1];
    let test_name = &args[2];

    println!("Fetching HTML from {}...", url);

    // Create HTTP client
    let client = Client::new();

    // Fetch the page
    let response = client.get(url).send().context("Failed to send request")?;
    let html = response.text().context("Failed to get response text")?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    // Save the HTML for testing
    let file_path = failures_dir.join(format!("{}.html", test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    // Run each scraping heuristic against the page to confirm the failure
    println!("\nRunning the scraping heuristics against the page:");

    let page_url = Url::parse(url).context("Page URL is not a valid absolute URL")?;
    let document = Html::parse_document(&html);

    let free_tv_url = find_free_tv_url(&document, &page_url);
    let region_links = collect_region_links(&document, &page_url);
    let table_selector = Selector::parse("table").unwrap();
    let table_count = document.select(&table_selector).count();
    let listing_table = select_listing_table(&document);

    println!("HTML analysis results:");
    match &free_tv_url {
        Some(found) => println!("  - Free TV link: {}", found),
        None => println!("  - Free TV link: not found"),
    }
    println!("  - Region links under headings: {}", region_links.len());
    println!("  - Tables on the page: {}", table_count);
    println!("  - Has a qualifying listing table: {}", listing_table.is_some());

    if free_tv_url.is_none() && region_links.is_empty() && listing_table.is_none() {
        println!("✅ No heuristic matches this page - confirmed failure case");
        println!("\nThis test case has been saved and will be included in regression tests.");
    } else {
        println!("⚠️ At least one heuristic matched! This may not be a failure case.");
    }

    Ok(())
}
