use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use reqwest::blocking::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Endpoint of the Wayback Machine's CDX index API.
pub const WAYBACK_CDX_URL: &str = "http://web.archive.org/cdx/search/cdx";

/// Capture timestamp (YYYYMMDDhhmmss) mapped to the archived page URL.
/// The fixed-width timestamps make the BTreeMap's key order chronological.
pub type SnapshotMap = BTreeMap<String, String>;

#[derive(Debug, Serialize)]
struct CdxQuery<'a> {
    url: &'a str,
    from: &'a str,
    to: &'a str,
    output: &'a str,
    fl: &'a str,
    filter: &'a str,
    collapse: &'a str,
}

/// Today's UTC date in the compact YYYYMMDD form the CDX API expects.
pub fn today_compact() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

/// Build the replay URL for a capture of `original` taken at `timestamp`.
pub fn archived_page_url(timestamp: &str, original: &str) -> String {
    format!("http://web.archive.org/web/{}/{}", timestamp, original)
}

/// Parse a CDX JSON response into a snapshot map.
///
/// The body is an array of string arrays. Row 0 is a header and is
/// discarded; rows with fewer than two fields are skipped.
pub fn parse_cdx_response(body: &str) -> Result<SnapshotMap> {
    let rows: Vec<Vec<String>> =
        serde_json::from_str(body).context("Response is not a JSON array of rows")?;

    let mut snapshots = SnapshotMap::new();
    for row in rows.iter().skip(1) {
        if row.len() < 2 {
            continue;
        }
        snapshots.insert(row[0].clone(), archived_page_url(&row[0], &row[1]));
    }

    Ok(snapshots)
}

/// Query the archive index for captures of `target_url` between `from` and
/// `to` (YYYYMMDD), collapsed to one HTTP-200 capture per calendar month.
pub fn fetch_monthly_snapshots(
    client: &Client,
    target_url: &str,
    from: &str,
    to: &str,
) -> Result<SnapshotMap> {
    let query = CdxQuery {
        url: target_url,
        from,
        to,
        output: "json",
        fl: "timestamp,original",
        filter: "statuscode:200",
        collapse: "timestamp:6", // 1 capture per month
    };

    let response = client
        .get(WAYBACK_CDX_URL)
        .query(&query)
        .send()
        .context("Failed to send request to the archive index")?
        .error_for_status()
        .context("Archive index returned an error status")?;

    let body = response.text().context("Failed to get response text")?;
    parse_cdx_response(&body)
}

/// Write the snapshot map to `path` as pretty-printed JSON.
pub fn write_url_cache(path: &Path, snapshots: &SnapshotMap) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snapshots).context("Failed to serialize snapshot URLs")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Read a previously written snapshot map from `path`.
pub fn read_url_cache(path: &Path) -> Result<SnapshotMap> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Fetch the monthly snapshots of `target_url` and cache them at `path`.
///
/// A fetch or parse failure is logged and leaves no file behind, so the
/// caller proceeds and simply finds nothing to scrape. Only a failure to
/// write a non-empty map is propagated.
pub fn refresh_url_cache(
    client: &Client,
    target_url: &str,
    from: &str,
    to: &str,
    path: &Path,
) -> Result<()> {
    println!(
        "{}",
        format!("\n📡 Fetching archived URLs for {}...\n", target_url).cyan()
    );

    let snapshots = match fetch_monthly_snapshots(client, target_url, from, to) {
        Ok(snapshots) => snapshots,
        Err(e) => {
            eprintln!(
                "{}",
                format!("\n❌ Error fetching data for {}: {}", target_url, e).red()
            );
            SnapshotMap::new()
        }
    };

    if snapshots.is_empty() {
        println!(
            "{}",
            "\n⚠️ No results found for the given URL and date range.\n".yellow()
        );
        return Ok(());
    }

    write_url_cache(path, &snapshots)?;
    println!(
        "{}",
        format!("\n✅ Done: Wayback URLs saved to {}\n", path.display()).green()
    );

    Ok(())
}
