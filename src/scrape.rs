use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A candidate region sub-page discovered on the Free TV listing page.
/// The URL is always absolute, resolved against the page it was found on.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLink {
    pub text: String,
    pub url: Url,
}

/// Fetch a page as text, treating non-2xx statuses as errors.
pub fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Request for {} returned an error status", url))?;
    response
        .text()
        .with_context(|| format!("Failed to get response text from {}", url))
}

/// True for an anchor that leads to the Free TV index page.
pub fn is_free_tv_anchor(text: &str, href: &str) -> bool {
    text.contains("Free TV") && href.contains("free") && href.contains("index")
}

/// Find the Free TV index link on a base page.
///
/// Anchors are scanned in document order and the first match wins; its href
/// is resolved against `base`.
pub fn find_free_tv_url(document: &Html, base: &Url) -> Option<Url> {
    let anchor_selector = Selector::parse("a").unwrap();

    let anchor = document.select(&anchor_selector).find(|anchor| {
        let text = anchor.text().collect::<String>();
        let href = anchor.value().attr("href").unwrap_or("").trim();
        is_free_tv_anchor(text.trim(), href)
    })?;

    let href = anchor.value().attr("href").unwrap_or("").trim();
    base.join(href).ok()
}

/// Text of the element's direct text-node children, descendant elements
/// excluded.
fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True for a bold heading that groups region links: it must contain at
/// least one anchor, with "Free" either in the heading's own text or leading
/// its first anchor's text.
pub fn is_region_heading(bold: ElementRef) -> bool {
    let anchor_selector = Selector::parse("a").unwrap();

    let first_anchor = match bold.select(&anchor_selector).next() {
        Some(anchor) => anchor,
        None => return false,
    };

    own_text(bold).contains("Free")
        || first_anchor
            .text()
            .collect::<String>()
            .trim()
            .starts_with("Free")
}

/// Collect region links from the Free TV page, logging every anchor found
/// under a qualifying bold heading.
///
/// Anchors whose text starts with "Free" are logged but not collected; so
/// are anchors without a resolvable href (logged as N/A). Order is document
/// order across all headings.
pub fn collect_region_links(document: &Html, page_url: &Url) -> Vec<RegionLink> {
    let bold_selector = Selector::parse("b").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let mut region_links = Vec::new();

    for bold in document.select(&bold_selector) {
        if !is_region_heading(bold) {
            continue;
        }

        let heading = collapse_whitespace(bold.text().collect::<String>().trim());
        println!("{}", format!("📌 Found b element: {}", heading).yellow());

        for (index, anchor) in bold.select(&anchor_selector).enumerate() {
            let text = anchor.text().collect::<String>().trim().to_string();
            let resolved = anchor
                .value()
                .attr("href")
                .and_then(|href| page_url.join(href.trim()).ok());

            println!("{}", format!("   🔗 Link {}:", index + 1).magenta());
            println!("{}", format!("      Text: {}", text).magenta());
            match &resolved {
                Some(url) => println!("{}", format!("      URL: {}", url).magenta()),
                None => println!("{}", "      URL: N/A".magenta()),
            }

            if !text.starts_with("Free") {
                if let Some(url) = resolved {
                    region_links.push(RegionLink { text, url });
                }
            }
        }
        println!(); // blank line between heading groups
    }

    region_links
}

/// Structural test for a plausible channel-listing table: enough cells and
/// none of the advertising or news-block markers.
pub fn table_qualifies(table: ElementRef) -> bool {
    let cell_selector = Selector::parse("td").unwrap();
    let advert_selector = Selector::parse(r#"a[href*="advert"]"#).unwrap();
    let italic_selector = Selector::parse("i").unwrap();
    let script_selector = Selector::parse("script").unwrap();

    let cell_count = table.select(&cell_selector).count();
    let text = table.text().collect::<String>();

    cell_count > 4
        && !text.contains("Advertisements")
        && !text.contains("News at")
        && table.select(&advert_selector).next().is_none()
        && table.select(&italic_selector).next().is_none()
        && table.select(&script_selector).next().is_none()
}

/// Pick the channel-listing table on a region page: tables are scanned in
/// reverse document order and the first qualifying one wins.
pub fn select_listing_table(document: &Html) -> Option<ElementRef<'_>> {
    let table_selector = Selector::parse("table").unwrap();

    let tables: Vec<ElementRef> = document.select(&table_selector).collect();
    tables.into_iter().rev().find(|table| table_qualifies(*table))
}

/// Render the table's rows in document order, each the trimmed text of its
/// cells joined with " | ".
pub fn format_table_rows(table: ElementRef) -> Vec<String> {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    table
        .select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

fn scrape_region(client: &Client, region: &RegionLink) -> Result<()> {
    let html = fetch_html(client, region.url.as_str())?;
    let document = Html::parse_document(&html);

    match select_listing_table(&document) {
        Some(table) => {
            let row_selector = Selector::parse("tr").unwrap();
            let row_count = table.select(&row_selector).count();
            println!(
                "{}",
                format!("   📊 Found suitable table with {} rows", row_count).green()
            );
            for row in format_table_rows(table) {
                println!("{}", format!("      {}", row).white());
            }
        }
        None => {
            println!(
                "{}",
                format!("   ⚠️ No suitable table found for {}", region.text).yellow()
            );
        }
    }

    Ok(())
}

/// Scrape one archived base page: find its Free TV index, walk the region
/// links, and print each region's channel table.
pub fn scrape_base_url(client: &Client, base_url: &str) -> Result<()> {
    let base =
        Url::parse(base_url).with_context(|| format!("Invalid base URL {}", base_url))?;

    let html = fetch_html(client, base_url)?;
    let document = Html::parse_document(&html);

    let free_tv_url = match find_free_tv_url(&document, &base) {
        Some(url) => url,
        None => {
            println!(
                "{}",
                format!("⚠️ No Free TV URL found on {}\n", base_url).yellow()
            );
            return Ok(());
        }
    };
    println!(
        "{}",
        format!("📺 Found Free TV URL: {}\n", free_tv_url).green()
    );

    let free_tv_html = fetch_html(client, free_tv_url.as_str())?;
    let free_tv_document = Html::parse_document(&free_tv_html);
    let region_links = collect_region_links(&free_tv_document, &free_tv_url);

    for region in &region_links {
        println!(
            "{}",
            format!("\n🌎 Processing region: {}", region.text).blue()
        );
        if let Err(e) = scrape_region(client, region) {
            eprintln!(
                "{}",
                format!("   ❌ Error processing {}: {}", region.text, e).red()
            );
        }
    }

    Ok(())
}

/// Process a batch of archived base URLs sequentially.
///
/// Each URL is isolated: an error is logged and the batch moves on, and the
/// finished banner and separator rule are printed either way.
pub fn scrape_urls(client: &Client, urls: &[String]) {
    for base_url in urls {
        println!(
            "{}",
            format!("\n🔍 Processing base URL: {}\n", base_url).cyan()
        );

        if let Err(e) = scrape_base_url(client, base_url) {
            eprintln!(
                "{}",
                format!("\n❌ Error processing {}: {}\n", base_url, e).red()
            );
        }

        println!(
            "{}",
            format!("✅ Finished processing {}\n", base_url).cyan()
        );
        println!(
            "{}",
            "---------------------------------------------------".bright_black()
        );
    }
}
