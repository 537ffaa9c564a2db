// Export the pipeline modules
pub mod archive;
pub mod scrape;

// Re-export tests for integration testing
#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::archive::{
    archived_page_url, fetch_monthly_snapshots, parse_cdx_response, read_url_cache,
    refresh_url_cache, today_compact, write_url_cache, SnapshotMap, WAYBACK_CDX_URL,
};
pub use crate::scrape::{
    collect_region_links, fetch_html, find_free_tv_url, format_table_rows, is_free_tv_anchor,
    is_region_heading, scrape_base_url, scrape_urls, select_listing_table, table_qualifies,
    RegionLink,
};
