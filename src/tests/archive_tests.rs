use crate::archive::{
    archived_page_url, parse_cdx_response, read_url_cache, today_compact, write_url_cache,
    SnapshotMap,
};

// Test the documented CDX response shape: a header row followed by
// [timestamp, original] pairs
#[test]
fn test_parse_cdx_response() {
    let body = r#"[
        ["timestamp","original"],
        ["20200101","http://x"],
        ["20200201","http://x"]
    ]"#;

    let snapshots = parse_cdx_response(body).unwrap();

    assert_eq!(snapshots.len(), 2);
    assert_eq!(
        snapshots.get("20200101").map(String::as_str),
        Some("http://web.archive.org/web/20200101/http://x")
    );
    assert_eq!(
        snapshots.get("20200201").map(String::as_str),
        Some("http://web.archive.org/web/20200201/http://x")
    );
}

#[test]
fn test_header_only_response_yields_empty_map() {
    let body = r#"[["timestamp","original"]]"#;
    let snapshots = parse_cdx_response(body).unwrap();
    assert!(snapshots.is_empty());
}

#[test]
fn test_empty_response_yields_empty_map() {
    let snapshots = parse_cdx_response("[]").unwrap();
    assert!(snapshots.is_empty());
}

#[test]
fn test_short_rows_are_skipped() {
    let body = r#"[
        ["timestamp","original"],
        ["20200101"],
        ["20200201","http://x"]
    ]"#;

    let snapshots = parse_cdx_response(body).unwrap();

    assert_eq!(snapshots.len(), 1);
    assert!(snapshots.contains_key("20200201"));
}

#[test]
fn test_non_array_body_is_an_error() {
    assert!(parse_cdx_response(r#"{"not": "rows"}"#).is_err());
    assert!(parse_cdx_response("<html></html>").is_err());
}

#[test]
fn test_archived_page_url_format() {
    assert_eq!(
        archived_page_url("20200101000000", "http://www.lyngsat.com/"),
        "http://web.archive.org/web/20200101000000/http://www.lyngsat.com/"
    );
}

#[test]
fn test_today_compact_matches_utc_date() {
    // Sample UTC on both sides of the call in case midnight rolls over
    let before = chrono::Utc::now().format("%Y%m%d").to_string();
    let today = today_compact();
    let after = chrono::Utc::now().format("%Y%m%d").to_string();

    assert!(today == before || today == after);
}

#[test]
fn test_snapshots_iterate_chronologically() {
    let body = r#"[
        ["timestamp","original"],
        ["20200301000000","http://x"],
        ["20200101000000","http://x"],
        ["20200201000000","http://x"]
    ]"#;

    let snapshots = parse_cdx_response(body).unwrap();
    let timestamps: Vec<&str> = snapshots.keys().map(String::as_str).collect();

    assert_eq!(
        timestamps,
        ["20200101000000", "20200201000000", "20200301000000"]
    );
}

#[test]
fn test_url_cache_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wayback_urls.json");

    let mut snapshots = SnapshotMap::new();
    snapshots.insert(
        "20200101000000".to_string(),
        archived_page_url("20200101000000", "http://www.lyngsat.com/"),
    );
    snapshots.insert(
        "20200201000000".to_string(),
        archived_page_url("20200201000000", "http://www.lyngsat.com/"),
    );

    write_url_cache(&path, &snapshots).unwrap();
    let read_back = read_url_cache(&path).unwrap();
    assert_eq!(read_back, snapshots);

    // The cache is written pretty-printed
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains('\n'));
}

#[test]
fn test_read_url_cache_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    assert!(read_url_cache(&path).is_err());
}

#[test]
fn test_read_url_cache_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wayback_urls.json");
    std::fs::write(&path, "not json").unwrap();

    let result = read_url_cache(&path);
    assert!(result.is_err());
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .contains("Failed to parse"));
}
