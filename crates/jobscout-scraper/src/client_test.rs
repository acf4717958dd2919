use super::*;

#[test]
fn search_url_encodes_keyword_and_page() {
    let url = search_url("https://www.pracuj.pl", "kierownik sprzedaży", 2);
    assert_eq!(
        url,
        "https://www.pracuj.pl/praca/kierownik%20sprzeda%C5%BCy;kw?pn=2"
    );
}

#[test]
fn search_url_escapes_path_delimiters() {
    let url = search_url("https://jobs.example.com", "B2B/KAM; sales?", 1);
    assert_eq!(url, "https://jobs.example.com/praca/B2B%2FKAM%3B%20sales%3F;kw?pn=1");
}

#[test]
fn search_url_trims_keyword() {
    assert_eq!(
        search_url("https://jobs.example.com", "  handlowiec ", 1),
        "https://jobs.example.com/praca/handlowiec;kw?pn=1"
    );
}

#[test]
fn normalize_base_url_strips_trailing_slashes() {
    assert_eq!(
        normalize_base_url(" https://www.pracuj.pl// ").unwrap(),
        "https://www.pracuj.pl"
    );
}

#[test]
fn normalize_base_url_rejects_relative() {
    let err = normalize_base_url("www.pracuj.pl").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidUrl { .. }),
        "expected InvalidUrl, got: {err:?}"
    );
}

#[test]
fn origin_of_drops_path_and_keeps_port() {
    assert_eq!(
        origin_of("http://127.0.0.1:8080/praca/x;kw?pn=1"),
        "http://127.0.0.1:8080"
    );
    assert_eq!(origin_of("not a url"), "not a url");
}

#[test]
fn zero_concurrency_is_clamped_to_one() {
    let client = JobBoardClient::new(
        "https://jobs.example.com",
        5,
        "jobscout-test/0.1",
        0,
        RetryPolicy::immediate(1),
    )
    .unwrap();
    assert_eq!(client.permits.available_permits(), 1);
}

#[tokio::test]
async fn listing_fetch_rejects_relative_url_without_request() {
    let client = JobBoardClient::new(
        "https://jobs.example.com",
        5,
        "jobscout-test/0.1",
        1,
        RetryPolicy::immediate(3),
    )
    .unwrap();
    let err = client.fetch_listing_page("/praca/x,oferta,1").await.unwrap_err();
    assert!(matches!(err, ScraperError::InvalidUrl { .. }));
}
