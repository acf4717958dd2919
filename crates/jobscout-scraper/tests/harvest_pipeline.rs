//! End-to-end tests of the search and deep-analysis phases against a local
//! `wiremock` job board.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobscout_core::{parse_hunt_config, HuntConfig, Verdict, WorkflowStatus};
use jobscout_scraper::{
    analyze_candidates, select_candidates, Harvester, JobBoardClient, ListingCache, RetryPolicy,
};

fn test_client(base_url: &str) -> JobBoardClient {
    JobBoardClient::new(base_url, 5, "jobscout-test/0.1", 2, RetryPolicy::immediate(3))
        .expect("failed to build test JobBoardClient")
}

fn harvester(server: &MockServer, max_pages: u32) -> Harvester {
    Harvester::new(
        test_client(&server.uri()),
        Arc::new(ListingCache::from_ttl_secs(1200)),
        max_pages,
    )
}

fn html_with(next_data: &Value) -> String {
    format!(
        "<html><body><script id=\"__NEXT_DATA__\" type=\"application/json\">{next_data}</script></body></html>"
    )
}

fn search_page(groups: &[Value]) -> String {
    html_with(&json!({
        "props": {"pageProps": {"dehydratedState": {"queries": [
            {"state": {"data": {"groupedOffers": groups}}}
        ]}}}
    }))
}

fn group(title: &str, place: &str, links: &[String]) -> Value {
    let offers: Vec<Value> = links
        .iter()
        .map(|l| json!({"offerAbsoluteUri": l, "displayWorkplace": place}))
        .collect();
    json!({
        "jobTitle": title,
        "companyName": "Acme Sp. z o.o.",
        "salaryDisplayText": "14 000 zł brutto / mies.",
        "aiSummary": "<ul><li>Sprzedaż B2B</li><li>Negocjacje z klientami</li></ul>",
        "offers": offers
    })
}

fn listing_page(title: &str, salary: &str) -> String {
    html_with(&json!({
        "props": {"pageProps": {"dehydratedState": {"queries": [{"state": {"data": {
            "jobOfferWebId": 42,
            "publicationDetails": {"isActive": true},
            "attributes": {
                "jobTitle": title,
                "displayEmployerName": "Acme Sp. z o.o.",
                "workplaces": [{"displayAddress": "Warszawa", "region": {"name": "mazowieckie"}}],
                "employment": {"typesOfContracts": [{"name": "umowa o pracę", "salary": salary}]}
            },
            "sections": [
                {"sectionType": "responsibilities", "model": {"bullets": ["Zespół: rekrutacja i rozwój", "Zarządzanie budżetem działu"]}}
            ]
        }}}]}}}
    }))
}

fn hunt() -> HuntConfig {
    parse_hunt_config(
        r#"
search_queries:
  - keyword: handlowiec
    description: Sales reps
settings:
  max_pages_per_query: 1
  min_score_to_persist: 50
  min_score_to_save_folder: 80
  deep_analysis_pause_secs: 0
filters:
  allowed_locations: ["warszawa"]
  excluded_title_keywords: ["junior"]
  required_title_keywords: ["dyrektor", "manager"]
  min_salary_monthly: 10000
scoring_weights:
  sales:
    weight: 50
    keywords: ["sprzedaż", "negocjacje", "crm"]
  leadership:
    weight: 50
    keywords: ["zespół", "zarządzanie", "budżet"]
"#,
    )
    .expect("valid hunt config")
}

// ---------------------------------------------------------------------------
// Search phase
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_links_and_blocked_keyword_yield_unique_listings() {
    let server = MockServer::start().await;
    let link = |n: u32| format!("{}/praca/oferta,{n}", server.uri());

    Mock::given(method("GET"))
        .and(path("/praca/handlowiec;kw"))
        .and(query_param("pn", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[
            group("Sales Manager", "Warszawa", &[link(1), link(2)]),
            group("Sales Manager (repost)", "Warszawa", &[link(1)]),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/praca/dyrektor;kw"))
        .respond_with(ResponseTemplate::new(403))
        .expect(3)
        .mount(&server)
        .await;

    let listings = harvester(&server, 1).harvest(&["handlowiec", "dyrektor"]).await;

    assert_eq!(listings.len(), 2, "expected 2 unique listings, got: {listings:?}");
    assert_eq!(listings[0].link, link(1));
    assert_eq!(listings[0].title, "Sales Manager (repost)");
    assert_eq!(listings[1].link, link(2));
}

#[tokio::test]
async fn empty_page_stops_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("pn", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[group(
            "Sales Manager",
            "Warszawa",
            &[format!("{}/praca/oferta,1", server.uri())],
        )])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("pn", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("pn", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let listings = harvester(&server, 5).harvest_keyword("handlowiec").await;
    assert_eq!(listings.len(), 1);
}

#[tokio::test]
async fn failed_page_does_not_stop_later_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("pn", "1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("pn", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[group(
            "Sales Manager",
            "Warszawa",
            &[format!("{}/praca/oferta,7", server.uri())],
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let listings = harvester(&server, 2).harvest_keyword("handlowiec").await;
    assert_eq!(listings.len(), 1);
}

#[tokio::test]
async fn unparseable_page_counts_as_zero_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let listings = harvester(&server, 1).harvest(&["handlowiec"]).await;
    assert!(listings.is_empty());
}

#[tokio::test]
async fn second_harvest_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[group(
            "Sales Manager",
            "Warszawa",
            &[format!("{}/praca/oferta,1", server.uri())],
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let harvester = harvester(&server, 1);
    let first = harvester.harvest(&["handlowiec"]).await;
    let second = harvester.harvest(&[" handlowiec "]).await;

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}

// ---------------------------------------------------------------------------
// Deep analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn candidates_are_filtered_fetched_and_scored() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/praca/handlowiec;kw"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[
            group("Sales Manager", "Warszawa", &[format!("{uri}/praca/oferta,1")]),
            group("Dyrektor Sprzedaży", "Warszawa", &[format!("{uri}/praca/oferta,2")]),
            group("Junior Sales Manager", "Warszawa", &[format!("{uri}/praca/oferta,3")]),
            group("Sales Manager", "Gdańsk", &[format!("{uri}/praca/oferta,4")]),
            group("Dyrektor Handlowy", "Warszawa", &[format!("{uri}/praca/oferta,5")]),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/praca/oferta,1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page("Sales Manager", "14 000 zł brutto / mies.")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/praca/oferta,2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page("Dyrektor Sprzedaży", "8 000 zł brutto / mies.")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/praca/oferta,5"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let hunt = hunt();
    let harvester = harvester(&server, 1);
    let listings = harvester.harvest(&hunt.keywords()).await;
    assert_eq!(listings.len(), 5);

    let candidates = select_candidates(listings, &hunt.filters);
    assert_eq!(candidates.len(), 3);

    let report = analyze_candidates(harvester.client(), &candidates, &hunt).await;

    assert_eq!(report.candidates, 3);
    assert_eq!(report.below_salary_floor, 1);
    assert_eq!(report.fetch_failed, 1);
    assert_eq!(report.matches.len(), 1);

    let matched = &report.matches[0];
    assert_eq!(matched.detail.title, "Sales Manager");
    assert_eq!(matched.detail.keyword, "handlowiec");
    assert_eq!(
        matched.detail.requirements_summary,
        "Sprzedaż B2B | Negocjacje z klientami"
    );
    assert_eq!(matched.monthly_salary, 14_000);
    // sales: sprzedaż + negocjacje = 40; leadership: zespół + zarządzanie = 40, budżet +10 -> 50.
    assert_eq!(matched.score.breakdown["sales"], 40);
    assert_eq!(matched.score.breakdown["leadership"], 50);
    assert_eq!(matched.score.score, 90);
    assert_eq!(matched.score.verdict, Verdict::MustApply);
    assert_eq!(matched.score.status, WorkflowStatus::Lead);
}
