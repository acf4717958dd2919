use super::*;
use serde_json::{json, Value};

fn page(next_data: &Value) -> String {
    format!(
        "<!DOCTYPE html><html><body><div id=\"__next\"></div>\
         <script id=\"__NEXT_DATA__\" type=\"application/json\">{next_data}</script>\
         </body></html>"
    )
}

fn envelope(queries: &[Value]) -> Value {
    let queries: Vec<Value> = queries.iter().map(|d| json!({"state": {"data": d}})).collect();
    json!({"props": {"pageProps": {"dehydratedState": {"queries": queries}}}})
}

fn group(title: &str, offers: &[(&str, &str)]) -> Value {
    let offers: Vec<Value> = offers
        .iter()
        .map(|(link, place)| json!({"offerAbsoluteUri": link, "displayWorkplace": place}))
        .collect();
    json!({
        "jobTitle": title,
        "companyName": "Acme Sp. z o.o.",
        "salaryDisplayText": "12 000–15 000 zł brutto / mies.",
        "aiSummary": "<ul><li>Doświadczenie w B2B</li><li>Język angielski</li></ul>",
        "offers": offers
    })
}

// -----------------------------------------------------------------------
// parse_search_results
// -----------------------------------------------------------------------

#[test]
fn each_offer_in_a_group_becomes_a_listing() {
    let body = page(&envelope(&[json!({
        "groupedOffers": [group(
            "Key Account Manager",
            &[
                ("https://jobs.example.com/praca/kam,oferta,1", "Warszawa"),
                ("https://jobs.example.com/praca/kam,oferta,2", "Kraków"),
            ],
        )]
    })]));

    let listings = parse_search_results(&body, "sprzedaż").unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].keyword, "sprzedaż");
    assert_eq!(listings[0].title, "Key Account Manager");
    assert_eq!(listings[0].company, "Acme Sp. z o.o.");
    assert_eq!(listings[0].location, "Warszawa");
    assert_eq!(listings[1].location, "Kraków");
    assert_eq!(listings[1].link, "https://jobs.example.com/praca/kam,oferta,2");
    assert_eq!(
        listings[0].requirements_summary,
        "Doświadczenie w B2B | Język angielski"
    );
}

#[test]
fn offers_without_link_are_dropped() {
    let body = page(&envelope(&[json!({
        "groupedOffers": [{
            "jobTitle": "Handlowiec",
            "offers": [
                {"displayWorkplace": "Gdańsk"},
                {"offerAbsoluteUri": "   ", "displayWorkplace": "Gdynia"},
                {"offerAbsoluteUri": "https://jobs.example.com/praca/h,oferta,9", "displayWorkplace": "Sopot"}
            ]
        }]
    })]));

    let listings = parse_search_results(&body, "handlowiec").unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].location, "Sopot");
}

#[test]
fn missing_salary_uses_not_provided_marker() {
    let body = page(&envelope(&[json!({
        "groupedOffers": [{
            "jobTitle": "Doradca",
            "offers": [{"offerAbsoluteUri": "https://jobs.example.com/praca/d,oferta,3"}]
        }]
    })]));

    let listings = parse_search_results(&body, "doradca").unwrap();
    assert_eq!(listings[0].salary_text, SALARY_NOT_PROVIDED);
    assert_eq!(listings[0].company, NOT_AVAILABLE);
    assert_eq!(listings[0].location, NOT_AVAILABLE);
    assert_eq!(listings[0].requirements_summary, "");
}

#[test]
fn non_object_query_data_is_skipped() {
    let body = page(&envelope(&[
        json!(["unrelated", "array"]),
        json!(null),
        json!({"somethingElse": true}),
        json!({
            "groupedOffers": [group("Dyrektor Sprzedaży", &[("https://jobs.example.com/praca/ds,oferta,4", "Poznań")])]
        }),
    ]));

    let listings = parse_search_results(&body, "dyrektor").unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Dyrektor Sprzedaży");
}

#[test]
fn page_without_offers_is_empty_not_error() {
    let body = page(&envelope(&[json!({"groupedOffers": []})]));
    assert!(parse_search_results(&body, "x").unwrap().is_empty());
}

#[test]
fn missing_data_block_is_error() {
    let err = parse_search_results("<html><body>captcha</body></html>", "sprzedaż").unwrap_err();
    assert!(
        matches!(err, ParseError::MissingDataBlock { ref context } if context == "sprzedaż"),
        "expected MissingDataBlock, got: {err:?}"
    );
}

#[test]
fn malformed_json_is_error() {
    let body = "<script id=\"__NEXT_DATA__\">{not json</script>";
    let err = parse_search_results(body, "sprzedaż").unwrap_err();
    assert!(matches!(err, ParseError::MalformedPayload { .. }));
}

// -----------------------------------------------------------------------
// non_blank
// -----------------------------------------------------------------------

#[test]
fn non_blank_trims_and_filters() {
    assert_eq!(non_blank(Some("  Acme ".to_owned())), Some("Acme".to_owned()));
    assert_eq!(non_blank(Some("   ".to_owned())), None);
    assert_eq!(non_blank(None), None);
}
