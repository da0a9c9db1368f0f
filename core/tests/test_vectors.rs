//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use serde_json::Value;
use uspto_odp::models::{PatentFileWrapper, PetitionDecision, StatusCode, TrialDecision};
use uspto_odp::{
    ApiError, ApplicationId, Envelope, HttpMethod, HttpRequest, HttpResponse, OdpClient,
    SearchEndpoint, SearchQuery,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> OdpClient {
    OdpClient::new("test-key").with_base_url(BASE_URL).unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
    assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: unexpected body"),
    }
}

fn search_query(input: &Value) -> SearchQuery {
    let text = |key: &str| input.get(key).and_then(Value::as_str).map(str::to_string);
    SearchQuery {
        q: text("q"),
        sort: text("sort"),
        offset: input.get("offset").and_then(Value::as_u64),
        limit: input.get("limit").and_then(Value::as_u64),
        facets: text("facets"),
        fields: text("fields"),
        filters: text("filters"),
        range_filters: text("range_filters"),
        format: None,
    }
}

// ---------------------------------------------------------------------------
// File wrapper
// ---------------------------------------------------------------------------

#[test]
fn wrapper_test_vectors() {
    let raw = include_str!("../../test-vectors/wrapper.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = ApplicationId::parse(case["input"].as_str().unwrap()).unwrap();

        // Verify build
        let req = c.build_get_patent_wrapper(&id);
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let parsed: Envelope<PatentFileWrapper> = c.parse(simulated(case)).unwrap();
        let expected = &case["expected_result"];
        assert_eq!(parsed.count, expected["count"].as_u64().unwrap(), "{name}: count");
        assert_eq!(
            parsed.request_identifier.as_deref(),
            expected["request_identifier"].as_str(),
            "{name}: request identifier"
        );
        let numbers: Vec<&str> = parsed
            .items
            .iter()
            .filter_map(|w| w.application_number_text.as_deref())
            .collect();
        let expected_numbers: Vec<&str> = expected["application_numbers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n.as_str().unwrap())
            .collect();
        assert_eq!(numbers, expected_numbers, "{name}: application numbers");
        assert_eq!(
            parsed.first().and_then(PatentFileWrapper::invention_title),
            expected["invention_title"].as_str(),
            "{name}: invention title"
        );
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn build_search(c: &OdpClient, endpoint: &str, input: &Value) -> HttpRequest {
    match endpoint {
        "status-codes" => c.build_status_codes(&search_query(input)),
        "applications" => c.build_search(SearchEndpoint::Applications, &search_query(input)),
        "trial-decisions" => c.build_search(SearchEndpoint::TrialDecisions, &search_query(input)),
        "petitions" => c
            .build_search_post(SearchEndpoint::PetitionDecisions, &input["body"])
            .unwrap(),
        other => panic!("unknown endpoint: {other}"),
    }
}

/// Parse with the item type the endpoint returns and report `(count, items)`.
fn parse_search(c: &OdpClient, endpoint: &str, response: HttpResponse) -> (u64, usize) {
    fn summary<T>(envelope: Envelope<T>) -> (u64, usize) {
        (envelope.count, envelope.len())
    }
    match endpoint {
        "status-codes" => summary(c.parse::<Envelope<StatusCode>>(response).unwrap()),
        "applications" => summary(c.parse::<Envelope<PatentFileWrapper>>(response).unwrap()),
        "trial-decisions" => summary(c.parse::<Envelope<TrialDecision>>(response).unwrap()),
        "petitions" => summary(c.parse::<Envelope<PetitionDecision>>(response).unwrap()),
        other => panic!("unknown endpoint: {other}"),
    }
}

#[test]
fn search_test_vectors() {
    let raw = include_str!("../../test-vectors/search.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = case["endpoint"].as_str().unwrap();

        let req = build_search(&c, endpoint, &case["input"]);
        assert_request(name, &req, &case["expected_request"]);

        let (count, items) = parse_search(&c, endpoint, simulated(case));
        let expected = &case["expected_result"];
        assert_eq!(count, expected["count"].as_u64().unwrap(), "{name}: count");
        assert_eq!(items as u64, expected["items"].as_u64().unwrap(), "{name}: items");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let err = c.parse::<Value>(simulated(case)).unwrap_err();

        let expected: ApiError = serde_json::from_value(case["expected_error"].clone()).unwrap();
        assert_eq!(err.api(), Some(&expected), "{name}: error record");
        assert_eq!(
            expected.to_string(),
            case["expected_message"].as_str().unwrap(),
            "{name}: message"
        );
    }
}
