use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_state, fixtures, AppState, API_KEY};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("x-api-key", API_KEY)
        .body(String::new())
        .unwrap()
}

fn post(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-api-key", API_KEY)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_api_key_returns_403() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/patent/status-codes")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["code"], 403);
    assert_eq!(body["error"], "Forbidden");
    assert!(body["requestIdentifier"].is_string());
}

#[tokio::test]
async fn requests_are_recorded() {
    let state = AppState::default();
    let resp = app_with_state(state.clone())
        .oneshot(get("/api/v1/patent/status-codes?limit=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.requests(), vec!["GET /api/v1/patent/status-codes?limit=2"]);
}

// --- applications ---

#[tokio::test]
async fn known_wrapper_returns_bag() {
    let resp = app()
        .oneshot(get("/api/v1/patent/applications/0506853"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["patentFileWrapperDataBag"][0]["applicationNumberText"], "0506853");
}

#[tokio::test]
async fn pct_wrapper_only_known_without_leading_zero() {
    let resp = app()
        .oneshot(get("/api/v1/patent/applications/PCTUS04027676"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Not Found");

    let resp = app()
        .oneshot(get("/api/v1/patent/applications/PCTUS0427676"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn sub_resource_returns_only_its_fields() {
    let resp = app()
        .oneshot(get("/api/v1/patent/applications/16123456/foreign-priority"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let record = &body["patentFileWrapperDataBag"][0];
    assert_eq!(record["foreignPriorityBag"][0]["ipOfficeName"], "TAIWAN");
    assert!(record.get("assignmentBag").is_none());
}

#[tokio::test]
async fn documents_point_back_at_the_server() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/patent/applications/16123456/documents")
                .header("x-api-key", API_KEY)
                .header(http::header::HOST, "127.0.0.1:4000")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(resp).await;
    let url = body["documentBag"][0]["downloadOptionBag"][0]["downloadUrl"]
        .as_str()
        .unwrap();
    assert!(url.starts_with("http://127.0.0.1:4000/download/applications/16123456/"), "{url}");
}

#[tokio::test]
async fn unknown_sub_resource_is_404() {
    let resp = app()
        .oneshot(get("/api/v1/patent/applications/99999999/continuity"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_honours_offset_and_limit() {
    let resp = app()
        .oneshot(get("/api/v1/patent/applications/search?offset=4&limit=2"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["count"], fixtures::SEARCH_TOTAL);
    assert_eq!(body["patentFileWrapperDataBag"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn patent_number_search_finds_application() {
    let resp = app()
        .oneshot(post(
            "/api/v1/patent/applications/search",
            r#"{"q":"applicationMetaData.patentNumber:9022434"}"#,
        ))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["patentFileWrapperDataBag"][0]["applicationNumberText"],
        fixtures::FULL_APPLICATION
    );
}

#[tokio::test]
async fn malformed_post_body_is_400() {
    let resp = app()
        .oneshot(post("/api/v1/patent/applications/search", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn csv_search_download_is_a_link() {
    let resp = app()
        .oneshot(get("/api/v1/patent/applications/search/download?format=csv"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["format"], "csv");
    assert!(body["downloadUrl"].as_str().unwrap().ends_with(".csv"));
    assert!(body.get("patentFileWrapperDataBag").is_none());
}

// --- status codes ---

#[tokio::test]
async fn status_codes_without_params_have_no_bag() {
    let resp = app()
        .oneshot(get("/api/v1/patent/status-codes"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["count"], 13136);
    assert!(body.get("statusCodeDataBag").is_none());
}

#[tokio::test]
async fn status_codes_with_limit_have_items() {
    let resp = app()
        .oneshot(get("/api/v1/patent/status-codes?offset=0&limit=3"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["statusCodeDataBag"].as_array().unwrap().len(), 3);
}

// --- PTAB and petitions ---

#[tokio::test]
async fn trial_decisions_by_trial_number() {
    let resp = app()
        .oneshot(get("/api/v1/patent/trials/IPR2023-00001/decisions"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["trialDecisionBag"][1]["decisionType"], "Final Written Decision");
}

#[tokio::test]
async fn single_trial_decision_by_document_id() {
    let resp = app()
        .oneshot(get("/api/v1/patent/trials/decisions/dec-ipr-1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["trialDecisionBag"][0]["documentIdentifier"], "dec-ipr-1");
}

#[tokio::test]
async fn unknown_petition_is_404() {
    let resp = app()
        .oneshot(get("/api/v1/petition/decisions/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn interference_number_with_comma() {
    let resp = app()
        .oneshot(get("/api/v1/patent/interferences/106,001/decisions"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["count"], 1);
}

// --- datasets and downloads ---

#[tokio::test]
async fn dataset_product_latest_keeps_last_file() {
    let resp = app()
        .oneshot(get("/api/v1/datasets/products/PTGRXML?latest=true"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let files = body["datasetProductBag"][0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["fileName"], "ipg240109.zip");
}

#[tokio::test]
async fn document_download_serves_bytes() {
    let resp = app()
        .oneshot(get("/download/applications/16123456/JTQ2KQ1ZPXXIFW3.pdf"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::CONTENT_TYPE], "application/pdf");
    assert_eq!(body_bytes(resp).await.as_ref(), fixtures::document_bytes().as_slice());
}

#[tokio::test]
async fn missing_download_is_404_without_details() {
    let resp = app()
        .oneshot(get("/download/applications/16123456/missing.pdf"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"code": 404, "error": "Not Found"}));
}
