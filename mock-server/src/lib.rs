//! A fake of the USPTO Open Data Portal for tests and local runs.
//!
//! # Design
//! Serves canned payloads from `fixtures` under the same `/api/v1` paths as
//! the real API, with the same quirks: a status-code search without
//! parameters answers with a `count` and no item bag, unknown records answer
//! 404 with an ODP error body, and CSV search downloads answer with a link.
//! Every request is recorded so tests can assert exactly what was sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

pub mod fixtures;

use fixtures::Family;

/// API key accepted by `app()`.
pub const API_KEY: &str = "test-key";

type Params = HashMap<String, String>;

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(API_KEY)
    }
}

impl AppState {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
            requests: Arc::default(),
        }
    }

    /// Every request seen so far, as `METHOD /path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, line: String) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .route("/patent/applications/search", get(search_applications).post(search_applications_post))
        .route(
            "/patent/applications/search/download",
            get(download_applications).post(download_applications_post),
        )
        .route("/patent/applications/{id}", get(get_wrapper))
        .route("/patent/applications/{id}/{resource}", get(get_application_resource))
        .route("/patent/status-codes", get(status_codes).post(status_codes_post))
        .nest("/petition/decisions", family_routes(Family::Petitions))
        .nest("/patent/trials/proceedings", family_routes(Family::TrialProceedings))
        .nest("/patent/trials/decisions", family_routes(Family::TrialDecisions))
        .nest("/patent/trials/documents", family_routes(Family::TrialDocuments))
        .nest("/patent/appeals/decisions", family_routes(Family::AppealDecisions))
        .nest("/patent/interferences/decisions", family_routes(Family::InterferenceDecisions))
        .route(
            "/patent/trials/{number}/decisions",
            get(|Path(number): Path<String>| async move {
                by_proceeding(Family::TrialDecisions, "trialNumber", &number)
            }),
        )
        .route(
            "/patent/trials/{number}/documents",
            get(|Path(number): Path<String>| async move {
                by_proceeding(Family::TrialDocuments, "trialNumber", &number)
            }),
        )
        .route(
            "/patent/appeals/{number}/decisions",
            get(|Path(number): Path<String>| async move {
                by_proceeding(Family::AppealDecisions, "appealNumber", &number)
            }),
        )
        .route(
            "/patent/interferences/{number}/decisions",
            get(|Path(number): Path<String>| async move {
                by_proceeding(Family::InterferenceDecisions, "interferenceNumber", &number)
            }),
        )
        .route("/datasets/products/search", get(search_dataset_products))
        .route("/datasets/products/{product_id}", get(get_dataset_product))
        .route("/datasets/products/files/{product_id}/{file_name}", get(get_dataset_file));

    Router::new()
        .nest("/api/v1", api)
        .route("/download/{*path}", get(download_file))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

// ---------------------------------------------------------------------------
// Middleware and helpers
// ---------------------------------------------------------------------------

async fn authenticate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let line = format!(
        "{} {}",
        request.method(),
        request
            .uri()
            .path_and_query()
            .map_or_else(|| request.uri().path(), |pq| pq.as_str())
    );
    tracing::info!(request = %line, "odp request");
    state.record(line);

    let authorized = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|key| key == &*state.api_key);
    if !authorized {
        return odp_error(StatusCode::FORBIDDEN, Some("Missing or invalid API key"));
    }
    next.run(request).await
}

fn request_id() -> String {
    Uuid::new_v4().to_string()
}

fn odp_error(status: StatusCode, details: Option<&str>) -> Response {
    let mut body = json!({
        "code": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Unknown Error"),
        "requestIdentifier": request_id(),
    });
    if let Some(details) = details {
        body["errorDetails"] = json!(details);
    }
    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    odp_error(StatusCode::NOT_FOUND, Some("No matching records found"))
}

fn envelope(count: usize, bag: &str, items: Vec<Value>) -> Response {
    let mut body = json!({"count": count, "requestIdentifier": request_id()});
    body[bag] = Value::Array(items);
    Json(body).into_response()
}

/// Slice `items` with the `offset`/`limit` query parameters (default 0/25).
fn page(items: Vec<Value>, offset: Option<usize>, limit: Option<usize>) -> Vec<Value> {
    items
        .into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(25))
        .collect()
}

fn param_usize(params: &Params, key: &str) -> Option<usize> {
    params.get(key).and_then(|v| v.parse().ok())
}

fn body_usize(body: &Value, key: &str) -> Option<usize> {
    body.get("pagination")
        .and_then(|p| p.get(key))
        .and_then(Value::as_u64)
        .map(|v| v as usize)
}

fn parse_body(raw: &str) -> Result<Value, Response> {
    serde_json::from_str(raw)
        .map_err(|_| odp_error(StatusCode::BAD_REQUEST, Some("Request body is not valid JSON")))
}

fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("127.0.0.1");
    format!("http://{host}")
}

fn csv_link(headers: &HeaderMap, count: usize, name: &str) -> Response {
    Json(json!({
        "count": count,
        "downloadUrl": format!("{}/download/search/{name}.csv", base_url(headers)),
        "format": "csv",
        "requestIdentifier": request_id(),
    }))
    .into_response()
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

async fn get_wrapper(Path(id): Path<String>) -> Response {
    if !fixtures::KNOWN_SERIALS.contains(&id.as_str()) {
        return not_found();
    }
    envelope(1, "patentFileWrapperDataBag", vec![fixtures::wrapper(&id)])
}

async fn get_application_resource(
    Path((id, resource)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if id != fixtures::FULL_APPLICATION {
        return not_found();
    }
    let keys: &[&str] = match resource.as_str() {
        "documents" => {
            let docs = fixtures::documents(&id, &base_url(&headers));
            return envelope(docs.len(), "documentBag", docs);
        }
        "continuity" => &["parentContinuityBag", "childContinuityBag"],
        "foreign-priority" => &["foreignPriorityBag"],
        "transactions" => &["eventDataBag"],
        "assignment" => &["assignmentBag"],
        "attorney" => &["recordAttorney"],
        "adjustment" => &["patentTermAdjustmentData"],
        "associated-documents" => &[
            "pgpubDocumentMetaData",
            "grantDocumentMetaData",
            "lastIngestionDateTime",
        ],
        "meta-data" => &["applicationMetaData"],
        _ => return not_found(),
    };
    envelope(1, "patentFileWrapperDataBag", vec![fixtures::wrapper_view(&id, keys)])
}

fn search_results() -> Vec<Value> {
    (1..=fixtures::SEARCH_TOTAL)
        .map(|i| fixtures::wrapper(&format!("1700000{i}")))
        .collect()
}

async fn search_applications(Query(params): Query<Params>) -> Response {
    let items = page(
        search_results(),
        param_usize(&params, "offset"),
        param_usize(&params, "limit"),
    );
    envelope(fixtures::SEARCH_TOTAL, "patentFileWrapperDataBag", items)
}

async fn search_applications_post(raw: String) -> Response {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let q = body.get("q").and_then(Value::as_str).unwrap_or_default();
    if let Some(number) = q.strip_prefix("applicationMetaData.patentNumber:") {
        let hits = if number == fixtures::GRANTED_PATENT_NUMBER {
            vec![fixtures::wrapper_view(
                fixtures::FULL_APPLICATION,
                &["applicationMetaData"],
            )]
        } else {
            Vec::new()
        };
        return envelope(hits.len(), "patentFileWrapperDataBag", hits);
    }
    let items = page(
        search_results(),
        body_usize(&body, "offset"),
        body_usize(&body, "limit"),
    );
    envelope(fixtures::SEARCH_TOTAL, "patentFileWrapperDataBag", items)
}

async fn download_applications(Query(params): Query<Params>, headers: HeaderMap) -> Response {
    if params.get("format").is_some_and(|f| f == "csv") {
        return csv_link(&headers, fixtures::SEARCH_TOTAL, "applications");
    }
    search_applications(Query(params)).await
}

async fn download_applications_post(headers: HeaderMap, raw: String) -> Response {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(response) => return response,
    };
    if body.get("format").and_then(Value::as_str) == Some("csv") {
        return csv_link(&headers, fixtures::SEARCH_TOTAL, "applications");
    }
    search_applications_post(raw).await
}

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

async fn status_codes(Query(params): Query<Params>) -> Response {
    if params.is_empty() {
        return Json(json!({"count": fixtures::STATUS_CODE_TOTAL, "requestIdentifier": request_id()}))
            .into_response();
    }
    if params.get("q").is_some_and(|q| q == "fail") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"errorDetailed": "Search backend unavailable"})),
        )
            .into_response();
    }
    let items = page(
        fixtures::status_codes(),
        param_usize(&params, "offset"),
        param_usize(&params, "limit"),
    );
    status_code_envelope(items)
}

async fn status_codes_post(raw: String) -> Response {
    let body = match parse_body(&raw) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let items = page(
        fixtures::status_codes(),
        body_usize(&body, "offset"),
        body_usize(&body, "limit"),
    );
    status_code_envelope(items)
}

fn status_code_envelope(items: Vec<Value>) -> Response {
    let mut body = json!({"count": fixtures::STATUS_CODE_TOTAL, "requestIdentifier": request_id()});
    body["statusCodeDataBag"] = Value::Array(items);
    Json(body).into_response()
}

// ---------------------------------------------------------------------------
// Search families
// ---------------------------------------------------------------------------

fn family_routes(family: Family) -> Router<AppState> {
    Router::new()
        .route(
            "/search",
            get(move |Query(params): Query<Params>| async move { family_search(family, &params) })
                .post(move |raw: String| async move { family_search_post(family, &raw) }),
        )
        .route(
            "/search/download",
            get(move |Query(params): Query<Params>, headers: HeaderMap| async move {
                if params.get("format").is_some_and(|f| f == "csv") {
                    return csv_link(&headers, family.records().len(), family.bag());
                }
                family_search(family, &params)
            })
            .post(move |headers: HeaderMap, raw: String| async move {
                match parse_body(&raw) {
                    Ok(body) if body.get("format").and_then(Value::as_str) == Some("csv") => {
                        csv_link(&headers, family.records().len(), family.bag())
                    }
                    _ => family_search_post(family, &raw),
                }
            }),
        )
        .route(
            "/{id}",
            get(move |Path(id): Path<String>| async move { family_record(family, &id) }),
        )
}

fn family_search(family: Family, params: &Params) -> Response {
    let records = family.records();
    let total = records.len();
    let items = page(records, param_usize(params, "offset"), param_usize(params, "limit"));
    envelope(total, family.bag(), items)
}

fn family_search_post(family: Family, raw: &str) -> Response {
    let body = match parse_body(raw) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let records = family.records();
    let total = records.len();
    let items = page(records, body_usize(&body, "offset"), body_usize(&body, "limit"));
    envelope(total, family.bag(), items)
}

fn family_record(family: Family, id: &str) -> Response {
    let found: Vec<Value> = family
        .records()
        .into_iter()
        .filter(|record| record.get(family.id_field()).and_then(Value::as_str) == Some(id))
        .collect();
    if found.is_empty() {
        return not_found();
    }
    envelope(found.len(), family.bag(), found)
}

fn by_proceeding(family: Family, field: &str, number: &str) -> Response {
    let found: Vec<Value> = family
        .records()
        .into_iter()
        .filter(|record| record.get(field).and_then(Value::as_str) == Some(number))
        .collect();
    envelope(found.len(), family.bag(), found)
}

// ---------------------------------------------------------------------------
// Datasets and downloads
// ---------------------------------------------------------------------------

async fn search_dataset_products(Query(params): Query<Params>) -> Response {
    let products: Vec<Value> = ["PTGRXML", "APPXML"]
        .iter()
        .filter_map(|id| fixtures::dataset_product(id))
        .collect();
    let total = products.len();
    let items = page(products, param_usize(&params, "offset"), param_usize(&params, "limit"));
    envelope(total, "datasetProductBag", items)
}

async fn get_dataset_product(
    Path(product_id): Path<String>,
    Query(params): Query<Params>,
) -> Response {
    let Some(mut product) = fixtures::dataset_product(&product_id) else {
        return not_found();
    };
    if params.get("includeFiles").is_some_and(|v| v == "false") {
        product["files"] = json!([]);
    } else if params.get("latest").is_some_and(|v| v == "true") {
        let latest = product["files"]
            .as_array()
            .and_then(|files| files.last().cloned())
            .map_or_else(Vec::new, |file| vec![file]);
        product["files"] = Value::Array(latest);
    }
    envelope(1, "datasetProductBag", vec![product])
}

async fn get_dataset_file(
    Path((product_id, file_name)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let listed = fixtures::dataset_product(&product_id).is_some_and(|product| {
        product["files"]
            .as_array()
            .is_some_and(|files| files.iter().any(|f| f["fileName"] == file_name.as_str()))
    });
    if !listed {
        return not_found();
    }
    Json(json!({
        "fileName": file_name,
        "fileUrl": format!("{}/download/datasets/{product_id}/{file_name}", base_url(&headers)),
        "fileSize": fixtures::document_bytes().len(),
        "contentType": "application/zip",
        "requestIdentifier": request_id(),
    }))
    .into_response()
}

async fn download_file(Path(path): Path<String>) -> Response {
    if path.ends_with("missing.pdf") {
        return (StatusCode::NOT_FOUND, Json(json!({"code": 404, "error": "Not Found"}))).into_response();
    }
    if path.ends_with(".csv") {
        let csv = "applicationNumberText,inventionTitle\n17000001,INVENTION FOR 17000001\n";
        return ([(header::CONTENT_TYPE, "text/csv")], csv).into_response();
    }
    let content_type = if path.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    };
    ([(header::CONTENT_TYPE, content_type)], fixtures::document_bytes()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_applies_offset_and_limit() {
        let items: Vec<Value> = (0..10).map(|i| json!(i)).collect();
        let sliced = page(items.clone(), Some(8), Some(5));
        assert_eq!(sliced, vec![json!(8), json!(9)]);
        assert_eq!(page(items, None, None).len(), 10);
    }

    #[test]
    fn pagination_is_read_from_body() {
        let body = json!({"pagination": {"offset": 5, "limit": 2}});
        assert_eq!(body_usize(&body, "offset"), Some(5));
        assert_eq!(body_usize(&json!({}), "limit"), None);
    }

    #[test]
    fn family_ids_resolve() {
        for family in [
            Family::Petitions,
            Family::TrialProceedings,
            Family::TrialDecisions,
            Family::TrialDocuments,
            Family::AppealDecisions,
            Family::InterferenceDecisions,
        ] {
            for record in family.records() {
                assert!(record.get(family.id_field()).is_some(), "{family:?}");
            }
        }
    }

    #[test]
    fn state_records_requests() {
        let state = AppState::default();
        state.record("GET /a".to_string());
        assert_eq!(state.requests(), vec!["GET /a".to_string()]);
    }
}
