//! Stateless request builder and response normalizer for the ODP API.
//!
//! # Design
//! `OdpClient` holds only the base URL, the API key and an optional tracing
//! dispatcher, and carries no mutable state between calls. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a single
//! generic `parse` that consumes an `HttpResponse`. The caller (or the bundled
//! `UsptoClient`) executes the actual HTTP round-trip, keeping this layer
//! deterministic and free of I/O.
//!
//! Search-style families share one URL layout (`<family>/search`,
//! `<family>/search/download`, `<family>/{id}`), so they are addressed
//! through `SearchEndpoint` instead of one builder per family.

use std::fmt;
use std::sync::LazyLock;

use serde_json::{json, Map, Value};
use tracing::Dispatch;
use url::Url;

use crate::config::OdpConfig;
use crate::envelope::{BagItem, FromBody};
use crate::error::{ApiError, OdpError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::identifier::ApplicationId;
use crate::models::{
    AppealDecision, InterferenceDecision, PatentFileWrapper, PetitionDecision, TrialDecision,
    TrialDocument, TrialProceeding,
};
use crate::query::{DatasetProductQuery, SearchQuery};

pub const DEFAULT_BASE_URL: &str = "https://api.uspto.gov";

static DEFAULT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"));

const API_PREFIX: [&str; 2] = ["api", "v1"];

// ---------------------------------------------------------------------------
// Endpoint families
// ---------------------------------------------------------------------------

/// A resource family served under `/search`, `/search/download` and `/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEndpoint {
    Applications,
    PetitionDecisions,
    TrialProceedings,
    TrialDecisions,
    TrialDocuments,
    AppealDecisions,
    InterferenceDecisions,
}

impl SearchEndpoint {
    pub fn segments(&self) -> &'static [&'static str] {
        match self {
            SearchEndpoint::Applications => &["patent", "applications"],
            SearchEndpoint::PetitionDecisions => &["petition", "decisions"],
            SearchEndpoint::TrialProceedings => &["patent", "trials", "proceedings"],
            SearchEndpoint::TrialDecisions => &["patent", "trials", "decisions"],
            SearchEndpoint::TrialDocuments => &["patent", "trials", "documents"],
            SearchEndpoint::AppealDecisions => &["patent", "appeals", "decisions"],
            SearchEndpoint::InterferenceDecisions => &["patent", "interferences", "decisions"],
        }
    }
}

/// An item type returned by a `SearchEndpoint`.
pub trait Searchable: BagItem {
    const ENDPOINT: SearchEndpoint;
}

impl Searchable for PatentFileWrapper {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::Applications;
}

impl Searchable for PetitionDecision {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::PetitionDecisions;
}

impl Searchable for TrialProceeding {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::TrialProceedings;
}

impl Searchable for TrialDecision {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::TrialDecisions;
}

impl Searchable for TrialDocument {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::TrialDocuments;
}

impl Searchable for AppealDecision {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::AppealDecisions;
}

impl Searchable for InterferenceDecision {
    const ENDPOINT: SearchEndpoint = SearchEndpoint::InterferenceDecisions;
}

/// Sub-resources of a single application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationResource {
    Documents,
    Continuity,
    ForeignPriority,
    Transactions,
    Assignment,
    Attorney,
    Adjustment,
    AssociatedDocuments,
    MetaData,
}

impl ApplicationResource {
    pub fn segment(&self) -> &'static str {
        match self {
            ApplicationResource::Documents => "documents",
            ApplicationResource::Continuity => "continuity",
            ApplicationResource::ForeignPriority => "foreign-priority",
            ApplicationResource::Transactions => "transactions",
            ApplicationResource::Assignment => "assignment",
            ApplicationResource::Attorney => "attorney",
            ApplicationResource::Adjustment => "adjustment",
            ApplicationResource::AssociatedDocuments => "associated-documents",
            ApplicationResource::MetaData => "meta-data",
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Stateless client for the ODP API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Clone)]
pub struct OdpClient {
    base_url: Url,
    api_key: String,
    dispatch: Option<Dispatch>,
}

impl fmt::Debug for OdpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdpClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("dispatch", &self.dispatch.is_some())
            .finish()
    }
}

impl OdpClient {
    /// Client for the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE.clone(),
            api_key: api_key.into(),
            dispatch: None,
        }
    }

    /// Point the client at another server, e.g. a local fake.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let invalid = |source| OdpError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        };
        let url = Url::parse(base_url).map_err(invalid)?;
        if url.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Route this client's log records to `dispatch` instead of the ambient
    /// subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn from_config(config: &OdpConfig) -> Result<Self> {
        Self::new(config.api_key.clone()).with_base_url(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Run `f` with this client's dispatcher as the default, if it has one.
    pub(crate) fn in_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    // -- application lookups ------------------------------------------------

    /// `GET /patent/applications/{id}` for an already-normalized identifier.
    pub fn build_get_patent_wrapper(&self, id: &ApplicationId) -> HttpRequest {
        let id = id.to_string();
        self.get(&["patent", "applications", id.as_str()], Vec::new())
    }

    /// `GET /patent/applications/{application}/{resource}`.
    ///
    /// The application number is used verbatim.
    pub fn build_application_resource(
        &self,
        application_number: &str,
        resource: ApplicationResource,
    ) -> HttpRequest {
        self.get(
            &["patent", "applications", application_number, resource.segment()],
            Vec::new(),
        )
    }

    /// Application search for the granted utility patent with this number.
    /// `patent_number` must already be reduced to digits.
    pub fn build_search_by_patent_number(&self, patent_number: &str) -> Result<HttpRequest> {
        self.build_search_post(
            SearchEndpoint::Applications,
            &patent_number_search_body(patent_number),
        )
    }

    // -- search families ----------------------------------------------------

    pub fn build_search(&self, endpoint: SearchEndpoint, query: &SearchQuery) -> HttpRequest {
        self.get(&search_path(endpoint, &["search"]), query.to_params())
    }

    pub fn build_search_post(&self, endpoint: SearchEndpoint, body: &Value) -> Result<HttpRequest> {
        self.post(&search_path(endpoint, &["search"]), body)
    }

    pub fn build_search_download(&self, endpoint: SearchEndpoint, query: &SearchQuery) -> HttpRequest {
        self.get(&search_path(endpoint, &["search", "download"]), query.to_params())
    }

    pub fn build_search_download_post(
        &self,
        endpoint: SearchEndpoint,
        body: &Value,
    ) -> Result<HttpRequest> {
        self.post(&search_path(endpoint, &["search", "download"]), body)
    }

    /// `GET <family>/{id}`: one petition decision, trial proceeding, trial
    /// decision or document, appeal or interference decision.
    pub fn build_get_record(&self, endpoint: SearchEndpoint, id: &str) -> HttpRequest {
        self.get(&search_path(endpoint, &[id]), Vec::new())
    }

    pub fn build_trial_decisions_by_trial(&self, trial_number: &str) -> HttpRequest {
        self.get(&["patent", "trials", trial_number, "decisions"], Vec::new())
    }

    pub fn build_trial_documents_by_trial(&self, trial_number: &str) -> HttpRequest {
        self.get(&["patent", "trials", trial_number, "documents"], Vec::new())
    }

    pub fn build_appeal_decisions_by_appeal(&self, appeal_number: &str) -> HttpRequest {
        self.get(&["patent", "appeals", appeal_number, "decisions"], Vec::new())
    }

    pub fn build_interference_decisions_by_interference(
        &self,
        interference_number: &str,
    ) -> HttpRequest {
        self.get(
            &["patent", "interferences", interference_number, "decisions"],
            Vec::new(),
        )
    }

    // -- status codes -------------------------------------------------------

    pub fn build_status_codes(&self, query: &SearchQuery) -> HttpRequest {
        self.get(&["patent", "status-codes"], query.to_params())
    }

    pub fn build_status_codes_post(&self, body: &Value) -> Result<HttpRequest> {
        self.post(&["patent", "status-codes"], body)
    }

    // -- bulk datasets ------------------------------------------------------

    pub fn build_search_dataset_products(&self, query: &SearchQuery) -> HttpRequest {
        self.get(&["datasets", "products", "search"], query.to_params())
    }

    pub fn build_get_dataset_product(
        &self,
        product_id: &str,
        query: &DatasetProductQuery,
    ) -> HttpRequest {
        self.get(&["datasets", "products", product_id], query.to_params())
    }

    pub fn build_get_dataset_file(&self, product_id: &str, file_name: &str) -> HttpRequest {
        self.get(&["datasets", "products", "files", product_id, file_name], Vec::new())
    }

    // -- downloads ----------------------------------------------------------

    /// `GET` an absolute download URL taken from a response, with the API headers.
    pub fn build_download(&self, url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            query: Vec::new(),
            headers: self.headers(HttpMethod::Get),
            body: None,
        }
    }

    // -- response normalization ---------------------------------------------

    /// Turn a response into `T`, or into `OdpError::Api` for any status other
    /// than 200.
    pub fn parse<T: FromBody>(&self, response: HttpResponse) -> Result<T> {
        let body = decode_body(&response.body);
        if response.status != 200 {
            return Err(self.rejection(response.status, &body).into());
        }
        T::from_body(body)
    }

    /// Build and log the rejection record for a non-200 response body.
    pub fn parse_error(&self, status: u16, body: &str) -> ApiError {
        self.rejection(status, &decode_body(body))
    }

    fn rejection(&self, status: u16, body: &Value) -> ApiError {
        let err = ApiError::from_body(status, body);
        self.in_scope(|| {
            tracing::error!(
                status,
                code = err.code,
                error = %err.error,
                details = err.error_details.as_deref(),
                request_identifier = err.request_identifier.as_deref(),
                "USPTO API error"
            );
        });
        err
    }

    // -- helpers ------------------------------------------------------------

    fn get(&self, segments: &[&str], query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(segments),
            query,
            headers: self.headers(HttpMethod::Get),
            body: None,
        }
    }

    fn post(&self, segments: &[&str], body: &Value) -> Result<HttpRequest> {
        let body = serde_json::to_string(body).map_err(OdpError::Encode)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint(segments),
            query: Vec::new(),
            headers: self.headers(HttpMethod::Post),
            body: Some(body),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(API_PREFIX).extend(segments);
        }
        url.into()
    }

    fn headers(&self, method: HttpMethod) -> Vec<(String, String)> {
        let mut headers = vec![
            ("X-API-KEY".to_string(), self.api_key.clone()),
            ("accept".to_string(), "application/json".to_string()),
        ];
        if method == HttpMethod::Post {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        headers
    }
}

fn search_path<'a>(endpoint: SearchEndpoint, tail: &[&'a str]) -> Vec<&'a str> {
    endpoint
        .segments()
        .iter()
        .copied()
        .chain(tail.iter().copied())
        .collect()
}

/// A body that is not JSON is treated as an empty object.
fn decode_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Search body used to resolve a granted utility patent number to its
/// application.
pub fn patent_number_search_body(patent_number: &str) -> Value {
    json!({
        "q": format!("applicationMetaData.patentNumber:{patent_number}"),
        "filters": [
            {"name": "applicationMetaData.applicationTypeLabelName", "value": ["Utility"]},
            {"name": "applicationMetaData.publicationCategoryBag", "value": ["Granted/Issued"]}
        ],
        "sort": [{"field": "applicationMetaData.filingDate", "order": "desc"}],
        "pagination": {"offset": 0, "limit": 25},
        "fields": ["applicationNumberText", "applicationMetaData"],
        "facets": ["applicationMetaData.applicationTypeLabelName"]
    })
}
