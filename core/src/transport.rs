//! Async transport: executes `OdpClient` requests with `reqwest`.
//!
//! # Design
//! `UsptoClient` pairs a pooled `reqwest::Client` with an `OdpClient`. Every
//! typed method is build, execute, parse. The two behaviors that need more
//! than one round-trip or a byte stream live here: the single PCT fallback
//! lookup and the chunked document download.
//!
//! Cloning is cheap and shares the connection pool.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::client::{ApplicationResource, OdpClient, Searchable};
use crate::config::OdpConfig;
use crate::download::{self, Downloadable};
use crate::envelope::{DownloadResponse, Envelope, FromBody};
use crate::error::{OdpError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::identifier::{sanitize_patent_number, ApplicationId};
use crate::models::{
    AdjustmentRecord, AppealDecision, AssignmentRecord, AssociatedDocumentsRecord, AttorneyRecord,
    ContinuityRecord, DatasetFile, DatasetProductsResponse, Document, DocumentsResponse,
    ForeignPriorityRecord, InterferenceDecision, MetadataRecord, PatentFileWrapper,
    PatentFileWrapperResponse, StatusCodesResponse, TransactionRecord, TrialDecision,
    TrialDocument,
};
use crate::pagination;
use crate::query::{DatasetProductQuery, SearchQuery};

/// Async client for the ODP API.
#[derive(Debug, Clone)]
pub struct UsptoClient {
    http: reqwest::Client,
    odp: OdpClient,
}

impl UsptoClient {
    /// Client for the production API with a default `reqwest` pool.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(OdpClient::new(api_key))
    }

    pub fn with_client(odp: OdpClient) -> Self {
        Self::with_http_client(reqwest::Client::new(), odp)
    }

    /// Use a caller-configured `reqwest::Client` (timeouts, proxies, ...).
    pub fn with_http_client(http: reqwest::Client, odp: OdpClient) -> Self {
        Self { http, odp }
    }

    pub fn from_config(config: &OdpConfig) -> Result<Self> {
        OdpClient::from_config(config).map(Self::with_client)
    }

    /// Build a client from `USPTO_API_KEY` and `USPTO_ODP_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&OdpConfig::from_env()?)
    }

    /// The request builder and response normalizer behind this client.
    pub fn odp(&self) -> &OdpClient {
        &self.odp
    }

    /// Send a request built by `OdpClient` and collect the whole response.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.odp.in_scope(|| {
            tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        });
        let response = self.send(request).await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    async fn send(&self, request: &HttpRequest) -> Result<reqwest::Response> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
            HttpMethod::Post => self.http.post(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        Ok(builder.send().await?)
    }

    async fn call<T: FromBody>(&self, request: HttpRequest) -> Result<T> {
        let response = self.execute(&request).await?;
        self.odp.parse(response)
    }

    // -----------------------------------------------------------------------
    // Applications
    // -----------------------------------------------------------------------

    /// Look up the file wrapper of one application.
    ///
    /// `serial` is normalized first (`US0506853` becomes `0506853`; PCT
    /// numbers are reshaped). A PCT lookup that answers 404 is tried once
    /// more without the leading zero of its sequence, and that second answer
    /// is returned as-is.
    pub async fn get_patent_wrapper(&self, serial: &str) -> Result<PatentFileWrapperResponse> {
        let id = ApplicationId::parse(serial)?;
        match self.call(self.odp.build_get_patent_wrapper(&id)).await {
            Err(err) if err.is_not_found() => match id.fallback() {
                Some(fallback) => {
                    self.odp.in_scope(|| {
                        tracing::debug!(%id, %fallback, "PCT lookup not found, retrying without leading zero");
                    });
                    self.call(self.odp.build_get_patent_wrapper(&fallback)).await
                }
                None => Err(err),
            },
            other => other,
        }
    }

    async fn application_resource<T: FromBody>(
        &self,
        application_number: &str,
        resource: ApplicationResource,
    ) -> Result<T> {
        self.call(self.odp.build_application_resource(application_number, resource))
            .await
    }

    pub async fn get_patent_documents(&self, application_number: &str) -> Result<DocumentsResponse> {
        self.application_resource(application_number, ApplicationResource::Documents)
            .await
    }

    pub async fn get_continuity(
        &self,
        application_number: &str,
    ) -> Result<Envelope<ContinuityRecord>> {
        self.application_resource(application_number, ApplicationResource::Continuity)
            .await
    }

    pub async fn get_foreign_priority(
        &self,
        application_number: &str,
    ) -> Result<Envelope<ForeignPriorityRecord>> {
        self.application_resource(application_number, ApplicationResource::ForeignPriority)
            .await
    }

    pub async fn get_patent_transactions(
        &self,
        application_number: &str,
    ) -> Result<Envelope<TransactionRecord>> {
        self.application_resource(application_number, ApplicationResource::Transactions)
            .await
    }

    pub async fn get_patent_assignments(
        &self,
        application_number: &str,
    ) -> Result<Envelope<AssignmentRecord>> {
        self.application_resource(application_number, ApplicationResource::Assignment)
            .await
    }

    pub async fn get_attorney(&self, application_number: &str) -> Result<Envelope<AttorneyRecord>> {
        self.application_resource(application_number, ApplicationResource::Attorney)
            .await
    }

    pub async fn get_adjustment(
        &self,
        application_number: &str,
    ) -> Result<Envelope<AdjustmentRecord>> {
        self.application_resource(application_number, ApplicationResource::Adjustment)
            .await
    }

    pub async fn get_associated_documents(
        &self,
        application_number: &str,
    ) -> Result<Envelope<AssociatedDocumentsRecord>> {
        self.application_resource(application_number, ApplicationResource::AssociatedDocuments)
            .await
    }

    pub async fn get_app_metadata(
        &self,
        application_number: &str,
    ) -> Result<Envelope<MetadataRecord>> {
        self.application_resource(application_number, ApplicationResource::MetaData)
            .await
    }

    /// Resolve a granted utility patent number (`US9,022,434`, `9022434`) to
    /// its application and fetch that application's meta-data.
    ///
    /// Returns `Ok(None)` when the search finds no application.
    pub async fn get_app_metadata_from_patent_number(
        &self,
        patent_number: &str,
    ) -> Result<Option<Envelope<MetadataRecord>>> {
        let digits = sanitize_patent_number(patent_number);
        let hits: PatentFileWrapperResponse = self
            .call(self.odp.build_search_by_patent_number(&digits)?)
            .await?;
        let application_number = hits
            .items
            .iter()
            .find_map(|hit| hit.application_number_text.as_deref());
        match application_number {
            Some(application_number) => self.get_app_metadata(application_number).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn search_patent_applications(
        &self,
        query: &SearchQuery,
    ) -> Result<PatentFileWrapperResponse> {
        self.search::<PatentFileWrapper>(query).await
    }

    pub async fn search_patent_applications_post(
        &self,
        body: &Value,
    ) -> Result<PatentFileWrapperResponse> {
        self.search_post::<PatentFileWrapper>(body).await
    }

    pub async fn search_patent_applications_download(
        &self,
        query: &SearchQuery,
    ) -> Result<DownloadResponse<PatentFileWrapper>> {
        self.search_download::<PatentFileWrapper>(query).await
    }

    pub async fn search_patent_applications_download_post(
        &self,
        body: &Value,
    ) -> Result<DownloadResponse<PatentFileWrapper>> {
        self.search_download_post::<PatentFileWrapper>(body).await
    }

    // -----------------------------------------------------------------------
    // Search families
    // -----------------------------------------------------------------------

    /// `GET <family>/search` for the family that serves `T`.
    pub async fn search<T: Searchable>(&self, query: &SearchQuery) -> Result<Envelope<T>> {
        self.call(self.odp.build_search(T::ENDPOINT, query)).await
    }

    pub async fn search_post<T: Searchable>(&self, body: &Value) -> Result<Envelope<T>> {
        self.call(self.odp.build_search_post(T::ENDPOINT, body)?)
            .await
    }

    pub async fn search_download<T: Searchable>(
        &self,
        query: &SearchQuery,
    ) -> Result<DownloadResponse<T>> {
        self.call(self.odp.build_search_download(T::ENDPOINT, query))
            .await
    }

    pub async fn search_download_post<T: Searchable>(
        &self,
        body: &Value,
    ) -> Result<DownloadResponse<T>> {
        self.call(self.odp.build_search_download_post(T::ENDPOINT, body)?)
            .await
    }

    /// Every match of a GET search, fetched `page_size` items at a time.
    ///
    /// Paging starts at `query.offset` (0 when unset); `query.limit` is
    /// replaced by `page_size`.
    pub async fn search_all<T: Searchable>(
        &self,
        query: &SearchQuery,
        page_size: u64,
    ) -> Result<Vec<T>> {
        pagination::fetch_all(query.offset.unwrap_or(0), page_size, |offset, limit| {
            let page = query.page(offset, limit);
            async move { self.search::<T>(&page).await }
        })
        .await
    }

    /// `GET <family>/{id}`.
    pub async fn get_record<T: Searchable>(&self, id: &str) -> Result<Envelope<T>> {
        self.call(self.odp.build_get_record(T::ENDPOINT, id)).await
    }

    pub async fn get_trial_decisions_by_trial(
        &self,
        trial_number: &str,
    ) -> Result<Envelope<TrialDecision>> {
        self.call(self.odp.build_trial_decisions_by_trial(trial_number))
            .await
    }

    pub async fn get_trial_documents_by_trial(
        &self,
        trial_number: &str,
    ) -> Result<Envelope<TrialDocument>> {
        self.call(self.odp.build_trial_documents_by_trial(trial_number))
            .await
    }

    pub async fn get_appeal_decisions_by_appeal(
        &self,
        appeal_number: &str,
    ) -> Result<Envelope<AppealDecision>> {
        self.call(self.odp.build_appeal_decisions_by_appeal(appeal_number))
            .await
    }

    pub async fn get_interference_decisions_by_interference(
        &self,
        interference_number: &str,
    ) -> Result<Envelope<InterferenceDecision>> {
        self.call(
            self.odp
                .build_interference_decisions_by_interference(interference_number),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Status codes
    // -----------------------------------------------------------------------

    /// `GET /patent/status-codes`. With no parameters the server answers
    /// with a `count` and no items.
    pub async fn get_status_codes(&self, query: &SearchQuery) -> Result<StatusCodesResponse> {
        self.call(self.odp.build_status_codes(query)).await
    }

    pub async fn search_status_codes_post(&self, body: &Value) -> Result<StatusCodesResponse> {
        self.call(self.odp.build_status_codes_post(body)?).await
    }

    // -----------------------------------------------------------------------
    // Bulk datasets
    // -----------------------------------------------------------------------

    pub async fn search_dataset_products(
        &self,
        query: &SearchQuery,
    ) -> Result<DatasetProductsResponse> {
        self.call(self.odp.build_search_dataset_products(query))
            .await
    }

    pub async fn get_dataset_product(
        &self,
        product_id: &str,
        query: &DatasetProductQuery,
    ) -> Result<DatasetProductsResponse> {
        self.call(self.odp.build_get_dataset_product(product_id, query))
            .await
    }

    pub async fn get_dataset_file(&self, product_id: &str, file_name: &str) -> Result<DatasetFile> {
        self.call(self.odp.build_get_dataset_file(product_id, file_name))
            .await
    }

    // -----------------------------------------------------------------------
    // Downloads
    // -----------------------------------------------------------------------

    /// Download a file wrapper document. `format` defaults to `PDF` and
    /// `file_name` to `<application>_<code>_<document id>.<ext>`.
    pub async fn download_document(
        &self,
        document: &Document,
        dir: &Path,
        file_name: Option<&str>,
        format: Option<&str>,
    ) -> Result<PathBuf> {
        self.download(document, dir, file_name, format).await
    }

    /// Stream a downloadable resource into `dir` and return the file path.
    ///
    /// The directory and format are checked before any request is sent. A
    /// non-200 answer fails with `OdpError::DownloadFailed`; bytes already
    /// written by an interrupted transfer are left on disk.
    pub async fn download<D>(
        &self,
        item: &D,
        dir: &Path,
        file_name: Option<&str>,
        format: Option<&str>,
    ) -> Result<PathBuf>
    where
        D: Downloadable + ?Sized,
    {
        let target = download::resolve(item, dir, file_name, format)?;
        let request = self.odp.build_download(&target.url);
        self.odp.in_scope(|| {
            tracing::debug!(url = %target.url, path = %target.path.display(), "downloading");
        });

        let mut response = self.send(&request).await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(OdpError::DownloadFailed(self.odp.parse_error(status, &body)));
        }

        let mut file = tokio::fs::File::create(&target.path).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        self.odp.in_scope(|| {
            tracing::info!(path = %target.path.display(), bytes = written, format = %target.format, "download complete");
        });
        Ok(target.path)
    }
}
