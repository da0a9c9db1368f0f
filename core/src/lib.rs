//! Typed client for the USPTO Open Data Portal (ODP) API.
//!
//! # Overview
//! `OdpClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `UsptoClient` wraps
//! it with a `reqwest` transport and adds the behaviors that need I/O: the
//! PCT fallback lookup, document downloads and paging.
//!
//! # Design
//! - Every successful response is an `Envelope<T>` (or a `DownloadResponse<T>`
//!   for search-download endpoints) built by one generic routine keyed on the
//!   item's bag name.
//! - Every failure is an `OdpError`; non-200 answers carry an `ApiError` with
//!   the status, a short label, optional detail and the request identifier.
//! - Application numbers go through `ApplicationId` before they reach a URL.
//! - Logging goes through `tracing`. A client can be bound to its own
//!   `tracing::Dispatch` with `OdpClient::with_dispatch`.
//!
//! ```no_run
//! # async fn run() -> uspto_odp::Result<()> {
//! use uspto_odp::{SearchQuery, UsptoClient};
//!
//! let client = UsptoClient::from_env()?;
//! let wrapper = client.get_patent_wrapper("US16/123,456").await?;
//! println!("{:?}", wrapper.first().and_then(|w| w.invention_title()));
//!
//! let statuses = client.get_status_codes(&SearchQuery::new().limit(25)).await?;
//! println!("{} status codes", statuses.count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod download;
pub mod envelope;
pub mod error;
pub mod http;
pub mod identifier;
pub mod models;
pub mod pagination;
pub mod query;
pub mod transport;

pub use client::{ApplicationResource, OdpClient, SearchEndpoint, Searchable, DEFAULT_BASE_URL};
pub use config::OdpConfig;
pub use download::{DownloadTarget, Downloadable};
pub use envelope::{BagItem, DownloadLink, DownloadResponse, Envelope, FromBody};
pub use error::{ApiError, OdpError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use identifier::{sanitize_patent_number, ApplicationId, PctNumber};
pub use query::{DatasetProductQuery, DownloadFormat, SearchQuery};
pub use transport::UsptoClient;
