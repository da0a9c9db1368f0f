//! Error types for the ODP client.
//!
//! # Design
//! Every failure is a value of `OdpError`. A non-200 response becomes
//! `OdpError::Api` carrying an `ApiError` record (status, short label,
//! optional detail, optional request identifier) so callers can match on a
//! 404 without string inspection. Local precondition failures (bad
//! identifier, unusable download directory, missing format) are raised before
//! any request is sent.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Result<T, E = OdpError> = std::result::Result<T, E>;

/// The uniform record built from any non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {error} - {}", .error_details.as_deref().unwrap_or("No details provided"))]
pub struct ApiError {
    /// HTTP status of the response.
    pub status: u16,
    /// The body's own `code`, or the HTTP status when the body has none.
    pub code: u16,
    pub error: String,
    pub error_details: Option<String>,
    pub request_identifier: Option<String>,
}

impl ApiError {
    /// Build the error record from a decoded error body.
    ///
    /// `status` is always the HTTP status. `code` prefers the body's own
    /// `code` field and falls back to the HTTP status. The detail text is
    /// read from `errorDetails`, then from `errorDetailed`, which some ODP
    /// endpoints use instead.
    pub fn from_body(status: u16, body: &Value) -> Self {
        let code = body
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(status);
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| fallback_label(status).to_string());
        let error_details = ["errorDetails", "errorDetailed"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map(str::to_string);
        let request_identifier = body
            .get("requestIdentifier")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            status,
            code,
            error,
            error_details,
            request_identifier,
        }
    }
}

/// Label used when an error body carries no `error` field.
pub fn fallback_label(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown Error",
    }
}

/// Errors returned by the ODP client.
#[derive(Debug, thiserror::Error)]
pub enum OdpError {
    /// The server answered with a status other than 200.
    #[error("USPTO API error {0}")]
    Api(#[from] ApiError),

    /// A PCT application number did not match the expected layout.
    #[error("invalid PCT application number format: {0}")]
    InvalidIdentifier(String),

    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("USPTO_API_KEY is not set")]
    MissingApiKey,

    #[error("save path does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("save path is not writable: {}", .0.display())]
    DirectoryNotWritable(PathBuf),

    /// A file name taken from a response has no usable final component.
    #[error("unusable file name for download: {0:?}")]
    InvalidFileName(String),

    /// The requested download format is not offered by the resource.
    #[error(
        "format '{requested}' not available for this document. Available formats: {}",
        .available.join(", ")
    )]
    FormatUnavailable {
        requested: String,
        available: Vec<String>,
    },

    /// The download endpoint answered with a status other than 200.
    #[error("download failed with status {status}: {0}", status = .0.status)]
    DownloadFailed(ApiError),

    /// A 200 body did not have the shape of the expected model.
    #[error("failed to decode response at `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl OdpError {
    /// The rejection record, if this error came from a non-200 response.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            OdpError::Api(err) | OdpError::DownloadFailed(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of a remote rejection or failed download.
    pub fn status(&self) -> Option<u16> {
        self.api().map(|err| err.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
