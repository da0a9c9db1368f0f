//! Response envelopes shared by every resource family.
//!
//! # Design
//! ODP search and lookup responses all look alike: a `count`, an item list
//! under a resource-specific "bag" key, and an optional `requestIdentifier`.
//! Rather than one hand-written parser per resource, `Envelope<T>` is parsed
//! by a single routine parameterized by the item type, which names its bag
//! through `BagItem::BAG`.
//!
//! `count` reflects total matches, not page size. Some endpoints omit the bag
//! unless pagination parameters are sent, so a positive `count` with no
//! items is a normal response and is kept as-is.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::download::Downloadable;
use crate::error::OdpError;

/// An item type that arrives inside a named bag of an envelope.
pub trait BagItem: DeserializeOwned {
    /// JSON key of the item list, e.g. `statusCodeDataBag`.
    const BAG: &'static str;
}

/// Types the response normalizer can build from a decoded 200 body.
pub trait FromBody: Sized {
    fn from_body(body: Value) -> Result<Self, OdpError>;
}

impl FromBody for Value {
    fn from_body(body: Value) -> Result<Self, OdpError> {
        Ok(body)
    }
}

/// A page of results plus the server's total match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub count: u64,
    pub items: Vec<T>,
    pub request_identifier: Option<String>,
    /// Facet buckets, returned by search endpoints when `facets` was requested.
    pub facets: Option<Value>,
}

impl<T> Envelope<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}

impl<T: BagItem> FromBody for Envelope<T> {
    fn from_body(mut body: Value) -> Result<Self, OdpError> {
        let count = body.get("count").and_then(Value::as_u64).unwrap_or(0);
        let request_identifier = string_field(&body, "requestIdentifier");
        let facets = take_field(&mut body, "facets");
        let items = match take_field(&mut body, T::BAG) {
            Some(bag) => decode(bag, T::BAG)?,
            None => Vec::new(),
        };

        Ok(Envelope {
            count,
            items,
            request_identifier,
            facets,
        })
    }
}

/// A search-download answer that points at a file instead of carrying items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub count: u64,
    pub download_url: String,
    /// The format the server reports for the file, e.g. `csv`.
    pub format: Option<String>,
    pub request_identifier: Option<String>,
}

impl DownloadLink {
    fn format_or_default(&self) -> &str {
        self.format.as_deref().unwrap_or("csv")
    }
}

impl Downloadable for DownloadLink {
    fn download_options(&self) -> Vec<(&str, &str)> {
        vec![(self.format_or_default(), self.download_url.as_str())]
    }

    fn default_format(&self) -> &str {
        self.format_or_default()
    }

    /// The last path segment of the link, or `download.<format>`.
    fn default_file_name(&self, format: &str) -> String {
        url::Url::parse(&self.download_url)
            .ok()
            .and_then(|url| {
                url.path_segments()
                    .and_then(|mut segments| segments.next_back().map(str::to_string))
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("download.{}", format.to_ascii_lowercase()))
    }
}

/// Response of a `search/download` endpoint.
///
/// With the default JSON format the records are returned inline; with a
/// non-default format such as CSV the server answers with a direct link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DownloadResponse<T> {
    Records(Envelope<T>),
    Link(DownloadLink),
}

impl<T> DownloadResponse<T> {
    pub fn count(&self) -> u64 {
        match self {
            DownloadResponse::Records(envelope) => envelope.count,
            DownloadResponse::Link(link) => link.count,
        }
    }

    pub fn request_identifier(&self) -> Option<&str> {
        match self {
            DownloadResponse::Records(envelope) => envelope.request_identifier.as_deref(),
            DownloadResponse::Link(link) => link.request_identifier.as_deref(),
        }
    }

    /// Inline records; empty for a link response.
    pub fn items(&self) -> &[T] {
        match self {
            DownloadResponse::Records(envelope) => &envelope.items,
            DownloadResponse::Link(_) => &[],
        }
    }

    pub fn download_url(&self) -> Option<&str> {
        match self {
            DownloadResponse::Records(_) => None,
            DownloadResponse::Link(link) => Some(&link.download_url),
        }
    }

    pub fn download_format(&self) -> Option<&str> {
        match self {
            DownloadResponse::Records(_) => None,
            DownloadResponse::Link(link) => link.format.as_deref(),
        }
    }
}

impl<T: BagItem> FromBody for DownloadResponse<T> {
    fn from_body(body: Value) -> Result<Self, OdpError> {
        let has_bag = body.get(T::BAG).is_some_and(|bag| !bag.is_null());
        match string_field(&body, "downloadUrl") {
            Some(download_url) if !has_bag => Ok(DownloadResponse::Link(DownloadLink {
                count: body.get("count").and_then(Value::as_u64).unwrap_or(0),
                download_url,
                format: string_field(&body, "format"),
                request_identifier: string_field(&body, "requestIdentifier"),
            })),
            _ => Envelope::from_body(body).map(DownloadResponse::Records),
        }
    }
}

/// Deserialize a JSON value, reporting the failing path on error.
pub(crate) fn decode<T: DeserializeOwned>(value: Value, root: &str) -> Result<T, OdpError> {
    serde_path_to_error::deserialize(value).map_err(|err| OdpError::Decode {
        path: format!("{root}{}", path_suffix(&err.path().to_string())),
        source: err.into_inner(),
    })
}

fn path_suffix(path: &str) -> String {
    match path {
        "" | "." => String::new(),
        p => format!(".{p}"),
    }
}

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

fn take_field(body: &mut Value, key: &str) -> Option<Value> {
    body.get_mut(key)
        .map(Value::take)
        .filter(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Item {
        name: String,
    }

    impl BagItem for Item {
        const BAG: &'static str = "itemBag";
    }

    #[test]
    fn count_and_items_are_read() {
        let body = json!({
            "count": 2,
            "itemBag": [{"name": "a"}, {"name": "b"}],
            "requestIdentifier": "req-1"
        });
        let envelope = Envelope::<Item>::from_body(body).unwrap();
        assert_eq!(envelope.count, 2);
        assert_eq!(envelope.len(), 2);
        assert_eq!(envelope.first().unwrap().name, "a");
        assert_eq!(envelope.request_identifier.as_deref(), Some("req-1"));
        assert!(envelope.facets.is_none());
    }

    #[test]
    fn count_is_independent_of_items() {
        let envelope = Envelope::<Item>::from_body(json!({"count": 50, "itemBag": []})).unwrap();
        assert_eq!(envelope.count, 50);
        assert!(envelope.is_empty());

        let envelope = Envelope::<Item>::from_body(json!({"count": 13136})).unwrap();
        assert_eq!(envelope.count, 13136);
        assert!(envelope.is_empty());
    }

    #[test]
    fn null_bag_is_empty() {
        let envelope = Envelope::<Item>::from_body(json!({"count": 1, "itemBag": null})).unwrap();
        assert!(envelope.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body = json!({"count": 1, "itemBag": [{"name": "a", "extra": true}], "other": 1});
        assert_eq!(Envelope::<Item>::from_body(body).unwrap().len(), 1);
    }

    #[test]
    fn facets_are_kept() {
        let body = json!({"count": 0, "facets": [{"field": "type", "buckets": []}]});
        let envelope = Envelope::<Item>::from_body(body).unwrap();
        assert_eq!(envelope.facets.unwrap()[0]["field"], "type");
    }

    #[test]
    fn malformed_item_reports_path() {
        let body = json!({"count": 1, "itemBag": [{"name": 7}]});
        let err = Envelope::<Item>::from_body(body).unwrap_err();
        match err {
            OdpError::Decode { path, .. } => {
                assert!(path.starts_with("itemBag"), "{path}");
                assert!(path.contains("name"), "{path}");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn download_link_variant_is_recognized() {
        let body = json!({
            "count": 10,
            "downloadUrl": "https://example.com/download/file.csv",
            "format": "csv",
            "requestIdentifier": "req-csv"
        });
        let response = DownloadResponse::<Item>::from_body(body).unwrap();
        assert_eq!(response.count(), 10);
        assert_eq!(response.download_url(), Some("https://example.com/download/file.csv"));
        assert_eq!(response.download_format(), Some("csv"));
        assert_eq!(response.request_identifier(), Some("req-csv"));
        assert!(response.items().is_empty());
    }

    #[test]
    fn download_link_names_file_after_url() {
        let link = DownloadLink {
            count: 1,
            download_url: "https://example.com/files/results-1.csv?token=abc".to_string(),
            format: Some("csv".to_string()),
            request_identifier: None,
        };
        assert_eq!(link.download_options(), vec![("csv", link.download_url.as_str())]);
        assert_eq!(link.default_file_name("csv"), "results-1.csv");

        let bare = DownloadLink {
            download_url: "https://example.com/".to_string(),
            format: None,
            ..link
        };
        assert_eq!(bare.default_format(), "csv");
        assert_eq!(bare.default_file_name("CSV"), "download.csv");
    }

    #[test]
    fn download_records_variant_is_recognized() {
        let body = json!({"count": 1, "itemBag": [{"name": "a"}]});
        let response = DownloadResponse::<Item>::from_body(body).unwrap();
        assert!(matches!(response, DownloadResponse::Records(_)));
        assert_eq!(response.items().len(), 1);
        assert!(response.download_url().is_none());
    }

    #[test]
    fn raw_value_passes_through() {
        let body = json!({"count": 3, "anything": [1, 2, 3]});
        assert_eq!(Value::from_body(body.clone()).unwrap(), body);
    }
}
