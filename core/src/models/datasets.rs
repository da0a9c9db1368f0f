//! Bulk dataset products (`/datasets/products`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::{lenient_date, null_as_default};
use crate::download::Downloadable;
use crate::envelope::{decode, BagItem, Envelope, FromBody};
use crate::error::OdpError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFile {
    pub file_name: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub file_date: Option<NaiveDate>,
    pub file_size: Option<u64>,
    pub file_download_uri: Option<String>,
}

/// A bulk data product, e.g. `PTGRXML` (patent grant full text).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetProduct {
    pub product_identifier: Option<String>,
    pub product_name: Option<String>,
    pub product_type: Option<String>,
    pub product_description: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    pub file_count: Option<u64>,
    pub total_size: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<ProductFile>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for DatasetProduct {
    const BAG: &'static str = "datasetProductBag";
}

pub type DatasetProductsResponse = Envelope<DatasetProduct>;

/// Metadata for one file of a dataset product. Returned without an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetFile {
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub download_url: Option<String>,
    pub file_size: Option<u64>,
    pub content_type: Option<String>,
    pub request_identifier: Option<String>,
}

impl DatasetFile {
    fn url(&self) -> Option<&str> {
        self.download_url.as_deref().or(self.file_url.as_deref())
    }
}

impl FromBody for DatasetFile {
    fn from_body(body: Value) -> Result<Self, OdpError> {
        decode(body, "datasetFile")
    }
}

impl Downloadable for DatasetFile {
    fn download_options(&self) -> Vec<(&str, &str)> {
        self.url()
            .map(|url| vec![(self.default_format(), url)])
            .unwrap_or_default()
    }

    fn default_format(&self) -> &str {
        self.content_type.as_deref().unwrap_or("application/octet-stream")
    }

    fn default_file_name(&self, _format: &str) -> String {
        self.file_name.clone().unwrap_or_else(|| "dataset.bin".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn products_include_files() {
        let body = json!({
            "count": 1,
            "datasetProductBag": [{
                "productIdentifier": "PTGRXML",
                "productName": "Patent Grant Full Text Data (No Images) - XML",
                "productType": "Patent",
                "releaseDate": "2024-01-02",
                "fileCount": 2,
                "files": [
                    {"fileName": "ipg240102.zip", "fileDate": "2024-01-02", "fileSize": 123456}
                ],
                "productFrequencyText": "Weekly"
            }]
        });
        let response = DatasetProductsResponse::from_body(body).unwrap();
        let product = response.first().unwrap();
        assert_eq!(product.product_identifier.as_deref(), Some("PTGRXML"));
        assert_eq!(product.files[0].file_size, Some(123456));
        assert_eq!(product.additional["productFrequencyText"], "Weekly");
    }

    #[test]
    fn dataset_file_is_a_bare_object() {
        let body = json!({
            "fileName": "ipg240102.zip",
            "fileUrl": "https://example.com/ipg240102.zip",
            "fileSize": 123456,
            "contentType": "application/zip",
            "requestIdentifier": "file-req"
        });
        let file = DatasetFile::from_body(body).unwrap();
        assert_eq!(file.request_identifier.as_deref(), Some("file-req"));
        assert_eq!(
            file.download_options(),
            vec![("application/zip", "https://example.com/ipg240102.zip")]
        );
        assert_eq!(file.default_file_name("application/zip"), "ipg240102.zip");
    }

    #[test]
    fn dataset_file_without_url_offers_nothing() {
        let file = DatasetFile::from_body(json!({"fileName": "x.zip"})).unwrap();
        assert!(file.download_options().is_empty());
    }

    #[test]
    fn server_file_name_cannot_leave_download_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = DatasetFile::from_body(json!({
            "fileName": "../escape.zip",
            "fileUrl": "https://example.com/escape.zip"
        }))
        .unwrap();

        let target = crate::download::resolve(&file, dir.path(), None, None).unwrap();
        assert_eq!(target.path, dir.path().join("escape.zip"));
    }
}
