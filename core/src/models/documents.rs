//! File-wrapper documents (`/patent/applications/{id}/documents`).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::de::{lenient_datetime, null_as_default};
use crate::download::{document_extension, Downloadable};
use crate::envelope::{BagItem, Envelope};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadOption {
    /// `PDF`, `MS_WORD` or `XML`.
    pub mime_type_identifier: String,
    pub download_url: String,
    pub page_total_quantity: Option<u32>,
}

/// One document in an application's file wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub application_number_text: String,
    #[serde(deserialize_with = "lenient_datetime")]
    pub official_date: Option<DateTime<FixedOffset>>,
    pub document_identifier: String,
    pub document_code: String,
    pub document_code_description_text: Option<String>,
    /// `INCOMING`, `OUTGOING` or `INTERNAL`.
    pub direction_category: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub download_option_bag: Vec<DownloadOption>,
}

impl Document {
    /// Formats this document is offered in.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.download_option_bag
            .iter()
            .map(|option| option.mime_type_identifier.as_str())
    }
}

impl BagItem for Document {
    const BAG: &'static str = "documentBag";
}

impl Downloadable for Document {
    fn download_options(&self) -> Vec<(&str, &str)> {
        self.download_option_bag
            .iter()
            .map(|option| (option.mime_type_identifier.as_str(), option.download_url.as_str()))
            .collect()
    }

    fn default_format(&self) -> &str {
        "PDF"
    }

    fn default_file_name(&self, format: &str) -> String {
        format!(
            "{}_{}_{}.{}",
            self.application_number_text,
            self.document_code,
            self.document_identifier,
            document_extension(format)
        )
    }
}

pub type DocumentsResponse = Envelope<Document>;
