//! Patent Trial and Appeal Board data: trial proceedings, trial decisions,
//! trial documents, appeal decisions and interference decisions.
//!
//! The PTAB endpoints return wide records whose layout differs between trial
//! types, so only the identifying fields are typed and the rest is kept in
//! `additional`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::lenient_date;
use crate::envelope::{BagItem, DownloadResponse, Envelope};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrialProceeding {
    /// e.g. `IPR2023-00001`
    pub trial_number: Option<String>,
    /// `IPR`, `PGR`, `CBM` or `DER`.
    pub trial_type: Option<String>,
    pub proceeding_status: Option<String>,
    pub patent_number: Option<String>,
    pub application_number_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub filing_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub institution_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for TrialProceeding {
    const BAG: &'static str = "trialProceedingBag";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrialDecision {
    pub document_identifier: Option<String>,
    pub trial_number: Option<String>,
    pub trial_type: Option<String>,
    pub decision_type: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub decision_date: Option<NaiveDate>,
    pub patent_number: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for TrialDecision {
    const BAG: &'static str = "trialDecisionBag";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrialDocument {
    pub document_identifier: Option<String>,
    pub trial_number: Option<String>,
    pub trial_type: Option<String>,
    pub document_type: Option<String>,
    pub document_title: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub filing_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub document_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for TrialDocument {
    const BAG: &'static str = "trialDocumentBag";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppealDecision {
    pub document_identifier: Option<String>,
    pub appeal_number: Option<String>,
    pub decision_type: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub decision_date: Option<NaiveDate>,
    pub patent_number: Option<String>,
    pub application_number_text: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for AppealDecision {
    const BAG: &'static str = "appealDecisionBag";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterferenceDecision {
    pub document_identifier: Option<String>,
    /// e.g. `106,001`
    pub interference_number: Option<String>,
    pub decision_type: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub decision_date: Option<NaiveDate>,
    pub patent_number: Option<String>,
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for InterferenceDecision {
    const BAG: &'static str = "interferenceDecisionBag";
}

pub type TrialProceedingsResponse = Envelope<TrialProceeding>;
pub type TrialProceedingsDownload = DownloadResponse<TrialProceeding>;
pub type TrialDecisionsResponse = Envelope<TrialDecision>;
pub type TrialDecisionsDownload = DownloadResponse<TrialDecision>;
pub type TrialDocumentsResponse = Envelope<TrialDocument>;
pub type TrialDocumentsDownload = DownloadResponse<TrialDocument>;
pub type AppealDecisionsResponse = Envelope<AppealDecision>;
pub type AppealDecisionsDownload = DownloadResponse<AppealDecision>;
pub type InterferenceDecisionsResponse = Envelope<InterferenceDecision>;
pub type InterferenceDecisionsDownload = DownloadResponse<InterferenceDecision>;
