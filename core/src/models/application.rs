//! The patent file wrapper and the nested records it is built from.
//!
//! # Design
//! These types mirror the `patentFileWrapperDataBag` items returned by the
//! `/patent/applications` endpoints. Every sub-object is optional and every
//! bag defaults to empty, because the per-application sub-resources
//! (continuity, attorney, adjustment, ...) return the same wrapper with only
//! their own fields filled in.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::de::{lenient_date, lenient_datetime, null_as_default};
use crate::envelope::{BagItem, Envelope};

/// Postal address as used by applicants, inventors, attorneys and assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub name_line_one_text: Option<String>,
    pub name_line_two_text: Option<String>,
    pub address_line_one_text: Option<String>,
    pub address_line_two_text: Option<String>,
    pub address_line_three_text: Option<String>,
    pub city_name: Option<String>,
    pub geographic_region_name: Option<String>,
    pub geographic_region_code: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub postal_address_category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityStatusData {
    pub small_entity_status_indicator: Option<bool>,
    pub business_entity_status_category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inventor {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub inventor_name_text: Option<String>,
    pub country_code: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondence_address_bag: Vec<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Applicant {
    pub applicant_name_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondence_address_bag: Vec<Address>,
}

/// Bibliographic data for one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationMetaData {
    pub invention_title: Option<String>,
    pub application_type_code: Option<String>,
    pub application_type_label_name: Option<String>,
    pub application_type_category: Option<String>,
    pub application_status_code: Option<u32>,
    pub application_status_description_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub application_status_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub filing_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub effective_filing_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub grant_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub earliest_publication_date: Option<NaiveDate>,
    pub earliest_publication_number: Option<String>,
    pub patent_number: Option<String>,
    pub docket_number: Option<String>,
    pub customer_number: Option<u64>,
    pub application_confirmation_number: Option<u64>,
    pub group_art_unit_number: Option<String>,
    pub examiner_name_text: Option<String>,
    pub first_inventor_name: Option<String>,
    pub first_applicant_name: Option<String>,
    pub first_inventor_to_file_indicator: Option<String>,
    pub national_stage_indicator: Option<bool>,
    pub uspc_symbol_text: Option<String>,
    pub class: Option<String>,
    pub subclass: Option<String>,
    pub entity_status_data: Option<EntityStatusData>,
    #[serde(deserialize_with = "null_as_default")]
    pub cpc_classification_bag: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub publication_date_bag: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub publication_sequence_number_bag: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub publication_category_bag: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub inventor_bag: Vec<Inventor>,
    #[serde(deserialize_with = "null_as_default")]
    pub applicant_bag: Vec<Applicant>,
}

/// One prosecution-history event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    pub event_code: Option<String>,
    pub event_description_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub event_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentContinuity {
    pub parent_application_number_text: Option<String>,
    pub child_application_number_text: Option<String>,
    pub parent_application_status_code: Option<u32>,
    pub parent_application_status_description_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub parent_application_filing_date: Option<NaiveDate>,
    pub parent_patent_number: Option<String>,
    pub claim_parentage_type_code: Option<String>,
    pub claim_parentage_type_code_description_text: Option<String>,
    pub first_inventor_to_file_indicator: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildContinuity {
    pub child_application_number_text: Option<String>,
    pub parent_application_number_text: Option<String>,
    pub child_application_status_code: Option<u32>,
    pub child_application_status_description_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub child_application_filing_date: Option<NaiveDate>,
    pub child_patent_number: Option<String>,
    pub claim_parentage_type_code: Option<String>,
    pub claim_parentage_type_code_description_text: Option<String>,
    pub first_inventor_to_file_indicator: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignPriority {
    pub ip_office_name: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub filing_date: Option<NaiveDate>,
    pub application_number_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatentTermAdjustmentHistory {
    pub event_sequence_number: Option<f64>,
    pub originating_event_sequence_number: Option<f64>,
    pub event_description_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub event_date: Option<NaiveDate>,
    #[serde(rename = "ptaPTECode")]
    pub pta_pte_code: Option<String>,
    pub applicant_day_delay_quantity: Option<f64>,
    pub ip_office_day_delay_quantity: Option<f64>,
}

/// Patent term adjustment totals and their history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatentTermAdjustmentData {
    pub a_delay_quantity: Option<i64>,
    pub b_delay_quantity: Option<i64>,
    pub c_delay_quantity: Option<i64>,
    pub overlapping_day_quantity: Option<i64>,
    pub non_overlapping_day_quantity: Option<i64>,
    pub ip_office_day_delay_quantity: Option<i64>,
    pub applicant_day_delay_quantity: Option<i64>,
    pub adjustment_total_quantity: Option<i64>,
    #[serde(deserialize_with = "lenient_date")]
    pub filing_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub grant_date: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub patent_term_adjustment_history_data_bag: Vec<PatentTermAdjustmentHistory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignor {
    pub assignor_name: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub execution_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignee {
    pub assignee_name_text: Option<String>,
    pub assignee_address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Correspondent {
    pub correspondent_name_text: Option<String>,
    pub address_line_one_text: Option<String>,
    pub address_line_two_text: Option<String>,
    pub address_line_three_text: Option<String>,
    pub address_line_four_text: Option<String>,
}

/// One recorded assignment (reel/frame) against the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignment {
    pub reel_number: Option<u64>,
    pub frame_number: Option<u64>,
    #[serde(rename = "reelAndFrameNumber", alias = "reelNumber/frameNumber")]
    pub reel_and_frame_number: Option<String>,
    pub page_total_quantity: Option<u64>,
    pub conveyance_text: Option<String>,
    pub assignment_document_location_uri: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub assignment_received_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub assignment_recorded_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub assignment_mailed_date: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignor_bag: Vec<Assignor>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignee_bag: Vec<Assignee>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondence_address_bag: Vec<Correspondent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelecommunicationAddress {
    pub telecommunication_number: Option<String>,
    pub extension_number: Option<String>,
    pub telecom_type_code: Option<String>,
}

/// A registered practitioner attached to the application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attorney {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub name_prefix: Option<String>,
    pub name_suffix: Option<String>,
    pub registration_number: Option<String>,
    pub active_indicator: Option<String>,
    pub registered_practitioner_category: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub attorney_address_bag: Vec<Address>,
    #[serde(deserialize_with = "null_as_default")]
    pub telecommunication_address_bag: Vec<TelecommunicationAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerNumberCorrespondence {
    pub patron_identifier: Option<u64>,
    pub organization_standard_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub power_of_attorney_address_bag: Vec<Address>,
    #[serde(deserialize_with = "null_as_default")]
    pub telecommunication_address_bag: Vec<TelecommunicationAddress>,
}

/// Attorney of record: the power-of-attorney holders and the customer number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordAttorney {
    #[serde(deserialize_with = "null_as_default")]
    pub power_of_attorney_bag: Vec<Attorney>,
    #[serde(deserialize_with = "null_as_default")]
    pub attorney_bag: Vec<Attorney>,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_number_correspondence_data: Vec<CustomerNumberCorrespondence>,
}

/// Location of the bulk XML for a pre-grant publication or a grant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetaData {
    pub product_identifier: Option<String>,
    pub zip_file_name: Option<String>,
    pub xml_file_name: Option<String>,
    #[serde(rename = "fileLocationURI")]
    pub file_location_uri: Option<String>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub file_create_date_time: Option<DateTime<FixedOffset>>,
}

/// Everything the ODP knows about one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatentFileWrapper {
    pub application_number_text: Option<String>,
    pub application_meta_data: Option<ApplicationMetaData>,
    #[serde(deserialize_with = "null_as_default")]
    pub correspondence_address_bag: Vec<Address>,
    #[serde(deserialize_with = "null_as_default")]
    pub event_data_bag: Vec<EventData>,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_continuity_bag: Vec<ParentContinuity>,
    #[serde(deserialize_with = "null_as_default")]
    pub child_continuity_bag: Vec<ChildContinuity>,
    #[serde(deserialize_with = "null_as_default")]
    pub foreign_priority_bag: Vec<ForeignPriority>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignment_bag: Vec<Assignment>,
    pub record_attorney: Option<RecordAttorney>,
    pub patent_term_adjustment_data: Option<PatentTermAdjustmentData>,
    pub pgpub_document_meta_data: Option<DocumentMetaData>,
    pub grant_document_meta_data: Option<DocumentMetaData>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub last_ingestion_date_time: Option<DateTime<FixedOffset>>,
}

impl PatentFileWrapper {
    pub fn invention_title(&self) -> Option<&str> {
        self.application_meta_data
            .as_ref()
            .and_then(|meta| meta.invention_title.as_deref())
    }

    pub fn patent_number(&self) -> Option<&str> {
        self.application_meta_data
            .as_ref()
            .and_then(|meta| meta.patent_number.as_deref())
    }
}

impl BagItem for PatentFileWrapper {
    const BAG: &'static str = "patentFileWrapperDataBag";
}

/// Response of the wrapper lookup and of the application search endpoints.
pub type PatentFileWrapperResponse = Envelope<PatentFileWrapper>;
