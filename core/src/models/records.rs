//! Per-application sub-resources.
//!
//! Each `/patent/applications/{id}/<resource>` endpoint answers with the same
//! `patentFileWrapperDataBag` envelope as the wrapper lookup, carrying only
//! the fields for that resource. These records are the narrow views.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::application::{
    ApplicationMetaData, Assignment, ChildContinuity, DocumentMetaData, EventData,
    ForeignPriority, ParentContinuity, PatentTermAdjustmentData, RecordAttorney,
};
use super::de::{lenient_datetime, null_as_default};
use crate::envelope::BagItem;

const WRAPPER_BAG: &str = "patentFileWrapperDataBag";

/// Parent and child applications in the chain of priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContinuityRecord {
    pub application_number_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_continuity_bag: Vec<ParentContinuity>,
    #[serde(deserialize_with = "null_as_default")]
    pub child_continuity_bag: Vec<ChildContinuity>,
}

impl BagItem for ContinuityRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForeignPriorityRecord {
    pub application_number_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub foreign_priority_bag: Vec<ForeignPriority>,
}

impl BagItem for ForeignPriorityRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

/// The prosecution history (transactions) of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionRecord {
    pub application_number_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub event_data_bag: Vec<EventData>,
}

impl BagItem for TransactionRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentRecord {
    pub application_number_text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignment_bag: Vec<Assignment>,
}

impl BagItem for AssignmentRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttorneyRecord {
    pub application_number_text: Option<String>,
    pub record_attorney: Option<RecordAttorney>,
}

impl BagItem for AttorneyRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentRecord {
    pub application_number_text: Option<String>,
    pub patent_term_adjustment_data: Option<PatentTermAdjustmentData>,
}

impl BagItem for AdjustmentRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

/// Where the pre-grant publication and grant full texts can be fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssociatedDocumentsRecord {
    pub application_number_text: Option<String>,
    pub pgpub_document_meta_data: Option<DocumentMetaData>,
    pub grant_document_meta_data: Option<DocumentMetaData>,
    #[serde(deserialize_with = "lenient_datetime")]
    pub last_ingestion_date_time: Option<DateTime<FixedOffset>>,
}

impl BagItem for AssociatedDocumentsRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataRecord {
    pub application_number_text: Option<String>,
    pub application_meta_data: Option<ApplicationMetaData>,
}

impl BagItem for MetadataRecord {
    const BAG: &'static str = WRAPPER_BAG;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{Envelope, FromBody};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn continuity_reads_both_directions() {
        let body = json!({
            "count": 1,
            "patentFileWrapperDataBag": [{
                "applicationNumberText": "16123456",
                "parentContinuityBag": [{
                    "parentApplicationNumberText": "15000001",
                    "claimParentageTypeCode": "CON",
                    "parentApplicationFilingDate": "2017-01-02"
                }],
                "childContinuityBag": null
            }]
        });
        let envelope = Envelope::<ContinuityRecord>::from_body(body).unwrap();
        let record = envelope.first().unwrap();
        assert_eq!(record.parent_continuity_bag.len(), 1);
        assert_eq!(
            record.parent_continuity_bag[0].parent_application_filing_date,
            NaiveDate::from_ymd_opt(2017, 1, 2)
        );
        assert!(record.child_continuity_bag.is_empty());
    }

    #[test]
    fn adjustment_totals_are_read() {
        let body = json!({
            "count": 1,
            "patentFileWrapperDataBag": [{
                "applicationNumberText": "16123456",
                "patentTermAdjustmentData": {
                    "aDelayQuantity": 120,
                    "bDelayQuantity": 0,
                    "cDelayQuantity": 0,
                    "applicantDayDelayQuantity": 15,
                    "adjustmentTotalQuantity": 105,
                    "patentTermAdjustmentHistoryDataBag": [
                        {"eventDescriptionText": "Mail Non-Final Rejection", "ipOfficeDayDelayQuantity": 120.0}
                    ]
                }
            }]
        });
        let envelope = Envelope::<AdjustmentRecord>::from_body(body).unwrap();
        let pta = envelope.items[0].patent_term_adjustment_data.as_ref().unwrap();
        assert_eq!(pta.a_delay_quantity, Some(120));
        assert_eq!(pta.adjustment_total_quantity, Some(105));
        assert_eq!(pta.patent_term_adjustment_history_data_bag.len(), 1);
    }

    #[test]
    fn attorney_record_holds_power_of_attorney() {
        let body = json!({
            "count": 1,
            "patentFileWrapperDataBag": [{
                "recordAttorney": {
                    "powerOfAttorneyBag": [{"firstName": "Ada", "lastName": "Lovelace", "registrationNumber": "12345"}],
                    "customerNumberCorrespondenceData": [{"patronIdentifier": 84956}]
                }
            }]
        });
        let envelope = Envelope::<AttorneyRecord>::from_body(body).unwrap();
        let attorney = envelope.items[0].record_attorney.as_ref().unwrap();
        assert_eq!(attorney.power_of_attorney_bag[0].registration_number.as_deref(), Some("12345"));
        assert!(attorney.attorney_bag.is_empty());
        assert_eq!(attorney.customer_number_correspondence_data[0].patron_identifier, Some(84956));
    }

    #[test]
    fn metadata_record_without_bag_is_empty() {
        let envelope = Envelope::<MetadataRecord>::from_body(json!({"count": 0})).unwrap();
        assert!(envelope.is_empty());
    }
}
