//! Final petition decisions (`/petition/decisions`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::de::lenient_date;
use crate::envelope::{BagItem, DownloadResponse, Envelope};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetitionDecision {
    pub petition_decision_record_identifier: Option<String>,
    pub application_number_text: Option<String>,
    pub patent_number: Option<String>,
    pub first_applicant_name: Option<String>,
    pub decision_type_code_description_text: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub petition_mail_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub decision_date: Option<NaiveDate>,
    /// Fields not modeled above, kept verbatim.
    #[serde(flatten)]
    pub additional: Map<String, Value>,
}

impl BagItem for PetitionDecision {
    const BAG: &'static str = "petitionDecisionBag";
}

pub type PetitionDecisionsResponse = Envelope<PetitionDecision>;
pub type PetitionDecisionsDownload = DownloadResponse<PetitionDecision>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::FromBody;
    use serde_json::json;

    #[test]
    fn unmodeled_fields_are_kept() {
        let body = json!({
            "count": 1,
            "petitionDecisionBag": [{
                "petitionDecisionRecordIdentifier": "9f1a2b3c",
                "applicationNumberText": "16123456",
                "firstApplicantName": "ACME",
                "petitionMailDate": "2022-03-04",
                "technologyCenter": "2800"
            }]
        });
        let response = PetitionDecisionsResponse::from_body(body).unwrap();
        let decision = response.first().unwrap();
        assert_eq!(decision.petition_decision_record_identifier.as_deref(), Some("9f1a2b3c"));
        assert_eq!(decision.petition_mail_date, NaiveDate::from_ymd_opt(2022, 3, 4));
        assert_eq!(decision.additional["technologyCenter"], "2800");
        assert!(!decision.additional.contains_key("firstApplicantName"));
    }
}
