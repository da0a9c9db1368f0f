//! Application status codes (`/patent/status-codes`).

use serde::{Deserialize, Serialize};

use crate::envelope::{BagItem, Envelope};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusCode {
    pub application_status_code: Option<u32>,
    pub application_status_description_text: Option<String>,
}

impl BagItem for StatusCode {
    const BAG: &'static str = "statusCodeDataBag";
}

pub type StatusCodesResponse = Envelope<StatusCode>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::FromBody;
    use serde_json::json;

    #[test]
    fn status_codes_parse() {
        let body = json!({
            "count": 2,
            "statusCodeDataBag": [
                {"applicationStatusCode": 3, "applicationStatusDescriptionText": "Proceedings Terminated"},
                {"applicationStatusCode": 150, "applicationStatusDescriptionText": "Patented Case"}
            ],
            "requestIdentifier": "status-req"
        });
        let response = StatusCodesResponse::from_body(body).unwrap();
        assert_eq!(response.len(), 2);
        assert_eq!(response.items[1].application_status_code, Some(150));
    }

    #[test]
    fn count_without_bag() {
        let response = StatusCodesResponse::from_body(json!({"count": 13136})).unwrap();
        assert_eq!(response.count, 13136);
        assert!(response.is_empty());
    }
}
