//! Canned ODP payloads served by the fake.

use serde_json::{json, Value};

/// Application with documents, continuity, assignments and the rest.
pub const FULL_APPLICATION: &str = "16123456";
/// Application found through the patent-number search.
pub const GRANTED_PATENT_NUMBER: &str = "9022434";
/// Serial numbers whose wrapper lookup succeeds.
pub const KNOWN_SERIALS: [&str; 4] = ["12345678", "0506853", "PCTUS0427676", FULL_APPLICATION];
/// Number of applications behind the GET application search.
pub const SEARCH_TOTAL: usize = 5;
/// `count` reported by the status-code endpoint.
pub const STATUS_CODE_TOTAL: u64 = 13136;

pub fn wrapper(application_number: &str) -> Value {
    json!({
        "applicationNumberText": application_number,
        "applicationMetaData": {
            "inventionTitle": format!("INVENTION FOR {application_number}"),
            "applicationTypeLabelName": "Utility",
            "applicationStatusCode": 150,
            "applicationStatusDescriptionText": "Patented Case",
            "filingDate": "2018-09-14",
            "grantDate": "2020-01-07",
            "patentNumber": GRANTED_PATENT_NUMBER,
            "firstInventorName": "Kai-Yuan Tien",
            "customerNumber": 84956,
            "class": "235",
            "entityStatusData": {"smallEntityStatusIndicator": false, "businessEntityStatusCategory": "Undiscounted"},
            "inventorBag": [{"inventorNameText": "Kai-Yuan Tien", "countryCode": "TW", "correspondenceAddressBag": null}],
            "publicationCategoryBag": ["Granted/Issued", "Pre-Grant Publications - PGPub"]
        },
        "eventDataBag": [
            {"eventCode": "EML_NTR", "eventDescriptionText": "Email Notification", "eventDate": "2020-01-08"},
            {"eventCode": "PTAC", "eventDescriptionText": "Patent Issue Date Used in PTA Calculation", "eventDate": "2020-01-07"}
        ],
        "parentContinuityBag": [{
            "parentApplicationNumberText": "15000001",
            "childApplicationNumberText": application_number,
            "claimParentageTypeCode": "CON",
            "claimParentageTypeCodeDescriptionText": "is a Continuation of",
            "parentApplicationFilingDate": "2017-01-02",
            "parentPatentNumber": "9900000"
        }],
        "childContinuityBag": [],
        "foreignPriorityBag": [{"ipOfficeName": "TAIWAN", "filingDate": "2017-09-15", "applicationNumberText": "106131789"}],
        "assignmentBag": [{
            "reelNumber": 47123,
            "frameNumber": 456,
            "reelAndFrameNumber": "47123/456",
            "conveyanceText": "ASSIGNMENT OF ASSIGNORS INTEREST",
            "assignmentRecordedDate": "2018-10-01",
            "assignorBag": [{"assignorName": "TIEN, KAI-YUAN", "executionDate": "2018-09-20"}],
            "assigneeBag": [{"assigneeNameText": "EXAMPLE OPTICS CORP", "assigneeAddress": {"cityName": "TAIPEI", "countryName": "TAIWAN"}}]
        }],
        "recordAttorney": {
            "powerOfAttorneyBag": [{"firstName": "Ada", "lastName": "Lovelace", "registrationNumber": "12345", "activeIndicator": "ACTIVE"}],
            "customerNumberCorrespondenceData": [{"patronIdentifier": 84956, "organizationStandardName": "EXAMPLE IP LAW"}]
        },
        "patentTermAdjustmentData": {
            "aDelayQuantity": 120,
            "bDelayQuantity": 0,
            "cDelayQuantity": 0,
            "applicantDayDelayQuantity": 15,
            "overlappingDayQuantity": 0,
            "adjustmentTotalQuantity": 105,
            "patentTermAdjustmentHistoryDataBag": [
                {"eventSequenceNumber": 1.0, "eventDescriptionText": "Mail Non-Final Rejection", "eventDate": "2019-03-01", "ipOfficeDayDelayQuantity": 120.0}
            ]
        },
        "pgpubDocumentMetaData": {
            "productIdentifier": "APPXML",
            "zipFileName": "ipa190321.zip",
            "xmlFileName": "ipa190321.xml",
            "fileLocationURI": "https://bulkdata.uspto.gov/ipa190321.zip",
            "fileCreateDateTime": "2019-03-21T10:30:00Z"
        },
        "grantDocumentMetaData": null,
        "lastIngestionDateTime": "2024-05-02T00:11:22"
    })
}

/// Project a wrapper onto the keys one sub-resource returns.
pub fn wrapper_view(application_number: &str, keys: &[&str]) -> Value {
    let full = wrapper(application_number);
    let mut view = serde_json::Map::new();
    view.insert("applicationNumberText".to_string(), json!(application_number));
    for key in keys {
        if let Some(value) = full.get(*key) {
            view.insert((*key).to_string(), value.clone());
        }
    }
    Value::Object(view)
}

pub fn documents(application_number: &str, base_url: &str) -> Vec<Value> {
    let download = |file: &str| format!("{base_url}/download/applications/{application_number}/{file}");
    vec![
        json!({
            "applicationNumberText": application_number,
            "officialDate": "2019-03-01T00:00:00.000-0500",
            "documentIdentifier": "JTQ2KQ1ZPXXIFW3",
            "documentCode": "CTNF",
            "documentCodeDescriptionText": "Non-Final Rejection",
            "directionCategory": "OUTGOING",
            "downloadOptionBag": [
                {"mimeTypeIdentifier": "PDF", "downloadUrl": download("JTQ2KQ1ZPXXIFW3.pdf"), "pageTotalQuantity": 12},
                {"mimeTypeIdentifier": "MS_WORD", "downloadUrl": download("JTQ2KQ1ZPXXIFW3.doc")}
            ]
        }),
        json!({
            "applicationNumberText": application_number,
            "officialDate": "2019-06-01T00:00:00.000-0400",
            "documentIdentifier": "MISSINGDOC00001",
            "documentCode": "REM",
            "documentCodeDescriptionText": "Applicant Arguments/Remarks",
            "directionCategory": "INCOMING",
            "downloadOptionBag": [
                {"mimeTypeIdentifier": "PDF", "downloadUrl": download("missing.pdf")}
            ]
        }),
    ]
}

/// Deterministic bytes served for every document download.
pub fn document_bytes() -> Vec<u8> {
    (0..100_000u32).map(|i| (i % 251) as u8).collect()
}

pub fn status_codes() -> Vec<Value> {
    [
        (3, "Proceedings Terminated"),
        (19, "Application Dispatched from Preexam, Not Yet Docketed"),
        (30, "Docketed New Case - Ready for Examination"),
        (150, "Patented Case"),
        (161, "Abandoned -- Failure to Respond to an Office Action"),
    ]
    .iter()
    .map(|(code, text)| json!({"applicationStatusCode": code, "applicationStatusDescriptionText": text}))
    .collect()
}

// ---------------------------------------------------------------------------
// Search families
// ---------------------------------------------------------------------------

/// A search-style resource family and its fixtures.
#[derive(Debug, Clone, Copy)]
pub enum Family {
    Petitions,
    TrialProceedings,
    TrialDecisions,
    TrialDocuments,
    AppealDecisions,
    InterferenceDecisions,
}

impl Family {
    pub fn bag(&self) -> &'static str {
        match self {
            Family::Petitions => "petitionDecisionBag",
            Family::TrialProceedings => "trialProceedingBag",
            Family::TrialDecisions => "trialDecisionBag",
            Family::TrialDocuments => "trialDocumentBag",
            Family::AppealDecisions => "appealDecisionBag",
            Family::InterferenceDecisions => "interferenceDecisionBag",
        }
    }

    /// Field looked up by `GET <family>/{id}`.
    pub fn id_field(&self) -> &'static str {
        match self {
            Family::Petitions => "petitionDecisionRecordIdentifier",
            Family::TrialProceedings => "trialNumber",
            _ => "documentIdentifier",
        }
    }

    pub fn records(&self) -> Vec<Value> {
        match self {
            Family::Petitions => vec![
                json!({"petitionDecisionRecordIdentifier": "pet-0001", "applicationNumberText": FULL_APPLICATION, "firstApplicantName": "EXAMPLE OPTICS CORP", "decisionTypeCodeDescriptionText": "GRANTED", "petitionMailDate": "2021-04-05", "technologyCenter": "2800"}),
                json!({"petitionDecisionRecordIdentifier": "pet-0002", "applicationNumberText": "15000001", "decisionTypeCodeDescriptionText": "DENIED"}),
            ],
            Family::TrialProceedings => vec![
                json!({"trialNumber": "IPR2023-00001", "trialType": "IPR", "proceedingStatus": "Instituted", "patentNumber": GRANTED_PATENT_NUMBER, "filingDate": "2023-01-03", "petitionerPartyName": "Example Corp"}),
                json!({"trialNumber": "PGR2022-00010", "trialType": "PGR", "proceedingStatus": "Terminated", "patentNumber": "9900000", "filingDate": "2022-02-14"}),
            ],
            Family::TrialDecisions => vec![
                json!({"documentIdentifier": "dec-ipr-1", "trialNumber": "IPR2023-00001", "trialType": "IPR", "decisionType": "Institution Decision", "decisionDate": "2023-07-10", "patentNumber": GRANTED_PATENT_NUMBER}),
                json!({"documentIdentifier": "dec-ipr-2", "trialNumber": "IPR2023-00001", "trialType": "IPR", "decisionType": "Final Written Decision", "decisionDate": "2024-07-09", "patentNumber": GRANTED_PATENT_NUMBER}),
            ],
            Family::TrialDocuments => vec![
                json!({"documentIdentifier": "doc-ipr-1", "trialNumber": "IPR2023-00001", "trialType": "IPR", "documentType": "Paper", "documentTitle": "Petition", "filingDate": "2023-01-03"}),
                json!({"documentIdentifier": "doc-pgr-1", "trialNumber": "PGR2022-00010", "trialType": "PGR", "documentType": "Exhibit", "documentTitle": "Declaration", "filingDate": "2022-02-14"}),
            ],
            Family::AppealDecisions => vec![
                json!({"documentIdentifier": "appeal-doc-1", "appealNumber": "2023-001234", "decisionType": "Affirmed", "decisionDate": "2023-11-30", "applicationNumberText": "15000001"}),
            ],
            Family::InterferenceDecisions => vec![
                json!({"documentIdentifier": "int-doc-1", "interferenceNumber": "106,001", "decisionType": "Judgment", "decisionDate": "2010-06-30", "patentNumber": "7000000"}),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

pub fn dataset_product(product_id: &str) -> Option<Value> {
    match product_id {
        "PTGRXML" => Some(json!({
            "productIdentifier": "PTGRXML",
            "productName": "Patent Grant Full Text Data (No Images) - XML",
            "productType": "Patent",
            "productDescription": "Weekly full text of granted patents",
            "releaseDate": "2024-01-09",
            "fileCount": 2,
            "totalSize": 246912,
            "productFrequencyText": "Weekly",
            "files": [
                {"fileName": "ipg240102.zip", "fileDate": "2024-01-02", "fileSize": 123456},
                {"fileName": "ipg240109.zip", "fileDate": "2024-01-09", "fileSize": 123456}
            ]
        })),
        "APPXML" => Some(json!({
            "productIdentifier": "APPXML",
            "productName": "Patent Application Full Text Data (No Images) - XML",
            "productType": "Patent",
            "releaseDate": "2024-01-11",
            "fileCount": 0,
            "files": []
        })),
        _ => None,
    }
}
