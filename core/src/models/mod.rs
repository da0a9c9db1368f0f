//! Typed models for every ODP resource family.
//!
//! All models tolerate missing sub-objects, `null` bags, unparseable dates
//! and unknown fields.

mod de;

pub mod application;
pub mod datasets;
pub mod documents;
pub mod petitions;
pub mod ptab;
pub mod records;
pub mod status_codes;

pub use application::{PatentFileWrapper, PatentFileWrapperResponse};
pub use datasets::{DatasetFile, DatasetProduct, DatasetProductsResponse, ProductFile};
pub use de::{parse_date, parse_datetime};
pub use documents::{Document, DocumentsResponse, DownloadOption};
pub use petitions::{PetitionDecision, PetitionDecisionsDownload, PetitionDecisionsResponse};
pub use ptab::{
    AppealDecision, AppealDecisionsDownload, AppealDecisionsResponse, InterferenceDecision,
    InterferenceDecisionsDownload, InterferenceDecisionsResponse, TrialDecision,
    TrialDecisionsDownload, TrialDecisionsResponse, TrialDocument, TrialDocumentsDownload,
    TrialDocumentsResponse, TrialProceeding, TrialProceedingsDownload, TrialProceedingsResponse,
};
pub use records::{
    AdjustmentRecord, AssignmentRecord, AssociatedDocumentsRecord, AttorneyRecord,
    ContinuityRecord, ForeignPriorityRecord, MetadataRecord, TransactionRecord,
};
pub use status_codes::{StatusCode, StatusCodesResponse};
