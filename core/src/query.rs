//! Optional query parameters for the GET search endpoints.
//!
//! Every field is optional and is passed through verbatim; the client does
//! no validation of the ODP query syntax. A field left as `None` is omitted
//! from the request entirely. The server treats "not sent" differently from
//! "sent empty" (omission yields its default page of 25 items).

use std::fmt;

/// Output format for the search-download endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Json,
    Csv,
}

impl DownloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadFormat::Json => "json",
            DownloadFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-string parameters shared by all GET search endpoints.
///
/// ```
/// use uspto_odp::SearchQuery;
///
/// let query = SearchQuery::new()
///     .q("applicationMetaData.applicationTypeLabelName:Utility")
///     .sort("applicationMetaData.filingDate desc")
///     .limit(50);
/// assert_eq!(query.to_params().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub facets: Option<String>,
    pub fields: Option<String>,
    pub filters: Option<String>,
    pub range_filters: Option<String>,
    pub format: Option<DownloadFormat>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Comma-separated field names to facet on.
    pub fn facets(mut self, facets: impl Into<String>) -> Self {
        self.facets = Some(facets.into());
        self
    }

    /// Comma-separated field names to include in each result.
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// `fieldName value1,value2`
    pub fn filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    /// `fieldName min:max`
    pub fn range_filters(mut self, range_filters: impl Into<String>) -> Self {
        self.range_filters = Some(range_filters.into());
        self
    }

    pub fn format(mut self, format: DownloadFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Wire parameters, in a stable order, for the fields that are set.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(&mut params, "q", self.q.as_deref());
        push(&mut params, "sort", self.sort.as_deref());
        push(&mut params, "offset", self.offset);
        push(&mut params, "limit", self.limit);
        push(&mut params, "facets", self.facets.as_deref());
        push(&mut params, "fields", self.fields.as_deref());
        push(&mut params, "filters", self.filters.as_deref());
        push(&mut params, "rangeFilters", self.range_filters.as_deref());
        push(&mut params, "format", self.format);
        params
    }

    /// Same query shifted to another page.
    pub(crate) fn page(&self, offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
            ..self.clone()
        }
    }
}

/// Query-string parameters for a single bulk dataset product lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetProductQuery {
    pub file_data_from_date: Option<String>,
    pub file_data_to_date: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub include_files: Option<bool>,
    pub latest: Option<bool>,
}

impl DatasetProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only include files whose data starts on or after this `YYYY-MM-DD` date.
    pub fn file_data_from_date(mut self, date: impl Into<String>) -> Self {
        self.file_data_from_date = Some(date.into());
        self
    }

    pub fn file_data_to_date(mut self, date: impl Into<String>) -> Self {
        self.file_data_to_date = Some(date.into());
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn include_files(mut self, include: bool) -> Self {
        self.include_files = Some(include);
        self
    }

    pub fn latest(mut self, latest: bool) -> Self {
        self.latest = Some(latest);
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push(&mut params, "fileDataFromDate", self.file_data_from_date.as_deref());
        push(&mut params, "fileDataToDate", self.file_data_to_date.as_deref());
        push(&mut params, "offset", self.offset);
        push(&mut params, "limit", self.limit);
        push(&mut params, "includeFiles", self.include_files);
        push(&mut params, "latest", self.latest);
        params
    }
}

fn push<T: ToString>(params: &mut Vec<(String, String)>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        params.push((key.to_string(), value.to_string()));
    }
}
