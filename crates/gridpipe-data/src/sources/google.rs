//! Google Sheets v4 data source using blocking reqwest.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{ExtractError, Result};
use crate::sources::{SheetSource, WorksheetRef};

/// Authorization scope a supplied access token must carry
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com";

/// How requests to the Sheets API are authorized
#[derive(Debug, Clone)]
pub enum SheetsAuth {
    /// OAuth2 access token sent as a bearer header
    Bearer(String),
    /// API key sent as a `key` query parameter
    ApiKey(String),
}

/// Google Sheets workbook data source
pub struct SheetsClient {
    http: Client,
    endpoint: String,
    workbook_id: String,
    auth: SheetsAuth,
}

/// Response shape of `GET /v4/spreadsheets/{id}?fields=sheets.properties`
#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

/// Response shape of `GET /v4/spreadsheets/{id}/values/{range}`
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetsClient {
    /// Open a workbook by identifier.
    ///
    /// No request is made here; the first call through [`SheetSource`]
    /// surfaces authorization and workbook-not-found failures.
    pub fn open(workbook_id: impl Into<String>, auth: SheetsAuth) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| ExtractError::Source(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            workbook_id: workbook_id.into(),
            auth,
        })
    }

    /// Override the API endpoint (for tests against a local server)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The identifier of the opened workbook
    pub fn workbook_id(&self) -> &str {
        &self.workbook_id
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<T> {
        let mut url =
            Url::parse(&self.endpoint).map_err(|e| ExtractError::Source(e.to_string()))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ExtractError::Source(format!("Invalid endpoint: {}", self.endpoint)))?;
            path.extend(["v4", "spreadsheets", self.workbook_id.as_str()]);
            path.extend(segments);
        }
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut request = self.http.get(url);
        match &self.auth {
            SheetsAuth::Bearer(token) => request = request.bearer_auth(token),
            SheetsAuth::ApiKey(key) => request = request.query(&[("key", key)]),
        }

        let response = request
            .send()
            .map_err(|e| ExtractError::Source(e.to_string()))?;
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ExtractError::Unauthorized(format!(
                    "HTTP {status}; the credential must carry the {SPREADSHEETS_SCOPE} scope"
                )));
            }
            StatusCode::NOT_FOUND => {
                return Err(ExtractError::WorkbookNotFound(self.workbook_id.clone()));
            }
            StatusCode::BAD_REQUEST => {
                let body = response.text().unwrap_or_default();
                return Err(ExtractError::InvalidRange(body));
            }
            _ if !status.is_success() => {
                let body = response.text().unwrap_or_default();
                return Err(ExtractError::Source(format!("HTTP {status}: {body}")));
            }
            _ => {}
        }

        response
            .json::<T>()
            .map_err(|e| ExtractError::Source(e.to_string()))
    }
}

impl SheetSource for SheetsClient {
    fn worksheets(&self) -> Result<Vec<WorksheetRef>> {
        let meta: SpreadsheetMeta = self.get(&[], &[("fields", "sheets.properties")])?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|entry| WorksheetRef::new(entry.properties.title, entry.properties.sheet_id.to_string()))
            .collect())
    }

    fn read_range(&self, sheet: &WorksheetRef, range: &str) -> Result<Vec<Vec<String>>> {
        let range_ref = format!("{}!{}", quote_title(&sheet.title), range);
        let values: ValueRange = self.get(&["values", range_ref.as_str()], &[])?;
        Ok(rows_to_strings(values.values))
    }

    fn read_all(&self, sheet: &WorksheetRef) -> Result<Vec<Vec<String>>> {
        // A quoted title alone addresses the whole worksheet in A1 notation.
        let range_ref = quote_title(&sheet.title);
        let values: ValueRange = self.get(&["values", range_ref.as_str()], &[])?;
        Ok(rows_to_strings(values.values))
    }
}

/// Quote a worksheet title for use in an A1 range reference
fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Convert a raw JSON cell to a string
fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn rows_to_strings(rows: Vec<Vec<Value>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect()
}
