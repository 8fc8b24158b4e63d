//! Google Sheets API v4 backend
//!
//! Reads prefer the grid endpoint so rich cells (smart-chip links and
//! hyperlinked text runs) keep their URL; when that request fails the
//! plain values endpoint is used instead. Writes go through the values
//! endpoints with `RAW` input, so text is stored exactly as sent.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CellUpdate, CellValue, SheetStore, StoreError, StoreResult, Table};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh a cached token this long before it expires
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Store cell text as sent; the sheet never parses it
const VALUE_INPUT_OPTION: &str = "RAW";

const GRID_FIELDS: &str =
    "sheets(data(rowData(values(effectiveValue,formattedValue,hyperlink,textFormatRuns,chipRuns))))";

/// Connection settings for [`GoogleSheetsStore`]
#[derive(Debug, Clone)]
pub struct SheetsSettings {
    pub spreadsheet_id: String,
    /// e.g. `https://sheets.googleapis.com/v4`
    pub api_base: String,
    /// Static bearer token; the metadata server is used when absent
    pub access_token: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
enum TokenSource {
    Static(String),
    Metadata(Mutex<Option<CachedToken>>),
}

#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

pub struct GoogleSheetsStore {
    client: Client,
    settings: SheetsSettings,
    token: TokenSource,
}

impl GoogleSheetsStore {
    pub fn new(settings: SheetsSettings) -> StoreResult<Self> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        let token = match settings.access_token.as_deref() {
            Some(t) if !t.is_empty() => TokenSource::Static(t.to_string()),
            _ => TokenSource::Metadata(Mutex::new(None)),
        };
        Ok(Self {
            client,
            settings,
            token,
        })
    }

    async fn access_token(&self) -> StoreResult<String> {
        let cache = match &self.token {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::Metadata(cache) => cache,
        };

        let cached = cache.lock().clone();
        if let Some(cached) = cached
            && cached.expires_at > Instant::now()
        {
            return Ok(cached.value);
        }

        let resp = self
            .client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| StoreError::Token(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(StoreError::Token(format!(
                "metadata server returned {}",
                resp.status()
            )));
        }
        let token: MetadataToken = resp
            .json()
            .await
            .map_err(|e| StoreError::Token(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cache.lock() = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        tracing::debug!(expires_in = token.expires_in, "Fetched access token from metadata server");
        Ok(token.access_token)
    }

    fn spreadsheet_id(&self) -> &str {
        &self.settings.spreadsheet_id
    }

    /// `{api_base}/spreadsheets/` followed by `segments`, each percent-encoded
    fn url(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = Url::parse(&self.settings.api_base)
            .map_err(|e| StoreError::Decode(format!("invalid API base: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Decode("API base cannot be a base URL".into()))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Value> {
        let token = self.access_token().await?;
        let resp = request.bearer_auth(token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json().await?)
    }

    async fn fetch_grid(&self, sheet: &str) -> StoreResult<Vec<Vec<CellValue>>> {
        let url = self.url(&[self.spreadsheet_id()])?;
        let request = self
            .client
            .get(url)
            .query(&[("ranges", quote_sheet(sheet)), ("fields", GRID_FIELDS.to_string())]);
        let body = self.send(request).await?;
        parse_grid_response(body)
    }

    async fn fetch_values(&self, sheet: &str) -> StoreResult<Vec<Vec<CellValue>>> {
        let range = quote_sheet(sheet);
        let url = self.url(&[self.spreadsheet_id(), "values", range.as_str()])?;
        let request = self.client.get(url).query(&[
            ("valueRenderOption", "UNFORMATTED_VALUE"),
            ("dateTimeRenderOption", "SERIAL_NUMBER"),
        ]);
        let body = self.send(request).await?;
        parse_values_response(body)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsStore {
    async fn fetch(&self, sheet: &str) -> StoreResult<Option<Table>> {
        let grid = match self.fetch_grid(sheet).await {
            Ok(grid) => grid,
            Err(e) if is_missing_range(&e) => return Ok(None),
            Err(e) => {
                tracing::warn!(sheet = %sheet, error = %e, "Rich fetch failed, falling back to plain values");
                match self.fetch_values(sheet).await {
                    Ok(grid) => grid,
                    Err(e) if is_missing_range(&e) => return Ok(None),
                    Err(e) => return Err(e),
                }
            }
        };
        Ok(Some(Table::from_grid(grid)))
    }

    async fn create_sheet(&self, sheet: &str, headers: &[&str]) -> StoreResult<()> {
        let target = format!("{}:batchUpdate", self.spreadsheet_id());
        let url = self.url(&[target.as_str()])?;
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": sheet } } }]
        });
        self.send(self.client.post(url).json(&body)).await?;

        let header_row = headers.iter().map(|h| CellValue::from(*h)).collect();
        self.append_rows(sheet, vec![header_row]).await
    }

    async fn update_cells(&self, sheet: &str, updates: Vec<CellUpdate>) -> StoreResult<()> {
        if updates.is_empty() {
            return Ok(());
        }
        let data: Vec<Value> = updates
            .iter()
            .map(|u| {
                json!({
                    "range": format!("{}!{}", quote_sheet(sheet), a1_cell(u.row, u.col)),
                    "values": [[u.value.to_json()]],
                })
            })
            .collect();

        let url = self.url(&[self.spreadsheet_id(), "values:batchUpdate"])?;
        let body = json!({ "valueInputOption": VALUE_INPUT_OPTION, "data": data });
        self.send(self.client.post(url).json(&body)).await?;
        tracing::debug!(sheet = %sheet, cells = updates.len(), "Cells updated");
        Ok(())
    }

    async fn append_rows(&self, sheet: &str, rows: Vec<Vec<CellValue>>) -> StoreResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let values: Vec<Vec<Value>> = rows
            .iter()
            .map(|r| r.iter().map(CellValue::to_json).collect())
            .collect();
        let range = format!("{}!A1:append", quote_sheet(sheet));
        let url = self.url(&[self.spreadsheet_id(), "values", range.as_str()])?;
        let request = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", VALUE_INPUT_OPTION),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": values }));
        self.send(request).await?;
        tracing::debug!(sheet = %sheet, rows = rows.len(), "Rows appended");
        Ok(())
    }
}

/// The API answers 400 "Unable to parse range" for a tab that does not exist
fn is_missing_range(err: &StoreError) -> bool {
    matches!(err, StoreError::Api { status: 400, body } if body.contains("Unable to parse range"))
}

/// Quote a tab name for A1 notation
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// A1 reference for 0-based grid coordinates (`(0, 0)` is `A1`)
pub(crate) fn a1_cell(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

fn column_letters(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

// ========== Response parsing ==========

#[derive(Debug, Default, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<GridSheet>,
}

#[derive(Debug, Default, Deserialize)]
struct GridSheet {
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    #[serde(default)]
    row_data: Vec<RowData>,
}

#[derive(Debug, Default, Deserialize)]
struct RowData {
    #[serde(default)]
    values: Vec<CellData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellData {
    effective_value: Option<ExtendedValue>,
    formatted_value: Option<String>,
    hyperlink: Option<String>,
    #[serde(default)]
    text_format_runs: Vec<TextFormatRun>,
    #[serde(default)]
    chip_runs: Vec<ChipRun>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtendedValue {
    string_value: Option<String>,
    number_value: Option<f64>,
    bool_value: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct TextFormatRun {
    format: Option<TextFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct TextFormat {
    link: Option<LinkTarget>,
}

#[derive(Debug, Default, Deserialize)]
struct LinkTarget {
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChipRun {
    chip: Option<Chip>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Chip {
    rich_link_properties: Option<LinkTarget>,
}

impl CellData {
    fn link(&self) -> Option<String> {
        let chip = self
            .chip_runs
            .iter()
            .filter_map(|r| r.chip.as_ref()?.rich_link_properties.as_ref()?.uri.clone())
            .next();
        let run = || {
            self.text_format_runs
                .iter()
                .filter_map(|r| r.format.as_ref()?.link.as_ref()?.uri.clone())
                .next()
        };
        chip.or_else(run)
            .or_else(|| self.hyperlink.clone())
            .filter(|u| !u.is_empty())
    }

    fn into_cell(self) -> CellValue {
        if let Some(url) = self.link() {
            let text = self
                .formatted_value
                .clone()
                .or_else(|| self.effective_value.as_ref()?.string_value.clone())
                .unwrap_or_default();
            return CellValue::Link { text, url };
        }
        match self.effective_value {
            Some(ExtendedValue {
                string_value: Some(s),
                ..
            }) if !s.is_empty() => CellValue::Text(s),
            Some(ExtendedValue {
                number_value: Some(n),
                ..
            }) => CellValue::Number(n),
            Some(ExtendedValue {
                bool_value: Some(b),
                ..
            }) => CellValue::Bool(b),
            _ => CellValue::Empty,
        }
    }
}

/// Grid endpoint response → raw grid
fn parse_grid_response(body: Value) -> StoreResult<Vec<Vec<CellValue>>> {
    let spreadsheet: Spreadsheet =
        serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(spreadsheet
        .sheets
        .into_iter()
        .flat_map(|s| s.data)
        .flat_map(|d| d.row_data)
        .map(|row| row.values.into_iter().map(CellData::into_cell).collect())
        .collect())
}

/// Values endpoint response → raw grid
fn parse_values_response(body: Value) -> StoreResult<Vec<Vec<CellValue>>> {
    let values = match body.get("values") {
        None => return Ok(Vec::new()),
        Some(Value::Array(rows)) => rows,
        Some(other) => {
            return Err(StoreError::Decode(format!(
                "expected values array, got {other}"
            )));
        }
    };
    Ok(values
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| cells.iter().map(CellValue::from_json).collect())
                .unwrap_or_default()
        })
        .collect())
}
