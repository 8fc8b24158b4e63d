//! Row store accessor
//!
//! Every tab is a header row followed by data rows. Reads always return the
//! whole tab; writes patch individual cells or append rows. Nothing is cached.
//!
//! # Backends
//!
//! - [`GoogleSheetsStore`] - Google Sheets API v4 over reqwest
//! - [`MemorySheetStore`] - in-process tabs for local development and tests

pub mod cell;
pub mod google;
pub mod memory;
pub mod table;

use async_trait::async_trait;
use thiserror::Error;

use shared::AppError;

pub use cell::CellValue;
pub use google::{GoogleSheetsStore, SheetsSettings};
pub use memory::MemorySheetStore;
pub use table::{Record, Table};

/// Tab names
pub const RESTAURANT_SHEET: &str = "restaurant";
pub const MENU_SHEET: &str = "menu";
pub const REVIEW_SHEET: &str = "review";
pub const LIKE_SHEET: &str = "like";

/// Single cell write; `row` and `col` are 0-based grid indices (row 0 is the header)
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    pub row: usize,
    pub col: usize,
    pub value: CellValue,
}

impl CellUpdate {
    pub fn new(row: usize, col: usize, value: impl Into<CellValue>) -> Self {
        Self {
            row,
            col,
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("Spreadsheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spreadsheet API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected spreadsheet response: {0}")]
    Decode(String),

    #[error("Access token unavailable: {0}")]
    Token(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Row store failure");
        match err {
            StoreError::SheetNotFound(name) => {
                AppError::storage(format!("Sheet '{name}' not found")).with_detail("sheet", name)
            }
            other => AppError::storage(other.to_string()),
        }
    }
}

/// Tab-level storage operations
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Whole tab, `None` when the tab does not exist
    async fn fetch(&self, sheet: &str) -> StoreResult<Option<Table>>;

    /// Create a tab whose first row is `headers`
    async fn create_sheet(&self, sheet: &str, headers: &[&str]) -> StoreResult<()>;

    /// Patch individual cells
    async fn update_cells(&self, sheet: &str, updates: Vec<CellUpdate>) -> StoreResult<()>;

    /// Append rows after the last used row
    async fn append_rows(&self, sheet: &str, rows: Vec<Vec<CellValue>>) -> StoreResult<()>;
}

/// Fetch a tab, treating a missing tab as empty
pub async fn fetch_or_empty(store: &dyn SheetStore, sheet: &str) -> StoreResult<Table> {
    Ok(store.fetch(sheet).await?.unwrap_or_default())
}

/// Fetch a tab that must exist
pub async fn fetch_required(store: &dyn SheetStore, sheet: &str) -> StoreResult<Table> {
    store
        .fetch(sheet)
        .await?
        .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))
}

/// Fetch a tab, creating it with `headers` first when it is missing or blank
pub async fn fetch_or_create(
    store: &dyn SheetStore,
    sheet: &str,
    headers: &[&str],
) -> StoreResult<Table> {
    match store.fetch(sheet).await? {
        Some(table) if !table.headers().is_empty() => Ok(table),
        Some(_) => {
            store
                .append_rows(sheet, vec![headers.iter().map(|h| CellValue::from(*h)).collect()])
                .await?;
            fetch_required(store, sheet).await
        }
        None => {
            tracing::info!(sheet = %sheet, "Creating missing sheet");
            store.create_sheet(sheet, headers).await?;
            fetch_required(store, sheet).await
        }
    }
}

/// Column indices for `names`; missing ones are appended to the header row
/// in the given order
pub async fn ensure_columns(
    store: &dyn SheetStore,
    sheet: &str,
    table: &Table,
    names: &[&str],
) -> StoreResult<Vec<usize>> {
    let mut next = table.headers().len();
    let mut header_cells = Vec::new();
    let mut cols = Vec::with_capacity(names.len());

    for name in names {
        match table.column(name) {
            Some(col) => cols.push(col),
            None => {
                tracing::info!(sheet = %sheet, column = %name, "Appending missing column header");
                header_cells.push(CellUpdate::new(0, next, *name));
                cols.push(next);
                next += 1;
            }
        }
    }

    if !header_cells.is_empty() {
        store.update_cells(sheet, header_cells).await?;
    }
    Ok(cols)
}
