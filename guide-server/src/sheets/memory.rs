//! In-memory row store
//!
//! Tabs are plain grids of [`CellValue`] behind a `parking_lot::RwLock`.
//! Used when no spreadsheet is configured and by the test suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{CellUpdate, CellValue, SheetStore, StoreError, StoreResult, Table};

type Grid = Vec<Vec<CellValue>>;

#[derive(Debug, Clone, Default)]
pub struct MemorySheetStore {
    sheets: Arc<RwLock<HashMap<String, Grid>>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace (or create) a tab with the given grid, header row first
    pub fn insert_sheet(&self, name: &str, grid: Grid) {
        self.sheets.write().insert(name.to_string(), grid);
    }

    /// Snapshot of a tab's raw grid
    pub fn grid(&self, name: &str) -> Option<Grid> {
        self.sheets.read().get(name).cloned()
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn fetch(&self, sheet: &str) -> StoreResult<Option<Table>> {
        Ok(self.grid(sheet).map(Table::from_grid))
    }

    async fn create_sheet(&self, sheet: &str, headers: &[&str]) -> StoreResult<()> {
        let mut sheets = self.sheets.write();
        sheets
            .entry(sheet.to_string())
            .or_insert_with(|| vec![headers.iter().map(|h| CellValue::from(*h)).collect()]);
        Ok(())
    }

    async fn update_cells(&self, sheet: &str, updates: Vec<CellUpdate>) -> StoreResult<()> {
        let mut sheets = self.sheets.write();
        let grid = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;

        for update in updates {
            if grid.len() <= update.row {
                grid.resize_with(update.row + 1, Vec::new);
            }
            let row = &mut grid[update.row];
            if row.len() <= update.col {
                row.resize(update.col + 1, CellValue::Empty);
            }
            row[update.col] = update.value;
        }
        Ok(())
    }

    async fn append_rows(&self, sheet: &str, rows: Vec<Vec<CellValue>>) -> StoreResult<()> {
        let mut sheets = self.sheets.write();
        let grid = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::SheetNotFound(sheet.to_string()))?;
        grid.extend(rows);
        Ok(())
    }
}
