use std::sync::Arc;

use crate::core::config::StoreBackend;
use crate::core::{Config, Result, ServerError};
use crate::services::{LikeService, MenuService, RestaurantService, ReviewService};
use crate::sheets::{GoogleSheetsStore, MemorySheetStore, SheetStore};

/// Server state shared by every handler
///
/// Cheap to clone: the row store sits behind an `Arc`.
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | configuration (immutable) |
/// | store | Arc<dyn SheetStore> | row store backend |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn SheetStore>,
}

impl ServerState {
    /// Build the configured row store
    pub async fn initialize(config: &Config) -> Result<Self> {
        let store: Arc<dyn SheetStore> = match config.store_backend {
            StoreBackend::Google => {
                let settings = config.sheets_settings().ok_or_else(|| {
                    ServerError::Config("SPREADSHEET_ID is required for the google backend".into())
                })?;
                tracing::info!(spreadsheet = %settings.spreadsheet_id, "Using Google Sheets backend");
                Arc::new(GoogleSheetsStore::new(settings)?)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory backend, data is lost on restart");
                Arc::new(MemorySheetStore::new())
            }
        };
        Ok(Self::with_store(config.clone(), store))
    }

    pub fn with_store(config: Config, store: Arc<dyn SheetStore>) -> Self {
        Self { config, store }
    }

    pub fn restaurants(&self) -> RestaurantService {
        RestaurantService::new(self.store.clone())
    }

    pub fn menus(&self) -> MenuService {
        MenuService::new(self.store.clone())
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.store.clone())
    }

    pub fn likes(&self) -> LikeService {
        LikeService::new(self.store.clone())
    }
}
