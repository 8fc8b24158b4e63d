//! Restaurant guide server
//!
//! CRUD backend for a shared restaurant guide. Restaurants, menus, reviews
//! and likes live in four spreadsheet tabs; every request reads whole tabs
//! and patches individual cells.
//!
//! # Module structure
//!
//! ```text
//! guide-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # caller identity
//! ├── sheets/        # row store (Google Sheets / in-memory)
//! ├── services/      # restaurant, menu, review, like logic
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, escaping, dates, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod services;
pub mod sheets;
pub mod utils;

pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use sheets::{GoogleSheetsStore, MemorySheetStore, SheetStore};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging
///
/// Production logs are JSON lines; `LOG_DIR` adds a daily rolling file.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )
}

pub fn print_banner() {
    println!(
        r#"
   ____       _     _
  / ___|_   _(_) __| | ___
 | |  _| | | | |/ _` |/ _ \
 | |_| | |_| | | (_| |  __/
  \____|\__,_|_|\__,_|\___|   v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
