//! Data models
//!
//! Shared between the server and the web client (via API). Field names
//! follow the client's existing JSON contract, which mixes snake_case
//! (`signature_menu`) with a few camelCase keys (`mapUrl`, `isAdmin`).

pub mod like;
pub mod menu;
pub mod restaurant;
pub mod review;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use like::*;
pub use menu::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;
