//! User Model

use serde::{Deserialize, Serialize};

/// Session identity as reported to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    /// Email supplied by the hosting platform (empty when anonymous)
    pub email: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
