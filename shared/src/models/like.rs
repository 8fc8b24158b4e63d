//! Like Model

use serde::{Deserialize, Serialize};

/// Result of a like toggle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeToggle {
    /// State after the toggle
    pub liked: bool,
}
