//! Services - one per tab
//!
//! Each service reads whole tabs through the [`SheetStore`](crate::sheets::SheetStore),
//! maps rows to models and patches cells for writes. Cached aggregates on
//! the restaurant row are recomputed after every review or like mutation.

pub mod like;
pub mod menu;
pub mod restaurant;
pub mod review;

pub use like::LikeService;
pub use menu::{MenuService, average_price};
pub use restaurant::RestaurantService;
pub use review::ReviewService;

#[cfg(test)]
pub(crate) mod fixtures;
