//! Caller identity handler

use shared::ApiResponse;
use shared::models::UserInfo;

use crate::api::ApiCall;
use crate::auth::CurrentUser;

/// GET /api/getCurrentUser - email and admin flag; email is empty for
/// anonymous callers
pub async fn current_user(user: CurrentUser) -> ApiResponse<UserInfo> {
    ApiCall::start("getCurrentUser").finish(Ok(user.info()), None)
}
