use sea_orm::DatabaseConnection;

use crate::db::guides as guide_db;
use crate::error::{ApiError, ApiResult};
use crate::models::{guides, users};

/// The guide profile owned by `user`. Users without one get the same 404 as
/// a missing resource.
pub async fn require_guide(db: &DatabaseConnection, user: &users::Model) -> ApiResult<guides::Model> {
    guide_db::get_guide_by_user(db, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Guide profile not found"))
}

pub fn require_admin(user: &users::Model) -> ApiResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::not_found("Not found"))
    }
}
