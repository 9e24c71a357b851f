use actix_web::{HttpResponse, Responder};

use crate::auth::middleware::AuthenticatedUser;
use crate::models::users::UserResponse;

/// GET /api/auth/me: the user behind the bearer token, created on first call.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
