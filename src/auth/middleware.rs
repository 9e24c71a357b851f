use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::TokenVerifier;
use crate::db::users::find_or_create_from_auth;
use crate::models::users::{self, CreateUserFromAuth};

/// The caller, resolved from the `Authorization: Bearer` token. Rejects the
/// request with 401 when the token is missing or invalid.
pub struct AuthenticatedUser(pub users::Model);

/// Like `AuthenticatedUser` but never rejects: no header means `None`.
/// A header that is present but invalid still yields 401.
pub struct OptionalUser(pub Option<users::Model>);

fn bearer_token(req: &HttpRequest) -> Result<Option<String>, Error> {
    let Some(header) = req.headers().get("Authorization") else {
        return Ok(None);
    };
    let header = header
        .to_str()
        .map_err(|_| actix_web::error::ErrorUnauthorized("Malformed Authorization header"))?;
    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized("Authorization header must be: Bearer <token>")
    })?;
    Ok(Some(token.to_string()))
}

async fn resolve_user(req: &HttpRequest, token: &str) -> Result<users::Model, Error> {
    let verifier = req.app_data::<web::Data<TokenVerifier>>().ok_or_else(|| {
        actix_web::error::ErrorInternalServerError("Token verifier not configured")
    })?;

    let claims = verifier
        .verify(token)
        .await
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    let user_id = claims
        .user_id()
        .map_err(actix_web::error::ErrorUnauthorized)?;
    let email = claims
        .user_email()
        .ok_or_else(|| actix_web::error::ErrorUnauthorized("No email in token claims"))?;

    let db = req
        .app_data::<web::Data<DatabaseConnection>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Database not configured"))?;

    find_or_create_from_auth(
        db.get_ref(),
        CreateUserFromAuth {
            id: user_id,
            email,
            display_name: claims.display_name(),
            avatar_url: claims.avatar_url(),
            auth_provider: claims.auth_provider(),
        },
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, %user_id, "failed to load user from token");
        actix_web::error::ErrorInternalServerError("Database error")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?.ok_or_else(|| {
                actix_web::error::ErrorUnauthorized("Missing Authorization header")
            })?;
            Ok(AuthenticatedUser(resolve_user(&req, &token).await?))
        })
    }
}

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            match bearer_token(&req)? {
                Some(token) => Ok(OptionalUser(Some(resolve_user(&req, &token).await?))),
                None => Ok(OptionalUser(None)),
            }
        })
    }
}
