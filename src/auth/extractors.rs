use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated user's ID from request extensions.
///
/// Intended for routes behind [`AuthMiddleware`](crate::auth::AuthMiddleware),
/// which validates the bearer token and inserts the decoded [`Claims`] into
/// the request extensions. If no claims are present the extractor answers
/// 401, so a route that takes this parameter can never run unauthenticated.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims.sub))),
            None => {
                let err = AppError::Unauthorized("Missing authentication token".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
