use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Authorization gate for protected routes.
///
/// Wrap this around a scope to require a valid bearer token on every request
/// in it. The token is taken from the `Authorization: Bearer <token>` header
/// and checked by the shared [`TokenService`]; on success the decoded claims
/// are inserted into the request extensions for handlers to pick up. On any
/// failure the gate answers 401 itself and the request never reaches a
/// handler.
///
/// The gate reads nothing but the header and writes nothing but the request
/// extensions.
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S> AuthMiddlewareService<S> {
    /// Short-circuits the request with the error's own response.
    fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
        log::debug!("rejected request to {}: {}", req.path(), err);
        let response = err.error_response();
        req.into_response(response).map_into_right_body()
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // A header without the Bearer prefix is treated the same as no
        // header at all.
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) => match self.tokens.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(async move {
                        let res = fut.await?;
                        Ok(res.map_into_left_body())
                    })
                }
                Err(app_err) => {
                    let res = Self::reject(req, app_err);
                    Box::pin(async move { Ok(res) })
                }
            },
            None => {
                let res = Self::reject(
                    req,
                    AppError::Unauthorized("Missing authentication token".into()),
                );
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
