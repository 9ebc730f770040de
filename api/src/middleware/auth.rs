//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware hands the raw `Authorization` header to the shared
//! [`TokenVerifier`], which extracts the bearer token, consults the
//! revocation denylist, checks the signature and claims, and enforces
//! expiry. Admitted requests carry an [`AuthContext`] in their extensions;
//! rejected ones are answered directly with the JSON error envelope.
//!
//! Any service that needs the same gatekeeping wraps its protected
//! resources with `JwtAuth::new(verifier)`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tf_core::{domain::entities::token::VerifiedToken, errors::TokenError, services::TokenVerifier};
use uuid::Uuid;

use crate::handlers::error::ApiError;

/// Authenticated principal injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Principal ID from the `sub` claim
    pub user_id: Uuid,
    /// Role label from the `role` claim
    pub role: String,
    /// The raw token, needed by logout to revoke it
    pub token: String,
}

impl From<VerifiedToken> for AuthContext {
    fn from(verified: VerifiedToken) -> Self {
        Self {
            user_id: verified.user_id,
            role: verified.role,
            token: verified.token,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<TokenVerifier>,
}

impl JwtAuth {
    /// Creates a new JWT authentication middleware around a shared verifier
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let outcome = match authorization_header(&req) {
                Ok(header) => verifier.verify_header(header).await,
                Err(error) => Err(error),
            };

            match outcome {
                Ok(verified) => {
                    req.extensions_mut().insert(AuthContext::from(verified));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    let response = ApiError::Token(error).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Raw Authorization header; a value that is not visible ASCII cannot
/// hold a token.
fn authorization_header(req: &ServiceRequest) -> Result<Option<&str>, TokenError> {
    match req.headers().get(AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| TokenError::InvalidToken {
            reason: "Authorization header is not valid ASCII".to_string(),
        }),
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or(ApiError::Token(TokenError::MissingCredential));

        ready(result)
    }
}
