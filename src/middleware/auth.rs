//! Caller identity
//!
//! `ApiKeyAuth` resolves the `X-API-Key` header into an [`Identity`] and
//! stores it in the request extensions. Handlers never look at the
//! identity directly: they take an [`Owner`], which applies the configured
//! [`AccessPolicy`] before any data access.

use crate::core::{AccessPolicy, AppError, Identity, Owner};
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Maps a presented credential to the identity it belongs to
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// `None` when the key is unknown or revoked
    async fn resolve(&self, api_key: &str) -> crate::core::Result<Option<Identity>>;
}

/// SHA-256 hex digest stored in `api_keys.key_hash`
pub fn hash_api_key(api_key: &str) -> String {
    hex::encode(Sha256::digest(api_key.as_bytes()))
}

/// Looks keys up in the `api_keys` table
pub struct MySqlApiKeyResolver {
    pool: MySqlPool,
}

impl MySqlApiKeyResolver {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityResolver for MySqlApiKeyResolver {
    async fn resolve(&self, api_key: &str) -> crate::core::Result<Option<Identity>> {
        let owner_id: Option<String> = sqlx::query_scalar(
            r#"
            SELECT owner_id
            FROM api_keys
            WHERE key_hash = ? AND is_active = TRUE
            LIMIT 1
            "#,
        )
        .bind(hash_api_key(api_key))
        .fetch_optional(&self.pool)
        .await?;

        owner_id.map(Identity::new).transpose()
    }
}

/// API Key authentication middleware
///
/// A missing header is not an error here; the [`Owner`] extractor decides
/// according to the access policy. A header that does not resolve is.
pub struct ApiKeyAuth {
    resolver: Arc<dyn IdentityResolver>,
}

impl ApiKeyAuth {
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            resolver: self.resolver.clone(),
        }))
    }
}

pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    resolver: Arc<dyn IdentityResolver>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let resolver = self.resolver.clone();

        Box::pin(async move {
            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|h| h.to_str().ok())
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty());

            if let Some(api_key) = api_key {
                let identity = resolver
                    .resolve(&api_key)
                    .await
                    .map_err(Error::from)?
                    .ok_or_else(|| Error::from(AppError::unauthorized("Invalid API key")))?;

                req.extensions_mut().insert(identity);
            }

            svc.call(req).await
        })
    }
}

impl FromRequest for Owner {
    type Error = AppError;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let policy = req
            .app_data::<web::Data<AccessPolicy>>()
            .map(|policy| *policy.get_ref())
            .unwrap_or_default();
        let identity = req.extensions().get::<Identity>().cloned();

        ready(policy.scope(identity))
    }
}
