use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::{Either, LocalBoxFuture};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::future::{ready, Ready};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::core::AppError;

type DirectLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Global request quota shared by every worker
#[derive(Clone)]
struct QuotaGate {
    limiter: Arc<DirectLimiter>,
    per_minute: u32,
}

impl QuotaGate {
    fn admits(&self, path: &str) -> bool {
        // Probes must keep answering under load
        matches!(path, "/health" | "/ready") || self.limiter.check().is_ok()
    }

    fn rejection(&self) -> AppError {
        AppError::RateLimitExceeded(format!("Maximum {} requests per minute", self.per_minute))
    }
}

/// Request quota middleware backed by governor. Build once and clone into
/// each worker so all workers draw from the same bucket.
#[derive(Clone)]
pub struct RateLimiter {
    gate: QuotaGate,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> std::result::Result<Self, AppError> {
        let per_minute = NonZeroU32::new(requests_per_minute).ok_or_else(|| {
            AppError::Configuration("Rate limit must be greater than 0".to_string())
        })?;

        Ok(Self {
            gate: QuotaGate {
                limiter: Arc::new(GovernorRateLimiter::direct(Quota::per_minute(per_minute))),
                per_minute: requests_per_minute,
            },
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service,
            gate: self.gate.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: S,
    gate: QuotaGate,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<BoxBody, B>>;
    type Error = Error;
    type Future = Either<
        LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>,
        Ready<std::result::Result<Self::Response, Self::Error>>,
    >;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.gate.admits(req.path()) {
            let fut = self.service.call(req);
            return Either::Left(Box::pin(async move {
                fut.await.map(ServiceResponse::map_into_right_body)
            }));
        }

        tracing::warn!(
            path = %req.path(),
            limit = self.gate.per_minute,
            "Request quota exhausted"
        );
        let response = self.gate.rejection().error_response();
        Either::Right(ready(Ok(req.into_response(response).map_into_left_body())))
    }
}
