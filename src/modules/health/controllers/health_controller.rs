use std::sync::Arc;
use std::time::Instant;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::timezone::format_iso8601;
use crate::modules::health::probe::StorageProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeState {
    Up,
    Down,
}

/// Liveness body: the process answers, nothing else is checked
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub service: String,
    pub version: String,
    pub state: ProbeState,
    pub checked_at: String,
}

/// Readiness body: the process answers and storage is reachable
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub storage: ProbeState,
    pub storage_latency_ms: u64,
    pub checked_at: String,
}

/// GET /health
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(LivenessResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        state: ProbeState::Up,
        checked_at: format_iso8601(Utc::now()),
    })
}

/// GET /ready
///
/// 503 while the store cannot be reached, so a load balancer keeps the
/// instance out of rotation.
pub async fn readiness(probe: web::Data<Arc<dyn StorageProbe>>) -> HttpResponse {
    let started = Instant::now();
    let storage = match probe.ping().await {
        Ok(()) => ProbeState::Up,
        Err(e) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            ProbeState::Down
        }
    };

    let response = ReadinessResponse {
        ready: storage == ProbeState::Up,
        storage,
        storage_latency_ms: started.elapsed().as_millis() as u64,
        checked_at: format_iso8601(Utc::now()),
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure probe routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(liveness))
        .route("/ready", web::get().to(readiness));
}
