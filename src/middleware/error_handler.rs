//! Extractor error mapping
//!
//! Malformed bodies and query strings are caller mistakes and use the same
//! error envelope as every other validation failure.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, Error, HttpRequest,
};

use crate::core::AppError;

fn json_error_message(err: &JsonPayloadError) -> String {
    match err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
        other => format!("Invalid request body: {}", other),
    }
}

/// Error handler for `web::Json` extraction
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
    AppError::validation(json_error_message(&err)).into()
}

/// Error handler for `web::Query` extraction
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected query string");
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

/// Extractor configuration shared by the application and the test servers
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));
}
