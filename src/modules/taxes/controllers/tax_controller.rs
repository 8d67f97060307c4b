//! Tax reference endpoints
//!
//! Static data only; rates applied to documents are validated by
//! `TaxCalculator::validate_rate`.

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::taxes::models::WITHHOLDING_RATE_PRESETS;

/// List the common withholding tax rates
///
/// GET /taxes/withholding-rates
pub async fn list_withholding_rates() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "rates": WITHHOLDING_RATE_PRESETS,
    })))
}

/// Configure tax routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taxes").route("/withholding-rates", web::get().to(list_withholding_rates)),
    );
}
