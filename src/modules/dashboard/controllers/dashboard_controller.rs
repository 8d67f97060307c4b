use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Owner;
use crate::modules::dashboard::services::DashboardService;

/// GET /dashboard
pub async fn get_dashboard(
    service: web::Data<Arc<DashboardService>>,
    owner: Owner,
) -> Result<HttpResponse, AppError> {
    let stats = service.stats(&owner).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}
