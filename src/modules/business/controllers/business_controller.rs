use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Owner;
use crate::modules::business::models::UpsertBusinessProfileRequest;
use crate::modules::business::services::BusinessService;

/// Profile of the caller, or `null`
/// GET /business
pub async fn get_business(
    service: web::Data<Arc<BusinessService>>,
    owner: Owner,
) -> Result<HttpResponse, AppError> {
    let profile = service.get(&owner).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /business
pub async fn upsert_business(
    service: web::Data<Arc<BusinessService>>,
    owner: Owner,
    request: web::Json<UpsertBusinessProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = service.upsert(&owner, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Configure business profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/business")
            .route(web::get().to(get_business))
            .route(web::put().to(upsert_business)),
    );
}
