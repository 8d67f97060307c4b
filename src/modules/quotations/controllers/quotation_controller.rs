use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Owner;
use crate::modules::invoices::models::CreateInvoiceRequest;
use crate::modules::invoices::services::InvoiceService;
use crate::modules::quotations::models::{
    CreateQuotationRequest, QuotationFilter, QuotationStatusRequest, UpdateQuotationRequest,
};
use crate::modules::quotations::services::QuotationService;

/// Create a quotation
/// POST /quotations
pub async fn create_quotation(
    service: web::Data<Arc<QuotationService>>,
    owner: Owner,
    request: web::Json<CreateQuotationRequest>,
) -> Result<HttpResponse, AppError> {
    let quotation = service.create(&owner, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(quotation))
}

/// List quotations, optionally by status and customer
/// GET /quotations?status=&customerId=
pub async fn list_quotations(
    service: web::Data<Arc<QuotationService>>,
    owner: Owner,
    query: web::Query<QuotationFilter>,
) -> Result<HttpResponse, AppError> {
    let quotations = service.list(&owner, &query).await?;
    Ok(HttpResponse::Ok().json(quotations))
}

/// GET /quotations/{id}
pub async fn get_quotation(
    service: web::Data<Arc<QuotationService>>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quotation = service.get(&owner, &path).await?;
    Ok(HttpResponse::Ok().json(quotation))
}

/// Partial update; items, when present, replace the stored ones
/// PUT /quotations/{id}
pub async fn update_quotation(
    service: web::Data<Arc<QuotationService>>,
    owner: Owner,
    path: web::Path<String>,
    request: web::Json<UpdateQuotationRequest>,
) -> Result<HttpResponse, AppError> {
    let quotation = service.update(&owner, &path, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quotation))
}

/// POST /quotations/{id}/status
pub async fn change_quotation_status(
    service: web::Data<Arc<QuotationService>>,
    owner: Owner,
    path: web::Path<String>,
    request: web::Json<QuotationStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let quotation = service.change_status(&owner, &path, request.status).await?;
    Ok(HttpResponse::Ok().json(quotation))
}

/// Invoice an accepted quotation. The body may override dates, rates and
/// notes; everything else is taken from the quotation.
/// POST /quotations/{id}/invoice
pub async fn invoice_quotation(
    invoices: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    path: web::Path<String>,
    request: Option<web::Json<CreateInvoiceRequest>>,
) -> Result<HttpResponse, AppError> {
    let mut request = request.map(web::Json::into_inner).unwrap_or_default();
    request.quotation_id = Some(path.into_inner());

    let invoice = invoices.create(&owner, request).await?;
    Ok(HttpResponse::Created().json(invoice))
}

/// DELETE /quotations/{id}
pub async fn delete_quotation(
    service: web::Data<Arc<QuotationService>>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&owner, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Quotation deleted"
    })))
}

/// Configure quotation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quotations")
            .route("", web::post().to(create_quotation))
            .route("", web::get().to(list_quotations))
            .route("/{id}", web::get().to(get_quotation))
            .route("/{id}", web::put().to(update_quotation))
            .route("/{id}", web::delete().to(delete_quotation))
            .route("/{id}/status", web::post().to(change_quotation_status))
            .route("/{id}/invoice", web::post().to(invoice_quotation)),
    );
}
