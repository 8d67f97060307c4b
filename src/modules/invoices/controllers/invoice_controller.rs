use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Owner;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, InvoiceFilter, InvoiceStatusRequest, UpdateInvoiceRequest,
};
use crate::modules::invoices::services::InvoiceService;

/// Create an invoice, optionally from an accepted quotation (`quotationId`)
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.create(&owner, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(invoice))
}

/// List invoices; `status=overdue` selects unpaid invoices past due
/// GET /invoices?status=&customerId=
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    query: web::Query<InvoiceFilter>,
) -> Result<HttpResponse, AppError> {
    let invoices = service.list(&owner, &query).await?;
    Ok(HttpResponse::Ok().json(invoices))
}

/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get(&owner, &path).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// PUT /invoices/{id}
pub async fn update_invoice(
    service: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    path: web::Path<String>,
    request: web::Json<UpdateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.update(&owner, &path, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// POST /invoices/{id}/status
pub async fn change_invoice_status(
    service: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    path: web::Path<String>,
    request: web::Json<InvoiceStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let InvoiceStatusRequest { status, paid_date } = request.into_inner();
    let invoice = service.change_status(&owner, &path, status, paid_date).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    service: web::Data<Arc<InvoiceService>>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&owner, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Invoice deleted"
    })))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}", web::put().to(update_invoice))
            .route("/{id}", web::delete().to(delete_invoice))
            .route("/{id}/status", web::post().to(change_invoice_status)),
    );
}
