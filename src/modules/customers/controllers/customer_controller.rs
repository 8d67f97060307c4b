use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Owner;
use crate::modules::customers::models::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::modules::customers::services::CustomerService;

/// POST /customers
pub async fn create_customer(
    service: web::Data<Arc<CustomerService>>,
    owner: Owner,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = service.create(&owner, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(customer))
}

/// GET /customers
pub async fn list_customers(
    service: web::Data<Arc<CustomerService>>,
    owner: Owner,
) -> Result<HttpResponse, AppError> {
    let customers = service.list(&owner).await?;
    Ok(HttpResponse::Ok().json(customers))
}

/// GET /customers/{id}
pub async fn get_customer(
    service: web::Data<Arc<CustomerService>>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let customer = service.get(&owner, &path).await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// Partial update
/// PUT /customers/{id}
pub async fn update_customer(
    service: web::Data<Arc<CustomerService>>,
    owner: Owner,
    path: web::Path<String>,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = service.update(&owner, &path, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    service: web::Data<Arc<CustomerService>>,
    owner: Owner,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete(&owner, &path).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Customer deleted"
    })))
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::get().to(list_customers))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::put().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
