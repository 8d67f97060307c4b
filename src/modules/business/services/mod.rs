pub mod business_service;

pub use business_service::BusinessService;
