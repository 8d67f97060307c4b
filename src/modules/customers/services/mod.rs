pub mod customer_service;

pub use customer_service::{load_customers, require_customer, CustomerService};
