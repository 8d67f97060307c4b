// Customer registry, scoped per owner.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::Customer;
pub use repositories::{CustomerEdit, CustomerRepository, MySqlCustomerRepository};
pub use services::CustomerService;
