//! ThaiBill: quotation and invoice engine for Thai small businesses
//!
//! Customers, quotations and invoices with VAT and withholding tax, scoped
//! per owner and served as a JSON API.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod startup;

// Re-export commonly used types
pub use modules::customers;
pub use modules::invoices;
pub use modules::quotations;
pub use modules::taxes;
pub use startup::{AppState, Repositories};
