// Invoice lifecycle: billing documents, unpaid → paid/cancelled, with a
// derived overdue status.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Invoice, InvoiceStatus};
pub use repositories::{InvoiceRepository, MySqlInvoiceRepository};
pub use services::InvoiceService;
