// Document numbering: `{PREFIX}-{year}-{0001}` per owner and calendar year.

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{format_document_number, DocumentKind};
pub use repositories::{MySqlSequenceRepository, SequenceRepository};
pub use services::NumberingService;
