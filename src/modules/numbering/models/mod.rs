mod document_number;

pub use document_number::{format_document_number, DocumentKind, SEQUENCE_WIDTH};
