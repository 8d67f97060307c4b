// Pieces shared by quotations and invoices: line items, amount policy,
// mutation plumbing and item persistence.

pub mod models;
pub mod repositories;

pub use models::{
    build_line_items, check_date_order, normalize_notes, AmountPolicy, DocumentSettings,
    DocumentSummaryResponse, LineItem, LineItemInput, LineItemResponse, Mutation, Revision,
};
