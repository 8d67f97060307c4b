mod line_item;
mod revision;
mod settings;
mod summary;

pub use line_item::{build_line_items, LineItem, LineItemInput, LineItemResponse, DEFAULT_UNIT};
pub use revision::{check_date_order, normalize_notes, Mutation, Revision, MAX_NOTES_LEN};
pub use settings::{AmountPolicy, DocumentSettings};
pub use summary::DocumentSummaryResponse;
