use chrono::NaiveDate;

use crate::core::validation::optional_text;
use crate::core::{AppError, Result};

pub const MAX_NOTES_LEN: usize = 1000;

/// Outcome of a document mutation applied inside the store's critical section
#[derive(Debug, Clone)]
pub struct Revision<T> {
    pub document: T,
    /// Whether the line items must be deleted and re-inserted
    pub items_replaced: bool,
}

impl<T> Revision<T> {
    pub fn new(document: T, items_replaced: bool) -> Self {
        Self {
            document,
            items_replaced,
        }
    }
}

/// Pure change applied to a locked document. Runs synchronously while the
/// store holds the per-document lock, so it must not perform I/O.
pub type Mutation<T> = Box<dyn FnOnce(T) -> Result<Revision<T>> + Send>;

/// A closing date (`validUntil`, `dueDate`) may not precede the issue date
pub fn check_date_order(issue_date: NaiveDate, closing: NaiveDate, label: &str) -> Result<()> {
    if closing < issue_date {
        return Err(AppError::validation(format!(
            "{} ({}) cannot be earlier than the issue date ({})",
            label, closing, issue_date
        )));
    }
    Ok(())
}

/// Free-text notes; blank input clears them
pub fn normalize_notes(notes: Option<&str>) -> Result<Option<String>> {
    optional_text("Notes", notes, MAX_NOTES_LEN)
}
