use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::{BusinessCalendar, Owner, Result};
use crate::modules::numbering::models::{format_document_number, DocumentKind};
use crate::modules::numbering::repositories::SequenceRepository;

/// Issues document numbers. The calendar year is the Bangkok year of `now`.
pub struct NumberingService {
    sequences: Arc<dyn SequenceRepository>,
}

impl NumberingService {
    pub fn new(sequences: Arc<dyn SequenceRepository>) -> Self {
        Self { sequences }
    }

    pub async fn next_number(
        &self,
        kind: DocumentKind,
        owner: &Owner,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let year = BusinessCalendar::year(now);
        let sequence = self
            .sequences
            .next_value(owner, kind, year, BusinessCalendar::start_of_year(now))
            .await?;

        let number = format_document_number(kind.prefix(), year, sequence);
        tracing::debug!(%owner, kind = %kind, number = %number, "Document number reserved");

        Ok(number)
    }
}
