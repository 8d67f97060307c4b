use std::fmt;

/// Minimum digits of the sequence part; larger values simply grow wider
pub const SEQUENCE_WIDTH: usize = 4;

/// Document families that draw numbers from independent sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Quotation,
    Invoice,
}

impl DocumentKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "QT",
            DocumentKind::Invoice => "INV",
        }
    }

    /// Value of the `kind` column in `document_sequences`
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotation",
            DocumentKind::Invoice => "invoice",
        }
    }

    /// Table holding the documents of this kind
    pub fn table(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotations",
            DocumentKind::Invoice => "invoices",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a document number, e.g. `INV-2024-0007`
pub fn format_document_number(prefix: &str, year: i32, sequence: u32) -> String {
    format!(
        "{}-{}-{:0width$}",
        prefix,
        year,
        sequence,
        width = SEQUENCE_WIDTH
    )
}
