use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Quotation status lifecycle
///
/// ```text
/// draft ──► sent ──► accepted
///   │         └────► rejected
///   ├──────────────► accepted
///   └──────────────► rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, QuotationStatus::Accepted | QuotationStatus::Rejected)
    }

    pub fn can_transition_to(&self, target: QuotationStatus) -> bool {
        use QuotationStatus::*;

        matches!(
            (self, target),
            (Draft, Sent) | (Draft, Accepted) | (Draft, Rejected) | (Sent, Accepted) | (Sent, Rejected)
        )
    }

    /// Resolve a requested status change. Writing the current status is a no-op.
    pub fn transition(self, target: QuotationStatus) -> Result<QuotationStatus> {
        if self == target || self.can_transition_to(target) {
            return Ok(target);
        }

        Err(AppError::validation(format!(
            "Cannot change quotation status from {} to {}",
            self, target
        )))
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(QuotationStatus::Draft),
            "sent" => Ok(QuotationStatus::Sent),
            "accepted" => Ok(QuotationStatus::Accepted),
            "rejected" => Ok(QuotationStatus::Rejected),
            _ => Err(format!("Invalid quotation status: {}", s)),
        }
    }
}

impl TryFrom<String> for QuotationStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}
