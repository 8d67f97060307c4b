use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Invoice status lifecycle
///
/// Stored statuses are `unpaid`, `paid` and `cancelled`. `overdue` is only
/// ever derived at read time from an unpaid invoice past its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    /// Display only; never persisted
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Status shown to callers: unpaid past the due date reads as overdue
    pub fn display(stored: InvoiceStatus, due_date: NaiveDate, today: NaiveDate) -> InvoiceStatus {
        if stored == InvoiceStatus::Unpaid && due_date < today {
            InvoiceStatus::Overdue
        } else {
            stored
        }
    }

    pub fn can_transition_to(&self, target: InvoiceStatus) -> bool {
        use InvoiceStatus::*;

        matches!(
            (self, target),
            (Unpaid, Paid) | (Unpaid, Cancelled) | (Paid, Unpaid)
        )
    }

    /// Resolve a requested status change of a stored status
    pub fn transition(self, target: InvoiceStatus) -> Result<InvoiceStatus> {
        if target == InvoiceStatus::Overdue {
            return Err(AppError::validation(
                "Overdue is derived from the due date and cannot be set",
            ));
        }

        if self == target || self.can_transition_to(target) {
            return Ok(target);
        }

        Err(AppError::validation(format!(
            "Cannot change invoice status from {} to {}",
            self, target
        )))
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(InvoiceStatus::Unpaid),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

impl TryFrom<String> for InvoiceStatus {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}
