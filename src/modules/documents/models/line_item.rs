// Line item shared by quotations and invoices.
//
// The submitted `amount` is what gets summed into the document subtotal.
// Depending on the configured `AmountPolicy` it is either checked against
// quantity × unit price or taken verbatim.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::settings::{AmountPolicy, DocumentSettings};
use crate::core::money::{display_amount, round_for_storage, STORED_SCALE};
use crate::core::validation::required_text;
use crate::core::{AppError, Result};

pub const DEFAULT_UNIT: &str = "item";

const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_UNIT_LEN: usize = 50;
pub const MAX_LINE_ITEMS: usize = 100;

fn max_quantity() -> Decimal {
    Decimal::from(999_999)
}

fn max_unit_price() -> Decimal {
    Decimal::from(9_999_999)
}

/// Largest amount a row may carry, whatever the policy
fn max_amount() -> Decimal {
    max_quantity() * max_unit_price()
}

/// Trailing zeros are ignored; the columns keep 6 fraction digits
fn check_scale(label: &str, value: Decimal) -> Result<()> {
    if value.normalize().scale() > STORED_SCALE {
        return Err(AppError::validation(format!(
            "{} cannot have more than {} decimal places",
            label, STORED_SCALE
        )));
    }
    Ok(())
}

/// A billable row of a quotation or invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit: String,
    pub unit_price: Decimal,
    /// Amount summed into the subtotal
    pub amount: Decimal,
}

/// Line item as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub description: String,
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: Option<String>,
    pub unit_price: Decimal,
    /// Omitted amounts are computed as quantity × unit price
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl LineItem {
    /// Validate a submitted row and turn it into a stored line item
    pub fn from_input(input: &LineItemInput, settings: &DocumentSettings) -> Result<Self> {
        let description = required_text("Description", &input.description, MAX_DESCRIPTION_LEN)?;
        let unit = match input.unit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_UNIT.to_string(),
            Some(unit) => required_text("Unit", unit, MAX_UNIT_LEN)?,
        };

        Self::validate_quantity(input.quantity)?;
        Self::validate_unit_price(input.unit_price)?;

        // Both are bounded above, so the product cannot overflow
        let expected = input.quantity * input.unit_price;
        let amount = match input.amount {
            None => round_for_storage(expected),
            Some(amount) => {
                if amount < Decimal::ZERO {
                    return Err(AppError::validation(format!(
                        "Amount must be non-negative, got: {}",
                        amount
                    )));
                }
                if amount > max_amount() {
                    return Err(AppError::validation(format!(
                        "Amount cannot exceed {}",
                        max_amount()
                    )));
                }
                check_scale("Amount", amount)?;
                if settings.amount_policy == AmountPolicy::Verify
                    && (amount - expected).abs() > settings.amount_tolerance
                {
                    return Err(AppError::validation(format!(
                        "Amount {} does not match quantity × unit price ({})",
                        amount, expected
                    )));
                }
                amount
            }
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            description,
            quantity: input.quantity,
            unit,
            unit_price: input.unit_price,
            amount,
        })
    }

    /// Quantity × unit price, independent of the stored amount
    pub fn expected_amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// Copy back into input form, e.g. to pre-fill an invoice from a quotation
    pub fn to_input(&self) -> LineItemInput {
        LineItemInput {
            description: self.description.clone(),
            quantity: self.quantity,
            unit: Some(self.unit.clone()),
            unit_price: self.unit_price,
            amount: Some(self.amount),
        }
    }

    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }
        if quantity > max_quantity() {
            return Err(AppError::validation(format!(
                "Quantity cannot exceed {}",
                max_quantity()
            )));
        }
        check_scale("Quantity", quantity)
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }
        if unit_price > max_unit_price() {
            return Err(AppError::validation(format!(
                "Unit price cannot exceed {}",
                max_unit_price()
            )));
        }
        check_scale("Unit price", unit_price)
    }
}

/// Validate a whole item list. A document needs between one and
/// `MAX_LINE_ITEMS` items; the first failing row is reported with its
/// 1-based position.
pub fn build_line_items(
    inputs: &[LineItemInput],
    settings: &DocumentSettings,
) -> Result<Vec<LineItem>> {
    if inputs.is_empty() {
        return Err(AppError::validation("At least one line item is required"));
    }
    if inputs.len() > MAX_LINE_ITEMS {
        return Err(AppError::validation(format!(
            "A document cannot have more than {} line items",
            MAX_LINE_ITEMS
        )));
    }

    inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| {
            LineItem::from_input(input, settings).map_err(|e| match e {
                AppError::Validation(msg) => {
                    AppError::validation(format!("Item {}: {}", idx + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

/// Line item as rendered in API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub id: String,
    pub description: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price: String,
    pub amount: String,
}

impl From<&LineItem> for LineItemResponse {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            description: item.description.clone(),
            quantity: item.quantity.normalize().to_string(),
            unit: item.unit.clone(),
            unit_price: display_amount(item.unit_price),
            amount: display_amount(item.amount),
        }
    }
}

impl FromStr for AmountPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verify" => Ok(AmountPolicy::Verify),
            "trust" => Ok(AmountPolicy::Trust),
            _ => Err(format!("Invalid item amount policy: {}", s)),
        }
    }
}
