//! Ledger domain models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque identity of a row inside one ledger.
///
/// Only meaningful to the ledger that issued it and never submitted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(u64);

impl RowHandle {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    ProductId,
    Name,
    Description,
    Quantity,
    Price,
}

/// One product/service line of a draft.
///
/// `total` and `tax` are derived; the ledger recomputes them after every edit.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    pub(crate) handle: RowHandle,
    pub product_id: Option<String>,
    pub name: String,
    pub description: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl LineItemRow {
    pub(crate) fn blank(handle: RowHandle) -> Self {
        Self {
            handle,
            product_id: None,
            name: String::new(),
            description: String::new(),
            quantity: Decimal::ONE,
            price: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn handle(&self) -> RowHandle {
        self.handle
    }

    pub(crate) fn recompute(&mut self, tax_rate: Decimal) {
        self.total = match self.quantity.checked_mul(self.price) {
            Some(total) => total,
            None => {
                log::warn!(
                    "Line total overflow for {} (quantity {}, price {}). Falling back to ZERO.",
                    self.handle,
                    self.quantity,
                    self.price
                );
                Decimal::ZERO
            }
        };
        self.tax = self.total.checked_mul(tax_rate).unwrap_or(Decimal::ZERO);
    }
}

/// Aggregates of a ledger, always computed from the current rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

/// Parses a quantity or price typed by the user.
///
/// Anything that is not a non-negative number (blank input, garbage, a minus
/// sign) becomes zero instead of an error.
pub fn parse_amount_lenient(value_str: &str, field_name: &str) -> Decimal {
    let trimmed = value_str.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    match parsed {
        Ok(d) if d.is_sign_negative() => {
            log::debug!("Negative {} '{}' coerced to ZERO", field_name, value_str);
            Decimal::ZERO
        }
        Ok(d) => d,
        Err(e) => {
            log::debug!(
                "Failed to parse {} '{}' ({}). Falling back to ZERO.",
                field_name,
                value_str,
                e
            );
            Decimal::ZERO
        }
    }
}
