//! Document domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{LedgerTotals, LineItemLedger, LineItemRow};

/// A document being composed: selected customer plus its line items.
///
/// Lives only for the composing session; nothing is saved until submission.
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    customer_id: Option<String>,
    notes: Option<String>,
    terms: Option<String>,
    ledger: LineItemLedger,
}

impl DocumentDraft {
    pub fn new(ledger: LineItemLedger) -> Self {
        Self {
            customer_id: None,
            notes: None,
            terms: None,
            ledger,
        }
    }

    /// Selects the customer. A blank id clears the selection.
    pub fn select_customer(&mut self, customer_id: &str) {
        let trimmed = customer_id.trim();
        self.customer_id = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn clear_customer(&mut self) {
        self.customer_id = None;
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_terms(&mut self, terms: Option<String>) {
        self.terms = terms;
    }

    pub fn terms(&self) -> Option<&str> {
        self.terms.as_deref()
    }

    pub fn ledger(&self) -> &LineItemLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut LineItemLedger {
        &mut self.ledger
    }

    pub fn totals(&self) -> LedgerTotals {
        self.ledger.aggregates()
    }
}

/// One submitted line, without the ledger's row handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocumentItem {
    /// `None` when the row never resolved to a catalog product.
    pub item_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl From<&LineItemRow> for NewDocumentItem {
    fn from(row: &LineItemRow) -> Self {
        Self {
            item_id: row.product_id.clone(),
            name: row.name.clone(),
            description: (!row.description.is_empty()).then(|| row.description.clone()),
            quantity: row.quantity,
            price: row.price,
            tax: row.tax,
            total: row.total,
        }
    }
}

/// Immutable submission payload handed to the document writer.
///
/// Field names on the wire follow the invoice endpoint of the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub customer_id: String,
    #[serde(rename = "invoice_number")]
    pub document_number: String,
    #[serde(rename = "invoice_date")]
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub items: Vec<NewDocumentItem>,
}

/// What the writer reports back after storing a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedDocument {
    pub id: String,
    #[serde(rename = "invoice_number")]
    pub document_number: String,
}
