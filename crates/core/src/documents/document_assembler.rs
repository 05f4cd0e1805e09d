//! Validation and payload assembly for document drafts.

use chrono::{DateTime, Duration, Utc};

use super::documents_model::{DocumentDraft, NewDocument, NewDocumentItem};
use crate::constants::{DOCUMENT_NUMBER_DIGITS, DOCUMENT_STATUS_DRAFT};
use crate::errors::{Error, Result, ValidationError};
use crate::settings::CoreSettings;

/// Builds a document number from the trailing digits of `now` in Unix
/// milliseconds. Unique within a session, not globally.
pub fn generate_document_number(prefix: &str, now: DateTime<Utc>) -> String {
    let modulus = 10_i64.pow(DOCUMENT_NUMBER_DIGITS as u32);
    format!(
        "{}{:0width$}",
        prefix,
        now.timestamp_millis().rem_euclid(modulus),
        width = DOCUMENT_NUMBER_DIGITS
    )
}

/// Gates a draft and shapes it into a [`NewDocument`].
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    settings: CoreSettings,
}

impl DocumentAssembler {
    pub fn new(settings: CoreSettings) -> Self {
        Self { settings }
    }

    /// Customer is checked before line items.
    pub fn validate(&self, draft: &DocumentDraft) -> std::result::Result<(), ValidationError> {
        if draft.customer_id().is_none() {
            return Err(ValidationError::MissingCustomer);
        }
        if draft.ledger().is_empty() {
            return Err(ValidationError::EmptyLineItems);
        }
        Ok(())
    }

    pub fn assemble(&self, draft: &DocumentDraft) -> Result<NewDocument> {
        self.assemble_at(draft, Utc::now())
    }

    pub fn assemble_at(&self, draft: &DocumentDraft, now: DateTime<Utc>) -> Result<NewDocument> {
        self.validate(draft)?;

        let customer_id = draft
            .customer_id()
            .ok_or(ValidationError::MissingCustomer)?
            .to_string();
        let totals = draft.totals();
        let issue_date = now.date_naive();
        let due_date = Duration::try_days(self.settings.due_days)
            .and_then(|offset| issue_date.checked_add_signed(offset))
            .ok_or_else(|| {
                Error::Settings(format!(
                    "due_days {} puts the due date out of range",
                    self.settings.due_days
                ))
            })?;

        Ok(NewDocument {
            customer_id,
            document_number: generate_document_number(
                &self.settings.document_number_prefix,
                now,
            ),
            issue_date,
            due_date,
            status: DOCUMENT_STATUS_DRAFT.to_string(),
            subtotal: totals.subtotal,
            tax: totals.tax_total,
            total: totals.grand_total,
            notes: draft.notes().map(str::to_string),
            terms: draft.terms().map(str::to_string),
            items: draft
                .ledger()
                .rows()
                .iter()
                .map(NewDocumentItem::from)
                .collect(),
        })
    }
}
