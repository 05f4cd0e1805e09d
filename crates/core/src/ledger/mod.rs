//! Ledger module - editable line items and their monetary totals.

mod ledger_model;
mod line_item_ledger;


pub use ledger_model::{parse_amount_lenient, LedgerTotals, LineItemRow, RowField, RowHandle};
pub use line_item_ledger::LineItemLedger;
