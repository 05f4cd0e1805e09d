use std::sync::Arc;

use rust_decimal::Decimal;

use super::ledger_model::{parse_amount_lenient, LedgerTotals, LineItemRow, RowField, RowHandle};
use crate::catalog::ProductCatalog;
use crate::constants::DEFAULT_TAX_RATE;

/// Ordered, editable rows of one document draft.
///
/// Every mutation leaves each row consistent (`total = quantity * price`,
/// `tax = total * tax_rate`). Aggregates are never cached.
#[derive(Debug, Clone)]
pub struct LineItemLedger {
    catalog: Arc<ProductCatalog>,
    tax_rate: Decimal,
    rows: Vec<LineItemRow>,
    next_handle: u64,
}

impl LineItemLedger {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self::with_tax_rate(catalog, DEFAULT_TAX_RATE)
    }

    pub fn with_tax_rate(catalog: Arc<ProductCatalog>, tax_rate: Decimal) -> Self {
        Self {
            catalog,
            tax_rate,
            rows: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Appends a blank row (quantity 1, price 0) and returns its handle.
    pub fn add_row(&mut self) -> RowHandle {
        let handle = RowHandle::new(self.next_handle);
        self.next_handle += 1;
        self.rows.push(LineItemRow::blank(handle));
        handle
    }

    /// Removes the row if present. Returns whether a row was removed.
    pub fn remove_row(&mut self, handle: RowHandle) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.handle != handle);
        before != self.rows.len()
    }

    /// Sets one field of a row from its textual value and recomputes the row.
    ///
    /// Selecting a product that exists in the catalog overwrites the row's
    /// name, price and description with the catalog entry. An unknown handle
    /// is ignored and yields `None`.
    pub fn update_field(
        &mut self,
        handle: RowHandle,
        field: RowField,
        value: &str,
    ) -> Option<&LineItemRow> {
        let catalog = Arc::clone(&self.catalog);
        let tax_rate = self.tax_rate;
        let row = self.rows.iter_mut().find(|row| row.handle == handle)?;

        match field {
            RowField::ProductId => {
                let product_id = value.trim();
                if product_id.is_empty() {
                    row.product_id = None;
                } else {
                    row.product_id = Some(product_id.to_string());
                    match catalog.get(product_id) {
                        Some(product) => {
                            row.name = product.name.clone();
                            row.price = product.price;
                            row.description = product.description.clone().unwrap_or_default();
                        }
                        None => {
                            log::debug!("Product '{}' not found in catalog, no autofill", product_id)
                        }
                    }
                }
            }
            RowField::Name => row.name = value.to_string(),
            RowField::Description => row.description = value.to_string(),
            RowField::Quantity => row.quantity = parse_amount_lenient(value, "quantity"),
            RowField::Price => row.price = parse_amount_lenient(value, "price"),
        }

        row.recompute(tax_rate);
        Some(&*row)
    }

    /// Sums over the current rows.
    ///
    /// If a sum overflows `Decimal`, all three totals fall back to zero so that
    /// `grand_total = subtotal + tax_total` still holds.
    pub fn aggregates(&self) -> LedgerTotals {
        self.checked_aggregates().unwrap_or_else(|| {
            log::warn!(
                "Ledger totals overflow over {} rows. Falling back to ZERO.",
                self.rows.len()
            );
            LedgerTotals::default()
        })
    }

    fn checked_aggregates(&self) -> Option<LedgerTotals> {
        let mut subtotal = Decimal::ZERO;
        let mut tax_total = Decimal::ZERO;
        for row in &self.rows {
            subtotal = subtotal.checked_add(row.total)?;
            tax_total = tax_total.checked_add(row.tax)?;
        }
        Some(LedgerTotals {
            subtotal,
            tax_total,
            grand_total: subtotal.checked_add(tax_total)?,
        })
    }

    pub fn rows(&self) -> &[LineItemRow] {
        &self.rows
    }

    pub fn row(&self, handle: RowHandle) -> Option<&LineItemRow> {
        self.rows.iter().find(|row| row.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discards every row. Handles already issued are not reused.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
