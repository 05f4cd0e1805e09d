//! Immutable product lookup used for line-item autofill.

use std::collections::HashMap;
use std::sync::Arc;

use super::catalog_model::{Customer, Product};

/// Snapshot of the product catalog, indexed by product id.
///
/// Built once per catalog fetch and shared read-only by every ledger opened
/// against it.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductCatalog {
    /// Builds the lookup. When two products share an id, the later one wins.
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();
        Self { products, index }
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.index
            .get(product_id)
            .and_then(|&position| self.products.get(position))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Products and customers fetched together for one composing session.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub products: Arc<ProductCatalog>,
    pub customers: Vec<Customer>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>, customers: Vec<Customer>) -> Self {
        Self {
            products: Arc::new(ProductCatalog::new(products)),
            customers,
        }
    }

    pub fn customer(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == customer_id)
    }
}
