use crate::catalog::catalog_model::{Customer, Product};
use crate::errors::Result;
use async_trait::async_trait;

/// Read collaborator for catalog reference data.
///
/// Implemented outside the core (REST client, storage adapter). Failures are
/// returned as-is to the caller.
#[async_trait]
pub trait CatalogReaderTrait: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn list_customers(&self) -> Result<Vec<Customer>>;
}
