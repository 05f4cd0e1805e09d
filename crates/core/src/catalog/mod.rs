//! Catalog module - read-only product and customer reference data.

mod catalog_model;
mod catalog_traits;
mod product_catalog;

pub use catalog_model::{Customer, Product};
pub use catalog_traits::CatalogReaderTrait;
pub use product_catalog::{CatalogSnapshot, ProductCatalog};
