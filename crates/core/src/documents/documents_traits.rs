use super::documents_model::{DocumentDraft, NewDocument, SubmittedDocument};
use crate::catalog::CatalogSnapshot;
use crate::errors::Result;
use async_trait::async_trait;

/// Write collaborator receiving assembled documents.
#[async_trait]
pub trait DocumentWriterTrait: Send + Sync {
    async fn create_document(&self, document: NewDocument) -> Result<SubmittedDocument>;
}

/// Trait for document service operations
#[async_trait]
pub trait DocumentServiceTrait: Send + Sync {
    /// Fetches products and customers for a composing session.
    async fn load_catalog(&self) -> Result<CatalogSnapshot>;

    /// Opens an empty draft whose rows autofill from `catalog`.
    fn new_draft(&self, catalog: &CatalogSnapshot) -> DocumentDraft;

    /// Validates, assembles and hands the draft to the writer. The draft is
    /// left untouched so the caller can keep editing after a failure.
    async fn submit(&self, draft: &DocumentDraft) -> Result<SubmittedDocument>;
}
