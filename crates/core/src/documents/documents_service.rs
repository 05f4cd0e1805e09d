use super::document_assembler::DocumentAssembler;
use super::documents_model::{DocumentDraft, SubmittedDocument};
use super::documents_traits::{DocumentServiceTrait, DocumentWriterTrait};
use crate::catalog::{CatalogReaderTrait, CatalogSnapshot};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::ledger::LineItemLedger;
use crate::settings::CoreSettings;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

pub struct DocumentService {
    catalog_reader: Arc<dyn CatalogReaderTrait>,
    document_writer: Arc<dyn DocumentWriterTrait>,
    settings: CoreSettings,
    assembler: DocumentAssembler,
    event_sink: Arc<dyn DomainEventSink>,
}

impl DocumentService {
    pub fn new(
        catalog_reader: Arc<dyn CatalogReaderTrait>,
        document_writer: Arc<dyn DocumentWriterTrait>,
        settings: CoreSettings,
    ) -> Self {
        Self {
            catalog_reader,
            document_writer,
            assembler: DocumentAssembler::new(settings.clone()),
            settings,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }
}

#[async_trait]
impl DocumentServiceTrait for DocumentService {
    async fn load_catalog(&self) -> Result<CatalogSnapshot> {
        let (products, customers) = futures::try_join!(
            self.catalog_reader.list_products(),
            self.catalog_reader.list_customers()
        )?;
        debug!(
            "Loaded catalog with {} products and {} customers",
            products.len(),
            customers.len()
        );
        Ok(CatalogSnapshot::new(products, customers))
    }

    fn new_draft(&self, catalog: &CatalogSnapshot) -> DocumentDraft {
        DocumentDraft::new(LineItemLedger::with_tax_rate(
            Arc::clone(&catalog.products),
            self.settings.tax_rate,
        ))
    }

    async fn submit(&self, draft: &DocumentDraft) -> Result<SubmittedDocument> {
        let payload = match self.assembler.assemble(draft) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Document draft rejected: {}", e);
                return Err(e);
            }
        };

        let customer_id = payload.customer_id.clone();
        let total = payload.total;
        let submitted = self.document_writer.create_document(payload).await?;

        info!(
            "Document {} ({}) submitted for customer {}",
            submitted.document_number, submitted.id, customer_id
        );
        self.event_sink.emit(DomainEvent::document_submitted(
            submitted.id.clone(),
            submitted.document_number.clone(),
            customer_id,
            total,
        ));
        Ok(submitted)
    }
}
