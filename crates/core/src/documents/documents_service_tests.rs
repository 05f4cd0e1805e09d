//! Tests for DocumentService: catalog loading, draft composition, submission.

#[cfg(test)]
mod tests {
    use crate::catalog::{CatalogReaderTrait, Customer, Product};
    use crate::documents::{
        DocumentService, DocumentServiceTrait, DocumentWriterTrait, NewDocument,
        SubmittedDocument,
    };
    use crate::errors::{Error, Result, ValidationError};
    use crate::events::{DomainEvent, RecordingEventSink};
    use crate::ledger::RowField;
    use crate::settings::CoreSettings;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock collaborators
    // =========================================================================

    #[derive(Clone, Default)]
    struct MockCatalogReader {
        products: Vec<Product>,
        customers: Vec<Customer>,
        fail: bool,
    }

    #[async_trait]
    impl CatalogReaderTrait for MockCatalogReader {
        async fn list_products(&self) -> Result<Vec<Product>> {
            if self.fail {
                return Err(Error::Collaborator("items endpoint returned 503".into()));
            }
            Ok(self.products.clone())
        }

        async fn list_customers(&self) -> Result<Vec<Customer>> {
            Ok(self.customers.clone())
        }
    }

    #[derive(Clone, Default)]
    struct MockDocumentWriter {
        documents: Arc<Mutex<Vec<NewDocument>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl MockDocumentWriter {
        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn documents(&self) -> Vec<NewDocument> {
            self.documents.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentWriterTrait for MockDocumentWriter {
        async fn create_document(&self, document: NewDocument) -> Result<SubmittedDocument> {
            if *self.fail.lock().unwrap() {
                return Err(Error::Collaborator("Intentional submission failure".into()));
            }
            let submitted = SubmittedDocument {
                id: uuid::Uuid::new_v4().to_string(),
                document_number: document.document_number.clone(),
            };
            self.documents.lock().unwrap().push(document);
            Ok(submitted)
        }
    }

    fn reader() -> MockCatalogReader {
        MockCatalogReader {
            products: vec![
                Product {
                    id: "p-paper".to_string(),
                    name: "Paper ream".to_string(),
                    price: dec!(5.50),
                    description: Some("A4, 500 sheets".to_string()),
                    unit: Some("ream".to_string()),
                    sku: Some("PAP-A4".to_string()),
                    category: Some("office".to_string()),
                },
                Product {
                    id: "p-toner".to_string(),
                    name: "Toner".to_string(),
                    price: dec!(60),
                    description: None,
                    unit: None,
                    sku: None,
                    category: None,
                },
            ],
            customers: vec![Customer {
                id: "c-hooli".to_string(),
                name: "Hooli".to_string(),
                contact_name: Some("Gavin".to_string()),
                email: Some("billing@hooli.test".to_string()),
                phone: None,
                currency: "USD".to_string(),
                billing_address_line_1: None,
                billing_city: None,
                billing_country: None,
            }],
            fail: false,
        }
    }

    fn service(
        reader: MockCatalogReader,
        writer: &MockDocumentWriter,
    ) -> (DocumentService, RecordingEventSink) {
        let sink = RecordingEventSink::new();
        let service = DocumentService::new(
            Arc::new(reader),
            Arc::new(writer.clone()),
            CoreSettings::default(),
        )
        .with_event_sink(Arc::new(sink.clone()));
        (service, sink)
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let writer = MockDocumentWriter::default();
        let (service, _) = service(reader(), &writer);

        let catalog = service.load_catalog().await.unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.customers.len(), 1);
        assert!(catalog.products.get("p-toner").is_some());
    }

    #[tokio::test]
    async fn test_load_catalog_failure_is_propagated_unchanged() {
        let writer = MockDocumentWriter::default();
        let failing = MockCatalogReader {
            fail: true,
            ..reader()
        };
        let (service, _) = service(failing, &writer);

        let err = service.load_catalog().await.unwrap_err();
        assert!(matches!(err, Error::Collaborator(ref msg) if msg == "items endpoint returned 503"));
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let writer = MockDocumentWriter::default();
        let (service, sink) = service(reader(), &writer);
        let catalog = service.load_catalog().await.unwrap();

        let mut draft = service.new_draft(&catalog);
        draft.select_customer("c-hooli");
        let ledger = draft.ledger_mut();
        let paper = ledger.add_row();
        ledger.update_field(paper, RowField::ProductId, "p-paper");
        ledger.update_field(paper, RowField::Quantity, "10");
        let toner = ledger.add_row();
        ledger.update_field(toner, RowField::ProductId, "p-toner");

        let submitted = service.submit(&draft).await.unwrap();

        let documents = writer.documents();
        assert_eq!(documents.len(), 1);
        let document = &documents[0];
        assert_eq!(document.customer_id, "c-hooli");
        assert_eq!(document.document_number, submitted.document_number);
        assert_eq!(document.subtotal, dec!(115));
        assert_eq!(document.tax, dec!(17.25));
        assert_eq!(document.total, dec!(132.25));
        assert_eq!(document.items.len(), 2);
        assert_eq!(document.items[0].total, dec!(55));

        assert_eq!(
            sink.events(),
            vec![DomainEvent::document_submitted(
                submitted.id.clone(),
                submitted.document_number.clone(),
                "c-hooli".to_string(),
                dec!(132.25),
            )]
        );
    }

    #[tokio::test]
    async fn test_submit_without_customer_never_reaches_writer() {
        let writer = MockDocumentWriter::default();
        let (service, sink) = service(reader(), &writer);
        let catalog = service.load_catalog().await.unwrap();

        let mut draft = service.new_draft(&catalog);
        draft.ledger_mut().add_row();

        let err = service.submit(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingCustomer)
        ));
        assert!(writer.documents().is_empty());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_rows_never_reaches_writer() {
        let writer = MockDocumentWriter::default();
        let (service, _) = service(reader(), &writer);
        let catalog = service.load_catalog().await.unwrap();

        let mut draft = service.new_draft(&catalog);
        draft.select_customer("c-hooli");

        let err = service.submit(&draft).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyLineItems)
        ));
        assert!(writer.documents().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft_for_retry() {
        let writer = MockDocumentWriter::default();
        writer.set_fail(true);
        let (service, sink) = service(reader(), &writer);
        let catalog = service.load_catalog().await.unwrap();

        let mut draft = service.new_draft(&catalog);
        draft.select_customer("c-hooli");
        let row = draft.ledger_mut().add_row();
        draft
            .ledger_mut()
            .update_field(row, RowField::ProductId, "p-toner");

        let err = service.submit(&draft).await.unwrap_err();
        assert!(matches!(err, Error::Collaborator(ref msg) if msg == "Intentional submission failure"));
        assert!(sink.is_empty());
        assert_eq!(draft.totals().grand_total, dec!(69));

        writer.set_fail(false);
        service.submit(&draft).await.unwrap();
        assert_eq!(writer.documents().len(), 1);
    }

    #[tokio::test]
    async fn test_new_draft_uses_configured_tax_rate() {
        let writer = MockDocumentWriter::default();
        let settings = CoreSettings {
            tax_rate: dec!(0.18),
            ..CoreSettings::default()
        };
        let service = DocumentService::new(Arc::new(reader()), Arc::new(writer), settings);
        let catalog = service.load_catalog().await.unwrap();

        let mut draft = service.new_draft(&catalog);
        let row = draft.ledger_mut().add_row();
        draft
            .ledger_mut()
            .update_field(row, RowField::Price, "100");
        assert_eq!(draft.totals().tax_total, dec!(18));
    }
}
