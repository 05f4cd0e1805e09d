//! Bizdesk Core - document line-item ledger and sales pipeline engine.
//!
//! This crate holds the business rules of the dashboard: composing documents
//! with consistent totals and moving opportunities through pipeline stages.
//! It performs no I/O of its own; catalog lookups, document submission and
//! stage persistence go through the collaborator traits it defines.

pub mod catalog;
pub mod constants;
pub mod documents;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod pipeline;
pub mod settings;

pub use catalog::{CatalogReaderTrait, CatalogSnapshot, Customer, Product, ProductCatalog};
pub use documents::{
    DocumentAssembler, DocumentDraft, DocumentService, DocumentServiceTrait, DocumentWriterTrait,
    NewDocument, NewDocumentItem, SubmittedDocument,
};
pub use ledger::{LedgerTotals, LineItemLedger, LineItemRow, RowField, RowHandle};
pub use pipeline::{
    age_in_days, group_by_stage, project_board, stage_of, Board, BoardCard, BoardColumn,
    Opportunity, OpportunityReaderTrait, OpportunityWriterTrait, PipelineService,
    PipelineServiceTrait, PipelineStage, TransitionRequest,
};
pub use settings::CoreSettings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
