//! Documents module - drafts, payload assembly, and submission.

mod document_assembler;
mod documents_model;
mod documents_service;
mod documents_traits;

#[cfg(test)]
mod documents_service_tests;

pub use document_assembler::{generate_document_number, DocumentAssembler};
pub use documents_model::{DocumentDraft, NewDocument, NewDocumentItem, SubmittedDocument};
pub use documents_service::DocumentService;
pub use documents_traits::{DocumentServiceTrait, DocumentWriterTrait};
