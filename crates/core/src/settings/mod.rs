//! Settings module - configuration consumed by the document and pipeline services.

mod settings_model;

pub use settings_model::CoreSettings;
