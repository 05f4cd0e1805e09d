//! Domain events module.
//!
//! Event types and the sink trait through which the document and pipeline
//! services report accepted mutations. Hosts implement the sink to forward
//! events to notification or automation channels.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
