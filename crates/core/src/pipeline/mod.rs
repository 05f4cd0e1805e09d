//! Pipeline module - stage enumeration, transitions, and the board projection.

mod board;
mod pipeline_model;
mod pipeline_service;
mod pipeline_traits;


pub use board::{age_in_days, group_by_stage, project_board, Board, BoardCard, BoardColumn};
pub use pipeline_model::{stage_of, Opportunity, PipelineStage};
pub use pipeline_service::{PipelineService, TransitionRequest};
pub use pipeline_traits::{OpportunityReaderTrait, OpportunityWriterTrait, PipelineServiceTrait};
