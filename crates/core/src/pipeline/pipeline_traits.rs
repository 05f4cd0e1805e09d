use super::board::Board;
use super::pipeline_model::{Opportunity, PipelineStage};
use super::pipeline_service::TransitionRequest;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Read collaborator supplying opportunity snapshots.
#[async_trait]
pub trait OpportunityReaderTrait: Send + Sync {
    async fn list_opportunities(&self) -> Result<Vec<Opportunity>>;
}

/// Write collaborator persisting stage changes.
#[async_trait]
pub trait OpportunityWriterTrait: Send + Sync {
    async fn update_opportunity_stage(&self, opportunity_id: &str, stage: PipelineStage)
        -> Result<()>;
}

/// Trait for pipeline service operations
#[async_trait]
pub trait PipelineServiceTrait: Send + Sync {
    /// Replaces the snapshot with a fresh one from the reader. Returns the
    /// number of opportunities loaded.
    async fn refresh(&self) -> Result<usize>;

    fn snapshot(&self) -> Arc<Vec<Opportunity>>;

    fn board(&self, now: DateTime<Utc>) -> Board;

    /// Parses `target_stage` and dispatches the update. Fails with
    /// `UnknownStage`, or when no runtime is available for the dispatch.
    fn transition(&self, opportunity_id: &str, target_stage: &str) -> Result<TransitionRequest>;

    fn transition_to(&self, opportunity_id: &str, stage: PipelineStage)
        -> Result<TransitionRequest>;
}
