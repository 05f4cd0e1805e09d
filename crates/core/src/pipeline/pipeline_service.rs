use super::board::{project_board, Board};
use super::pipeline_model::{Opportunity, PipelineStage};
use super::pipeline_traits::{OpportunityReaderTrait, OpportunityWriterTrait, PipelineServiceTrait};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A dispatched stage update.
///
/// Dropping it does not cancel the update; awaiting [`TransitionRequest::outcome`]
/// yields the write collaborator's result unchanged.
#[derive(Debug)]
pub struct TransitionRequest {
    opportunity_id: String,
    stage: PipelineStage,
    handle: JoinHandle<Result<()>>,
}

impl TransitionRequest {
    pub fn opportunity_id(&self) -> &str {
        &self.opportunity_id
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub async fn outcome(self) -> Result<()> {
        self.handle.await?
    }
}

/// Owns the opportunity snapshot and applies stage transitions.
///
/// The snapshot is only ever replaced wholesale by [`PipelineServiceTrait::refresh`];
/// transitions never patch it locally.
///
/// Transitions are dispatched on the caller's Tokio runtime, or on the runtime
/// that was current when the service was built (see [`PipelineService::with_runtime`]).
/// Updates for the same opportunity reach the writer in dispatch order.
pub struct PipelineService {
    reader: Arc<dyn OpportunityReaderTrait>,
    writer: Arc<dyn OpportunityWriterTrait>,
    snapshot: RwLock<Arc<Vec<Opportunity>>>,
    event_sink: Arc<dyn DomainEventSink>,
    runtime: Option<Handle>,
    // Completion signal of the latest dispatched update, per opportunity id.
    in_flight: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl PipelineService {
    pub fn new(
        reader: Arc<dyn OpportunityReaderTrait>,
        writer: Arc<dyn OpportunityWriterTrait>,
    ) -> Self {
        Self {
            reader,
            writer,
            snapshot: RwLock::new(Arc::new(Vec::new())),
            event_sink: Arc::new(NoOpDomainEventSink),
            runtime: Handle::try_current().ok(),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Sets the runtime used for transitions requested outside of any runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Sets the domain event sink for this service.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn replace_snapshot(&self, opportunities: Vec<Opportunity>) {
        let fresh = Arc::new(opportunities);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }

    fn dispatch_runtime(&self) -> Result<Handle> {
        Handle::try_current()
            .ok()
            .or_else(|| self.runtime.clone())
            .ok_or_else(|| {
                Error::Unexpected(
                    "No Tokio runtime available to dispatch the stage change".to_string(),
                )
            })
    }

    /// Registers `done` as the latest update for `opportunity_id` and returns
    /// the signal of the update dispatched before it, if any.
    fn enqueue(
        &self,
        opportunity_id: &str,
        done: oneshot::Receiver<()>,
    ) -> Option<oneshot::Receiver<()>> {
        let mut in_flight = match self.in_flight.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        in_flight.insert(opportunity_id.to_string(), done)
    }
}

#[async_trait]
impl PipelineServiceTrait for PipelineService {
    async fn refresh(&self) -> Result<usize> {
        let opportunities = self.reader.list_opportunities().await?;
        let count = opportunities.len();
        self.replace_snapshot(opportunities);
        debug!("Pipeline snapshot refreshed with {} opportunities", count);
        Ok(count)
    }

    fn snapshot(&self) -> Arc<Vec<Opportunity>> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn board(&self, now: DateTime<Utc>) -> Board {
        project_board(&self.snapshot(), now)
    }

    fn transition(&self, opportunity_id: &str, target_stage: &str) -> Result<TransitionRequest> {
        let stage: PipelineStage = target_stage.parse()?;
        self.transition_to(opportunity_id, stage)
    }

    /// Spawns the update and returns at once.
    ///
    /// Every stage may move to every other stage. An update waits for the
    /// previous update of the same opportunity to finish, so the last
    /// requested stage is the one that persists.
    fn transition_to(
        &self,
        opportunity_id: &str,
        stage: PipelineStage,
    ) -> Result<TransitionRequest> {
        let runtime = self.dispatch_runtime()?;
        let writer = Arc::clone(&self.writer);
        let event_sink = Arc::clone(&self.event_sink);
        let id = opportunity_id.to_string();

        let (done_tx, done_rx) = oneshot::channel::<()>();
        let previous = self.enqueue(opportunity_id, done_rx);

        debug!("Requesting stage change of {} to {}", id, stage);
        let handle = runtime.spawn(async move {
            // Dropped when this update finishes, releasing the next one.
            let _done = done_tx;
            if let Some(previous) = previous {
                let _ = previous.await;
            }

            match writer.update_opportunity_stage(&id, stage).await {
                Ok(()) => {
                    info!("Opportunity {} moved to {}", id, stage);
                    event_sink.emit(DomainEvent::opportunity_stage_changed(id.clone(), stage));
                    if stage == PipelineStage::Won {
                        event_sink.emit(DomainEvent::opportunity_won(id));
                    }
                    Ok(())
                }
                Err(e) => {
                    error!("Failed to move opportunity {} to {}: {}", id, stage, e);
                    Err(e)
                }
            }
        });

        Ok(TransitionRequest {
            opportunity_id: opportunity_id.to_string(),
            stage,
            handle,
        })
    }
}
