//! Domain event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineStage;

/// Domain events emitted by core services after accepted mutations.
///
/// Runtime adapters translate them into platform-specific actions
/// (notifications, automation webhooks, cache refreshes).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A document payload was accepted by the submission collaborator.
    DocumentSubmitted {
        document_id: String,
        document_number: String,
        customer_id: String,
        total: Decimal,
    },

    /// A stage transition was requested for an opportunity.
    OpportunityStageChanged {
        opportunity_id: String,
        stage: PipelineStage,
    },

    /// An opportunity was moved to `won`.
    OpportunityWon { opportunity_id: String },
}

impl DomainEvent {
    /// Creates a DocumentSubmitted event.
    pub fn document_submitted(
        document_id: String,
        document_number: String,
        customer_id: String,
        total: Decimal,
    ) -> Self {
        Self::DocumentSubmitted {
            document_id,
            document_number,
            customer_id,
            total,
        }
    }

    /// Creates an OpportunityStageChanged event.
    pub fn opportunity_stage_changed(opportunity_id: String, stage: PipelineStage) -> Self {
        Self::OpportunityStageChanged {
            opportunity_id,
            stage,
        }
    }

    /// Creates an OpportunityWon event.
    pub fn opportunity_won(opportunity_id: String) -> Self {
        Self::OpportunityWon { opportunity_id }
    }
}
