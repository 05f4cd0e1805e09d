//! Pipeline domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;

/// The fixed set of sales pipeline stages, in board display order.
///
/// `Won` and `Lost` are not terminal: any stage may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    #[default]
    Prospecting,
    ProposalSent,
    Negotiation,
    Won,
    Lost,
}

impl PipelineStage {
    /// All stages in display order.
    pub const ALL: [PipelineStage; 5] = [
        PipelineStage::Prospecting,
        PipelineStage::ProposalSent,
        PipelineStage::Negotiation,
        PipelineStage::Won,
        PipelineStage::Lost,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Prospecting => "prospecting",
            PipelineStage::ProposalSent => "proposal_sent",
            PipelineStage::Negotiation => "negotiation",
            PipelineStage::Won => "won",
            PipelineStage::Lost => "lost",
        }
    }

    /// Zero-based column index on the board.
    pub fn display_order(&self) -> usize {
        match self {
            PipelineStage::Prospecting => 0,
            PipelineStage::ProposalSent => 1,
            PipelineStage::Negotiation => 2,
            PipelineStage::Won => 3,
            PipelineStage::Lost => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PipelineStage::Prospecting => "Prospecting",
            PipelineStage::ProposalSent => "Proposal Sent",
            PipelineStage::Negotiation => "Negotiation",
            PipelineStage::Won => "Won",
            PipelineStage::Lost => "Lost",
        }
    }

    /// Colour tag used by the renderer for the column marker.
    pub fn color(&self) -> &'static str {
        match self {
            PipelineStage::Prospecting => "gray",
            PipelineStage::ProposalSent => "blue",
            PipelineStage::Negotiation => "yellow",
            PipelineStage::Won => "green",
            PipelineStage::Lost => "red",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStage {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| PipelineError::UnknownStage(s.to_string()))
    }
}

/// A sales opportunity (estimate) as supplied by the external snapshot.
///
/// `pipeline_stage` is kept as raw text: snapshots may omit it or carry values
/// this core does not know. Use [`Opportunity::stage`] to classify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    #[serde(default, alias = "estimate_number")]
    pub number: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default, alias = "stage")]
    pub pipeline_stage: Option<String>,
    #[serde(default)]
    pub last_note: Option<String>,
    #[serde(
        alias = "estimate_date",
        deserialize_with = "timestamp_input_format::deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
}

impl Opportunity {
    /// The record's stage, or `Prospecting` when absent or unrecognised.
    pub fn stage(&self) -> PipelineStage {
        stage_of(self)
    }
}

/// Classifies an opportunity. Total over any input record.
pub fn stage_of(opportunity: &Opportunity) -> PipelineStage {
    match opportunity.pipeline_stage.as_deref() {
        None => PipelineStage::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::debug!(
                "Opportunity {} has unknown stage '{}', treating as prospecting",
                opportunity.id,
                raw
            );
            PipelineStage::default()
        }),
    }
}

// Backends send RFC 3339, offset-less datetimes (taken as UTC) or bare dates.
mod timestamp_input_format {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer};

    pub(super) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
        let trimmed = value.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| format!("Invalid timestamp '{}'", value))
    }

    pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
