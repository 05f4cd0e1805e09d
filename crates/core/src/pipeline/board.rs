//! Board projection: pure, derived views over an opportunity snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pipeline_model::{stage_of, Opportunity, PipelineStage};
use crate::constants::{NO_ACTIVITY_LABEL, UNKNOWN_CUSTOMER_LABEL, UNKNOWN_OWNER_INITIAL};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Partitions opportunities into one list per stage, in display order.
///
/// Every input record lands in exactly one list; input order is kept within
/// each list.
pub fn group_by_stage(opportunities: &[Opportunity]) -> [Vec<&Opportunity>; PipelineStage::COUNT] {
    let mut groups: [Vec<&Opportunity>; PipelineStage::COUNT] = Default::default();
    for opportunity in opportunities {
        groups[stage_of(opportunity).display_order()].push(opportunity);
    }
    groups
}

/// Whole days elapsed since the opportunity was created, floored.
///
/// Future-dated records yield a negative age.
pub fn age_in_days(opportunity: &Opportunity, now: DateTime<Utc>) -> i64 {
    (now - opportunity.created_at)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Display fields of one card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardCard {
    pub id: String,
    pub number: Option<String>,
    pub customer_name: String,
    pub owner_initial: char,
    pub age_days: i64,
    pub last_note: String,
    pub total: Decimal,
}

impl BoardCard {
    pub fn from_opportunity(opportunity: &Opportunity, now: DateTime<Utc>) -> Self {
        let customer_name = opportunity
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let owner_initial = customer_name
            .and_then(|name| name.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or(UNKNOWN_OWNER_INITIAL);

        let last_note = opportunity
            .last_note
            .as_deref()
            .filter(|note| !note.trim().is_empty())
            .unwrap_or(NO_ACTIVITY_LABEL);

        Self {
            id: opportunity.id.clone(),
            number: opportunity.number.clone(),
            customer_name: customer_name.unwrap_or(UNKNOWN_CUSTOMER_LABEL).to_string(),
            owner_initial,
            age_days: age_in_days(opportunity, now),
            last_note: last_note.to_string(),
            total: opportunity.total,
        }
    }
}

/// One stage column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardColumn {
    pub stage: PipelineStage,
    pub title: String,
    pub color: String,
    pub count: usize,
    pub total: Decimal,
    pub cards: Vec<BoardCard>,
}

/// The whole board, always exactly one column per stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

impl Board {
    /// The column for `stage`, if the board carries one.
    pub fn column(&self, stage: PipelineStage) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.stage == stage)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.count).sum()
    }
}

/// Projects a snapshot into board columns and cards.
pub fn project_board(opportunities: &[Opportunity], now: DateTime<Utc>) -> Board {
    let groups = group_by_stage(opportunities);
    let columns = PipelineStage::ALL
        .iter()
        .zip(groups)
        .map(|(stage, members)| {
            let cards: Vec<BoardCard> = members
                .into_iter()
                .map(|opportunity| BoardCard::from_opportunity(opportunity, now))
                .collect();
            BoardColumn {
                stage: *stage,
                title: stage.title().to_string(),
                color: stage.color().to_string(),
                count: cards.len(),
                total: cards
                    .iter()
                    .fold(Decimal::ZERO, |acc, card| acc.saturating_add(card.total)),
                cards,
            }
        })
        .collect();
    Board { columns }
}
