//! Campaign progress rebuilt from indexed events.
//!
//! Mirrors the contract's accounting: `funded` adds to a contributor's
//! balance, `withdrawn` and `refunded` subtract from it, and the raised total
//! is kept after funds are released.

use std::collections::HashMap;

use serde::Serialize;

use crate::events::{EventKind, EventRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub owner: Option<String>,
    /// USD goal, 18-decimal fixed point, as a decimal string.
    pub goal_usd: Option<String>,
    /// Token base units currently counted towards the goal.
    pub total_raised: String,
    /// Contributors with a non-zero balance.
    pub contributors: usize,
    pub goal_reached: bool,
    pub refund_enabled: bool,
    pub closed: bool,
    pub funds_released: bool,
    pub event_count: usize,
    pub last_ledger: i64,
}

/// Fold a campaign's events (in ledger order) into a summary.
///
/// Returns `None` when there are no events at all, which the API reports as
/// an unknown campaign.
pub fn summarize(campaign_id: &str, events: &[EventRecord]) -> Option<CampaignSummary> {
    if events.is_empty() {
        return None;
    }

    let mut balances: HashMap<&str, i128> = HashMap::new();
    let mut summary = CampaignSummary {
        campaign_id: campaign_id.to_string(),
        owner: None,
        goal_usd: None,
        total_raised: String::new(),
        contributors: 0,
        goal_reached: false,
        refund_enabled: false,
        closed: false,
        funds_released: false,
        event_count: events.len(),
        last_ledger: 0,
    };

    for ev in events {
        summary.last_ledger = summary.last_ledger.max(ev.ledger);
        let amount = ev.amount_value().unwrap_or(0);
        match ev.kind() {
            EventKind::CampaignCreated => {
                summary.owner = ev.actor.clone();
                summary.goal_usd = ev.amount.clone();
            }
            EventKind::FundingReceived => {
                if let Some(actor) = ev.actor.as_deref() {
                    *balances.entry(actor).or_insert(0) += amount;
                }
            }
            EventKind::FundingWithdrawn | EventKind::RefundClaimed => {
                if let Some(actor) = ev.actor.as_deref() {
                    let balance = balances.entry(actor).or_insert(0);
                    *balance = (*balance - amount).max(0);
                }
            }
            EventKind::GoalReached => summary.goal_reached = true,
            EventKind::RefundEnabled => summary.refund_enabled = true,
            EventKind::CampaignFinalized => summary.closed = true,
            EventKind::FundsReleased => {
                summary.goal_reached = true;
                summary.funds_released = true;
            }
            EventKind::OracleUpdated | EventKind::Unknown => {}
        }
    }

    summary.total_raised = balances.values().sum::<i128>().to_string();
    summary.contributors = balances.values().filter(|b| **b > 0).count();
    Some(summary)
}
