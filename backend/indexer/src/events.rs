//! Canonical event types emitted by the crowdfunding protocol contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/crowdfund_protocol/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the crowdfunding contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new campaign was created (`created` topic).
    CampaignCreated,
    /// A contribution entered escrow (`funded` topic).
    FundingReceived,
    /// A contributor left through price protection (`withdrawn` topic).
    FundingWithdrawn,
    /// A contributor reclaimed funds after a failed campaign (`refunded` topic).
    RefundClaimed,
    /// The USD goal was met (`goal_met` topic).
    GoalReached,
    /// The price fell below the campaign baseline (`refund_on` topic).
    RefundEnabled,
    /// The owner closed the campaign (`finalized` topic).
    CampaignFinalized,
    /// Escrow was paid out to the beneficiary (`released` topic).
    FundsReleased,
    /// The admin re-pointed the price feed (`oracle_set` topic).
    OracleUpdated,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "funded" => Self::FundingReceived,
            "withdrawn" => Self::FundingWithdrawn,
            "refunded" => Self::RefundClaimed,
            "goal_met" => Self::GoalReached,
            "refund_on" => Self::RefundEnabled,
            "finalized" => Self::CampaignFinalized,
            "released" => Self::FundsReleased,
            "oracle_set" => Self::OracleUpdated,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::FundingReceived => "funding_received",
            Self::FundingWithdrawn => "funding_withdrawn",
            Self::RefundClaimed => "refund_claimed",
            Self::GoalReached => "goal_reached",
            Self::RefundEnabled => "refund_enabled",
            Self::CampaignFinalized => "campaign_finalized",
            Self::FundsReleased => "funds_released",
            Self::OracleUpdated => "oracle_updated",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`Self::as_str`], used when reading stored records back.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "campaign_created" => Self::CampaignCreated,
            "funding_received" => Self::FundingReceived,
            "funding_withdrawn" => Self::FundingWithdrawn,
            "refund_claimed" => Self::RefundClaimed,
            "goal_reached" => Self::GoalReached,
            "refund_enabled" => Self::RefundEnabled,
            "campaign_finalized" => Self::CampaignFinalized,
            "funds_released" => Self::FundsReleased,
            "oracle_updated" => Self::OracleUpdated,
            _ => Self::Unknown,
        }
    }
}

/// A fully decoded campaign event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    /// Identity of the event on chain; the de-duplication key.
    pub event_id: String,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    /// Token base units (or USD for `created`), kept as a decimal string
    /// since contract amounts are `i128`.
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        EventKind::from_stored(&self.event_type)
    }

    /// The amount as an integer, if present and well-formed.
    pub fn amount_value(&self) -> Option<i128> {
        self.amount.as_deref()?.parse().ok()
    }
}
