//! # Types
//!
//! Shared data structures used across all modules of the crowdfunding protocol.
//!
//! ## Config / State split
//!
//! A campaign is stored as two separate ledger entries:
//!
//! - [`CampaignConfig`]: written once at creation; never mutated.
//! - [`CampaignState`]: written on every contribution, withdrawal, refund and
//!   on finalization.
//!
//! Per-contributor balances live in their own entries keyed by
//! `(campaign_id, contributor)`. The public API exposes the reconstructed
//! [`CampaignSnapshot`].
//!
//! ## Lifecycle
//!
//! ```text
//! Open ──finalize──► Closed
//!   goal_reached:   false ──► true   (sticky, may flip while Open or at finalize)
//!   refund_enabled: false ──► true   (sticky, price dropped below baseline)
//! ```

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Protocol-wide configuration written by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// May re-point the price feed.
    pub admin: Address,
    /// Token contract used as the native currency for every campaign.
    pub token: Address,
    /// Decimals of `token`, read once at `init`.
    pub token_decimals: u32,
    /// Price oracle contract.
    pub oracle: Address,
    /// Feed queried on `oracle` for the token/USD price.
    pub feed_id: BytesN<32>,
    /// Quotes older than this many seconds are rejected.
    pub max_price_age: u64,
}

/// Descriptive data shown by clients.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignMetadata {
    pub title: String,
    pub description: String,
}

/// Immutable campaign configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub owner: Address,
    pub beneficiary: Address,
    /// USD goal, 18-decimal fixed point.
    pub goal_usd: i128,
    pub created_at: u64,
    pub deadline: u64,
    /// Oracle price at creation; the price-protection baseline is
    /// `baseline_price * 10^baseline_expo`.
    pub baseline_price: i128,
    pub baseline_expo: i32,
    pub metadata: CampaignMetadata,
}

/// Mutable campaign state.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CampaignState {
    /// Sum of all stored contributions, in token base units.
    pub total_raised: i128,
    pub goal_reached: bool,
    pub closed: bool,
    /// Set the first time a price drop below the baseline is observed.
    pub refund_enabled: bool,
    /// Set when finalize paid `total_raised` out to the beneficiary.
    pub funds_released: bool,
}

impl CampaignState {
    /// Token units still held in escrow for this campaign.
    pub fn escrowed(&self) -> i128 {
        if self.funds_released {
            0
        } else {
            self.total_raised
        }
    }

    /// Whether some exit path is currently open to contributors.
    pub fn refundable(&self) -> bool {
        !self.goal_reached && (self.refund_enabled || self.closed)
    }
}

/// Full view of a campaign, read in a single call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignSnapshot {
    pub id: u64,
    pub owner: Address,
    pub beneficiary: Address,
    pub goal_usd: i128,
    pub created_at: u64,
    pub deadline: u64,
    pub baseline_price: i128,
    pub baseline_expo: i32,
    pub total_raised: i128,
    pub goal_reached: bool,
    pub closed: bool,
    pub refundable: bool,
    pub funds_released: bool,
    pub metadata: CampaignMetadata,
}

impl CampaignSnapshot {
    pub fn from_parts(config: CampaignConfig, state: &CampaignState) -> Self {
        Self {
            id: config.id,
            owner: config.owner,
            beneficiary: config.beneficiary,
            goal_usd: config.goal_usd,
            created_at: config.created_at,
            deadline: config.deadline,
            baseline_price: config.baseline_price,
            baseline_expo: config.baseline_expo,
            total_raised: state.total_raised,
            goal_reached: state.goal_reached,
            closed: state.closed,
            refundable: state.refundable(),
            funds_released: state.funds_released,
            metadata: config.metadata,
        }
    }
}

/// Funding progress as a client would render it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignProgress {
    pub campaign_id: u64,
    pub raised_usd: i128,
    pub goal_usd: i128,
    /// 0..=100.
    pub percent_funded: u32,
    pub days_remaining: u64,
}
