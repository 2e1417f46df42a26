//! # Events
//!
//! Every campaign event is published with topics `(symbol, campaign_id)` and a
//! `#[contracttype]` struct as data, so off-chain observers can decode them
//! without knowing the call that produced them.
//!
//! | Topic       | Data                  |
//! |-------------|-----------------------|
//! | `created`   | [`CampaignCreated`]   |
//! | `funded`    | [`FundingReceived`]   |
//! | `withdrawn` | [`FundingWithdrawn`]  |
//! | `refunded`  | [`RefundClaimed`]     |
//! | `goal_met`  | [`GoalReached`]       |
//! | `refund_on` | [`RefundEnabled`]     |
//! | `finalized` | [`CampaignFinalized`] |
//! | `released`  | [`FundsReleased`]     |
//! | `oracle_set`| [`OracleUpdated`]     |

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignCreated {
    pub campaign_id: u64,
    pub owner: Address,
    pub beneficiary: Address,
    pub goal_usd: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingReceived {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
    pub new_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundingWithdrawn {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundClaimed {
    pub campaign_id: u64,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GoalReached {
    pub campaign_id: u64,
    pub total_raised: i128,
    pub raised_usd: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundEnabled {
    pub campaign_id: u64,
    pub current_price: i128,
    pub current_expo: i32,
    pub baseline_price: i128,
    pub baseline_expo: i32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignFinalized {
    pub campaign_id: u64,
    pub total_raised: i128,
    pub goal_reached: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReleased {
    pub campaign_id: u64,
    pub beneficiary: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OracleUpdated {
    pub oracle: Address,
    pub feed_id: BytesN<32>,
}

pub fn emit_campaign_created(
    env: &Env,
    campaign_id: u64,
    owner: Address,
    beneficiary: Address,
    goal_usd: i128,
    deadline: u64,
) {
    env.events().publish(
        (symbol_short!("created"), campaign_id),
        CampaignCreated {
            campaign_id,
            owner,
            beneficiary,
            goal_usd,
            deadline,
        },
    );
}

pub fn emit_funding_received(
    env: &Env,
    campaign_id: u64,
    contributor: Address,
    amount: i128,
    new_total: i128,
) {
    env.events().publish(
        (symbol_short!("funded"), campaign_id),
        FundingReceived {
            campaign_id,
            contributor,
            amount,
            new_total,
        },
    );
}

pub fn emit_funding_withdrawn(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), campaign_id),
        FundingWithdrawn {
            campaign_id,
            contributor,
            amount,
        },
    );
}

pub fn emit_refund_claimed(env: &Env, campaign_id: u64, contributor: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refunded"), campaign_id),
        RefundClaimed {
            campaign_id,
            contributor,
            amount,
        },
    );
}

pub fn emit_goal_reached(env: &Env, campaign_id: u64, total_raised: i128, raised_usd: i128) {
    env.events().publish(
        (symbol_short!("goal_met"), campaign_id),
        GoalReached {
            campaign_id,
            total_raised,
            raised_usd,
        },
    );
}

pub fn emit_refund_enabled(
    env: &Env,
    campaign_id: u64,
    current_price: i128,
    current_expo: i32,
    baseline_price: i128,
    baseline_expo: i32,
) {
    env.events().publish(
        (symbol_short!("refund_on"), campaign_id),
        RefundEnabled {
            campaign_id,
            current_price,
            current_expo,
            baseline_price,
            baseline_expo,
        },
    );
}

pub fn emit_campaign_finalized(env: &Env, campaign_id: u64, total_raised: i128, goal_reached: bool) {
    env.events().publish(
        (symbol_short!("finalized"), campaign_id),
        CampaignFinalized {
            campaign_id,
            total_raised,
            goal_reached,
        },
    );
}

pub fn emit_funds_released(env: &Env, campaign_id: u64, beneficiary: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("released"), campaign_id),
        FundsReleased {
            campaign_id,
            beneficiary,
            amount,
        },
    );
}

pub fn emit_oracle_updated(env: &Env, oracle: Address, feed_id: BytesN<32>) {
    env.events().publish(
        (Symbol::new(env, "oracle_set"),),
        OracleUpdated { oracle, feed_id },
    );
}
