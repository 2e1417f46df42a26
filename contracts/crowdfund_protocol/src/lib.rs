//! # Crowdfund Protocol Contract
//!
//! A Soroban contract that acts as the campaign registry and holds every
//! campaign's funds in escrow. Goals are denominated in USD and checked
//! against an external price oracle; contributors are protected against a
//! falling price by an early-exit path.
//!
//! | Phase         | Entry Point(s)                                         |
//! |---------------|--------------------------------------------------------|
//! | Bootstrap     | [`CrowdfundProtocol::init`], `set_oracle`              |
//! | Registration  | [`CrowdfundProtocol::create_campaign`]                 |
//! | Funding       | [`CrowdfundProtocol::contribute`], `check_goal_reached`|
//! | Settlement    | [`CrowdfundProtocol::finalize_campaign`]               |
//! | Exits         | `withdraw_contribution`, `claim_refund`, `check_price_drop` |
//! | Queries       | `get_campaign`, `get_campaigns`, `get_progress`, ...   |
//!
//! ## Architecture
//!
//! Campaigns are records addressed by a sequential `u64` handle. Storage
//! access is delegated to [`storage`], lifecycle transitions to [`campaign`],
//! price reads to [`oracle`]. Every mutating entry point writes its state
//! before any outbound token transfer and holds a re-entrancy lock while it
//! runs; any `Err` rolls the whole invocation back.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, BytesN, Env, Vec};

mod campaign;
pub mod events;
pub mod oracle;
mod progress;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_price_protection;

use storage::{
    acquire_lock, get_and_increment_campaign_id, load_campaign_config, load_campaign_pair,
    load_campaign_state, release_lock, save_campaign, save_campaign_state,
};
pub use types::{
    CampaignConfig, CampaignMetadata, CampaignProgress, CampaignSnapshot, CampaignState,
    ProtocolConfig,
};

/// Upper bound on handles returned by one paginated read.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Upper bound on snapshots returned by one paginated read. Each snapshot
/// reads two persistent entries, which keeps a full page inside the
/// per-transaction read limit.
pub const MAX_SNAPSHOT_PAGE_SIZE: u32 = 15;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    InvalidArgument = 1,
    Unauthorized = 2,
    CampaignClosed = 3,
    AlreadyClosed = 4,
    StillActive = 5,
    DeadlinePassed = 6,
    ZeroAmount = 7,
    NothingToRefund = 8,
    OracleUnavailable = 9,
    TransferFailed = 10,
    UnknownCampaign = 11,
    InvalidRange = 12,
    AlreadyInitialized = 13,
    NotInitialized = 14,
    Overflow = 15,
    WithdrawalNotAllowed = 16,
    RefundNotAvailable = 17,
    Reentrant = 18,
}

#[contract]
pub struct CrowdfundProtocol;

#[contractimpl]
impl CrowdfundProtocol {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Configure the native token and price feed.
    ///
    /// Must be called exactly once after deployment; later calls fail with
    /// `AlreadyInitialized`. `max_price_age` is in seconds and must be > 0.
    pub fn init(
        env: Env,
        admin: Address,
        token: Address,
        oracle: Address,
        feed_id: BytesN<32>,
        max_price_age: u64,
    ) -> Result<(), Error> {
        admin.require_auth();
        if storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if max_price_age == 0 {
            return Err(Error::InvalidArgument);
        }

        let token_decimals = token::Client::new(&env, &token).decimals();
        storage::set_config(
            &env,
            &ProtocolConfig {
                admin,
                token,
                token_decimals,
                oracle,
                feed_id,
                max_price_age,
            },
        );
        Ok(())
    }

    /// Point the protocol at a different oracle or feed. Admin only.
    ///
    /// Baselines of existing campaigns are kept as captured, so the new feed
    /// must quote in the same units.
    pub fn set_oracle(
        env: Env,
        caller: Address,
        oracle: Address,
        feed_id: BytesN<32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        let mut config = storage::get_config(&env)?;
        if caller != config.admin {
            return Err(Error::Unauthorized);
        }
        config.oracle = oracle.clone();
        config.feed_id = feed_id.clone();
        storage::set_config(&env, &config);
        events::emit_oracle_updated(&env, oracle, feed_id);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<ProtocolConfig, Error> {
        storage::get_config(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────

    /// Create a campaign owned by `owner` and return its handle.
    ///
    /// - `goal_usd` is 18-decimal fixed-point USD and must be > 0.
    /// - `duration_days` must be in `1..=1825`.
    /// - The current oracle price is captured as the price-protection baseline.
    pub fn create_campaign(
        env: Env,
        owner: Address,
        beneficiary: Address,
        goal_usd: i128,
        duration_days: u32,
        metadata: CampaignMetadata,
    ) -> Result<u64, Error> {
        owner.require_auth();
        let protocol = storage::get_config(&env)?;
        campaign::validate_params(&env, &beneficiary, goal_usd, duration_days, &metadata)?;

        let baseline = oracle::read_price(&env, &protocol)?;

        let now = env.ledger().timestamp();
        let deadline = (duration_days as u64)
            .checked_mul(progress::SECONDS_PER_DAY)
            .and_then(|secs| now.checked_add(secs))
            .ok_or(Error::Overflow)?;

        let id = get_and_increment_campaign_id(&env);
        let config = CampaignConfig {
            id,
            owner: owner.clone(),
            beneficiary: beneficiary.clone(),
            goal_usd,
            created_at: now,
            deadline,
            baseline_price: baseline.price,
            baseline_expo: baseline.expo,
            metadata,
        };
        save_campaign(&env, &config, &CampaignState::default());

        events::emit_campaign_created(&env, id, owner, beneficiary, goal_usd, deadline);
        Ok(id)
    }

    pub fn campaign_count(env: Env) -> u64 {
        storage::campaign_count(&env)
    }

    /// Return up to `limit` campaign handles starting at `offset`.
    ///
    /// `limit` is clamped to [`MAX_PAGE_SIZE`]; an `offset` past the end fails
    /// with `InvalidRange`.
    pub fn get_campaigns(env: Env, offset: u64, limit: u32) -> Result<Vec<u64>, Error> {
        let (start, end) = page_bounds(&env, offset, limit, MAX_PAGE_SIZE)?;
        let mut ids = Vec::new(&env);
        for id in start..end {
            ids.push_back(id);
        }
        Ok(ids)
    }

    /// Like [`Self::get_campaigns`], returning full snapshots.
    ///
    /// `limit` is clamped to [`MAX_SNAPSHOT_PAGE_SIZE`].
    pub fn get_campaign_snapshots(
        env: Env,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<CampaignSnapshot>, Error> {
        let (start, end) = page_bounds(&env, offset, limit, MAX_SNAPSHOT_PAGE_SIZE)?;
        let mut snapshots = Vec::new(&env);
        for id in start..end {
            let (config, state) = load_campaign_pair(&env, id)?;
            snapshots.push_back(CampaignSnapshot::from_parts(config, &state));
        }
        Ok(snapshots)
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` token base units to a campaign.
    ///
    /// The stored contribution and running total are written before the
    /// tokens are pulled into escrow, then the goal is re-checked. Returns the
    /// new running total.
    pub fn contribute(
        env: Env,
        campaign_id: u64,
        contributor: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        contributor.require_auth();
        let protocol = storage::get_config(&env)?;
        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;

        if state.closed {
            return Err(Error::CampaignClosed);
        }
        if env.ledger().timestamp() > config.deadline {
            return Err(Error::DeadlinePassed);
        }
        if amount <= 0 {
            return Err(Error::ZeroAmount);
        }

        acquire_lock(&env)?;

        let balance = storage::get_contribution(&env, campaign_id, &contributor)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        state.total_raised = state
            .total_raised
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        storage::set_contribution(&env, campaign_id, &contributor, balance);
        save_campaign_state(&env, campaign_id, &state);

        campaign::transfer(
            &env,
            &protocol,
            &contributor,
            &env.current_contract_address(),
            amount,
        )?;
        events::emit_funding_received(&env, campaign_id, contributor, amount, state.total_raised);

        if campaign::evaluate_goal(&env, &protocol, &config, &mut state)? {
            save_campaign_state(&env, campaign_id, &state);
        }

        release_lock(&env);
        Ok(state.total_raised)
    }

    /// Re-check the goal against the current price. Callable by anyone.
    ///
    /// A no-op on closed campaigns; once reached the flag never clears.
    pub fn check_goal_reached(env: Env, campaign_id: u64) -> Result<bool, Error> {
        let protocol = storage::get_config(&env)?;
        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;
        if state.closed || state.goal_reached {
            return Ok(state.goal_reached);
        }

        let reached = campaign::evaluate_goal(&env, &protocol, &config, &mut state)?;
        if reached {
            save_campaign_state(&env, campaign_id, &state);
        }
        Ok(reached)
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Close the campaign. Owner only, exactly once.
    ///
    /// Allowed once the deadline has passed or the goal was reached. If the
    /// goal holds after a final check, the whole escrow goes to the
    /// beneficiary; otherwise contributors can `claim_refund`. A failed payout
    /// reverts the call and leaves the campaign open.
    pub fn finalize_campaign(env: Env, campaign_id: u64, caller: Address) -> Result<bool, Error> {
        caller.require_auth();
        let protocol = storage::get_config(&env)?;
        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;

        if caller != config.owner {
            return Err(Error::Unauthorized);
        }
        if state.closed {
            return Err(Error::AlreadyClosed);
        }
        if env.ledger().timestamp() <= config.deadline && !state.goal_reached {
            return Err(Error::StillActive);
        }

        acquire_lock(&env)?;

        state.closed = true;
        campaign::evaluate_goal(&env, &protocol, &config, &mut state)?;

        let payout = state.total_raised;
        if state.goal_reached {
            state.funds_released = true;
        }
        save_campaign_state(&env, campaign_id, &state);
        events::emit_campaign_finalized(&env, campaign_id, payout, state.goal_reached);

        if state.goal_reached && payout > 0 {
            campaign::transfer(
                &env,
                &protocol,
                &env.current_contract_address(),
                &config.beneficiary,
                payout,
            )?;
            events::emit_funds_released(&env, campaign_id, config.beneficiary, payout);
        }

        release_lock(&env);
        Ok(state.goal_reached)
    }

    // ─────────────────────────────────────────────────────────
    // Contributor exits
    // ─────────────────────────────────────────────────────────

    /// Price-protection exit: withdraw the caller's whole contribution while
    /// the campaign is open and unfunded and the price is below the baseline.
    pub fn withdraw_contribution(
        env: Env,
        campaign_id: u64,
        contributor: Address,
    ) -> Result<i128, Error> {
        contributor.require_auth();
        let protocol = storage::get_config(&env)?;
        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;

        if state.closed {
            return Err(Error::CampaignClosed);
        }
        if state.goal_reached {
            return Err(Error::WithdrawalNotAllowed);
        }
        let amount = storage::get_contribution(&env, campaign_id, &contributor);
        if amount <= 0 {
            return Err(Error::NothingToRefund);
        }
        if !campaign::observe_price_drop(&env, &protocol, &config, &mut state)? {
            return Err(Error::WithdrawalNotAllowed);
        }

        acquire_lock(&env)?;

        storage::set_contribution(&env, campaign_id, &contributor, 0);
        state.total_raised -= amount;
        save_campaign_state(&env, campaign_id, &state);

        campaign::transfer(
            &env,
            &protocol,
            &env.current_contract_address(),
            &contributor,
            amount,
        )?;
        events::emit_funding_withdrawn(&env, campaign_id, contributor, amount);

        release_lock(&env);
        Ok(amount)
    }

    /// Deadline refund: recover the caller's contribution from a campaign
    /// that closed without reaching its goal.
    pub fn claim_refund(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        contributor.require_auth();
        let protocol = storage::get_config(&env)?;
        let mut state = load_campaign_state(&env, campaign_id)?;

        if !state.closed || state.goal_reached {
            return Err(Error::RefundNotAvailable);
        }
        let amount = storage::get_contribution(&env, campaign_id, &contributor);
        if amount <= 0 {
            return Err(Error::NothingToRefund);
        }

        acquire_lock(&env)?;

        storage::set_contribution(&env, campaign_id, &contributor, 0);
        state.total_raised -= amount;
        save_campaign_state(&env, campaign_id, &state);

        campaign::transfer(
            &env,
            &protocol,
            &env.current_contract_address(),
            &contributor,
            amount,
        )?;
        events::emit_refund_claimed(&env, campaign_id, contributor, amount);

        release_lock(&env);
        Ok(amount)
    }

    /// Record a price drop below the baseline, enabling withdrawals.
    /// Callable by anyone; returns whether withdrawals are allowed.
    pub fn check_price_drop(env: Env, campaign_id: u64) -> Result<bool, Error> {
        let protocol = storage::get_config(&env)?;
        let (config, mut state) = load_campaign_pair(&env, campaign_id)?;
        let was_enabled = state.refund_enabled;

        let dropped = campaign::observe_price_drop(&env, &protocol, &config, &mut state)?;
        if state.refund_enabled != was_enabled {
            save_campaign_state(&env, campaign_id, &state);
        }
        Ok(dropped)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Full campaign state in one read.
    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<CampaignSnapshot, Error> {
        let (config, state) = load_campaign_pair(&env, campaign_id)?;
        Ok(CampaignSnapshot::from_parts(config, &state))
    }

    pub fn get_contribution(env: Env, campaign_id: u64, contributor: Address) -> Result<i128, Error> {
        load_campaign_config(&env, campaign_id)?;
        Ok(storage::get_contribution(&env, campaign_id, &contributor))
    }

    /// Token units the protocol still holds for this campaign.
    pub fn escrow_balance(env: Env, campaign_id: u64) -> Result<i128, Error> {
        Ok(load_campaign_state(&env, campaign_id)?.escrowed())
    }

    /// Whether the current oracle price is below the campaign's baseline.
    pub fn price_has_dropped(env: Env, campaign_id: u64) -> Result<bool, Error> {
        let protocol = storage::get_config(&env)?;
        let config = load_campaign_config(&env, campaign_id)?;
        let quote = oracle::read_price(&env, &protocol)?;
        campaign::price_has_dropped(&quote, &config)
    }

    /// Funding progress valued at the current oracle price.
    pub fn get_progress(env: Env, campaign_id: u64) -> Result<CampaignProgress, Error> {
        let protocol = storage::get_config(&env)?;
        let (config, state) = load_campaign_pair(&env, campaign_id)?;

        let raised_usd = if state.total_raised > 0 {
            let quote = oracle::read_price(&env, &protocol)?;
            oracle::usd_value(state.total_raised, protocol.token_decimals, &quote)?
        } else {
            0
        };

        Ok(CampaignProgress {
            campaign_id,
            raised_usd,
            goal_usd: config.goal_usd,
            percent_funded: progress::percent_funded(raised_usd, config.goal_usd),
            days_remaining: progress::days_remaining(config.deadline, env.ledger().timestamp()),
        })
    }
}

/// Resolve `[start, end)` for a paginated registry read.
fn page_bounds(env: &Env, offset: u64, limit: u32, max: u32) -> Result<(u64, u64), Error> {
    let count = storage::campaign_count(env);
    if offset > count {
        return Err(Error::InvalidRange);
    }
    let limit = limit.min(max) as u64;
    Ok((offset, offset.saturating_add(limit).min(count)))
}
