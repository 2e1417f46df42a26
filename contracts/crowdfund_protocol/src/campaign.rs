//! # Campaign state machine
//!
//! Transitions shared by the entry points in `lib.rs`. Functions here mutate a
//! loaded [`CampaignState`] in place and leave persisting it to the caller, so
//! an entry point commits all of its effects with a single state write before
//! moving any tokens.

use soroban_sdk::{token, Address, Env};

use crate::events;
use crate::oracle::{self, PriceQuote};
use crate::types::{CampaignConfig, CampaignMetadata, CampaignState, ProtocolConfig};
use crate::Error;

/// Five years.
pub const MAX_DURATION_DAYS: u32 = 1_825;
pub const MAX_TITLE_LEN: u32 = 64;
pub const MAX_DESCRIPTION_LEN: u32 = 512;

/// Reject creation arguments that could never form a valid campaign.
pub fn validate_params(
    env: &Env,
    beneficiary: &Address,
    goal_usd: i128,
    duration_days: u32,
    metadata: &CampaignMetadata,
) -> Result<(), Error> {
    if goal_usd <= 0 {
        return Err(Error::InvalidArgument);
    }
    if duration_days == 0 || duration_days > MAX_DURATION_DAYS {
        return Err(Error::InvalidArgument);
    }
    // Funds released to the protocol itself could never leave escrow.
    if *beneficiary == env.current_contract_address() {
        return Err(Error::InvalidArgument);
    }
    let title_len = metadata.title.len();
    if title_len == 0 || title_len > MAX_TITLE_LEN {
        return Err(Error::InvalidArgument);
    }
    if metadata.description.len() > MAX_DESCRIPTION_LEN {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// Re-check the funding goal against the oracle.
///
/// Never clears `goal_reached`. Skips the oracle entirely when the flag is
/// already set or nothing has been raised.
pub fn evaluate_goal(
    env: &Env,
    protocol: &ProtocolConfig,
    config: &CampaignConfig,
    state: &mut CampaignState,
) -> Result<bool, Error> {
    if state.goal_reached {
        return Ok(true);
    }
    if state.total_raised <= 0 {
        return Ok(false);
    }

    let quote = oracle::read_price(env, protocol)?;
    let raised_usd = oracle::usd_value(state.total_raised, protocol.token_decimals, &quote)?;

    if raised_usd >= config.goal_usd {
        state.goal_reached = true;
        events::emit_goal_reached(env, config.id, state.total_raised, raised_usd);
    }
    Ok(state.goal_reached)
}

/// Compare the current price against the creation baseline.
///
/// Both sides are brought to the finer of the two exponents first, so a feed
/// that changes its `expo` is still compared by value.
pub fn price_has_dropped(quote: &PriceQuote, config: &CampaignConfig) -> Result<bool, Error> {
    let expo = quote.expo.min(config.baseline_expo);
    let current = oracle::rescale(quote.price, quote.expo, expo)?;
    let baseline = oracle::rescale(config.baseline_price, config.baseline_expo, expo)?;
    Ok(current < baseline)
}

/// Read the oracle and, if the price fell below the baseline while the
/// campaign is still open and unfunded, latch `refund_enabled`.
///
/// Returns whether price-protection withdrawals are currently allowed.
pub fn observe_price_drop(
    env: &Env,
    protocol: &ProtocolConfig,
    config: &CampaignConfig,
    state: &mut CampaignState,
) -> Result<bool, Error> {
    if state.closed || state.goal_reached {
        return Ok(false);
    }

    let quote = oracle::read_price(env, protocol)?;
    if !price_has_dropped(&quote, config)? {
        return Ok(false);
    }

    if !state.refund_enabled {
        state.refund_enabled = true;
        events::emit_refund_enabled(
            env,
            config.id,
            quote.price,
            quote.expo,
            config.baseline_price,
            config.baseline_expo,
        );
    }
    Ok(true)
}

/// Move `amount` of the protocol token, mapping any failure to
/// [`Error::TransferFailed`] so the entry point reverts as a whole.
pub fn transfer(
    env: &Env,
    protocol: &ProtocolConfig,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = token::Client::new(env, &protocol.token);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}
