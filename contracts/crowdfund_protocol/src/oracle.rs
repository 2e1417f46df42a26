//! # Price oracle
//!
//! The oracle is an external contract answering
//! `get_price(feed_id) -> (price, expo, publish_time)`, where the real price is
//! `price * 10^expo`. Reads are fail-closed: a trapping oracle, a non-positive
//! price or a quote older than `max_price_age` all surface as
//! [`Error::OracleUnavailable`] and abort the calling entry point.

use soroban_sdk::{contractclient, BytesN, Env};

use crate::types::ProtocolConfig;
use crate::Error;

/// USD amounts are 18-decimal fixed point.
pub const USD_DECIMALS: i32 = 18;

/// Interface the configured oracle contract must implement.
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    fn get_price(env: Env, feed_id: BytesN<32>) -> (i128, i32, u64);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceQuote {
    pub price: i128,
    pub expo: i32,
    pub publish_time: u64,
}

/// Fetch a fresh quote for the configured feed.
pub fn read_price(env: &Env, config: &ProtocolConfig) -> Result<PriceQuote, Error> {
    let client = PriceOracleClient::new(env, &config.oracle);
    let (price, expo, publish_time) = match client.try_get_price(&config.feed_id) {
        Ok(Ok(reading)) => reading,
        _ => return Err(Error::OracleUnavailable),
    };

    if price <= 0 {
        return Err(Error::OracleUnavailable);
    }

    let now = env.ledger().timestamp();
    if now.saturating_sub(publish_time) > config.max_price_age {
        return Err(Error::OracleUnavailable);
    }

    Ok(PriceQuote {
        price,
        expo,
        publish_time,
    })
}

/// Convert `amount` token base units into 18-decimal USD.
///
/// `usd = amount * price * 10^(18 - token_decimals + expo)`; the signed
/// exponent is applied as one power of ten so precision is only lost once.
pub fn usd_value(amount: i128, token_decimals: u32, quote: &PriceQuote) -> Result<i128, Error> {
    let token_decimals = i32::try_from(token_decimals).map_err(|_| Error::Overflow)?;
    let exponent = USD_DECIMALS - token_decimals + quote.expo;

    let value = amount.checked_mul(quote.price).ok_or(Error::Overflow)?;
    let scale = 10i128
        .checked_pow(exponent.unsigned_abs())
        .ok_or(Error::Overflow)?;

    if exponent >= 0 {
        value.checked_mul(scale).ok_or(Error::Overflow)
    } else {
        Ok(value / scale)
    }
}

/// Express `value * 10^from_expo` as a mantissa at `to_expo`.
///
/// `to_expo` must not exceed `from_expo`, so the result is exact.
pub fn rescale(value: i128, from_expo: i32, to_expo: i32) -> Result<i128, Error> {
    let shift = from_expo
        .checked_sub(to_expo)
        .filter(|d| *d >= 0)
        .ok_or(Error::Overflow)?;
    let scale = 10i128
        .checked_pow(shift.unsigned_abs())
        .ok_or(Error::Overflow)?;
    value.checked_mul(scale).ok_or(Error::Overflow)
}
