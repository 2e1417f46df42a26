extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger},
    Address, TryIntoVal,
};

use crate::events::RefundEnabled;
use crate::invariants::{assert_all_campaign_invariants, assert_total_matches_contributions};
use crate::testutils::{events_with_topic, Setup, DAY, EXPO, PRICE, UNIT};
use crate::Error;

/// Contributor C sends 10 tokens; the price falls before the deadline and
/// before the goal is met, so C can leave at once.
#[test]
fn test_withdraw_after_price_drop() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let contributor_c = s.funded_contributor(10);
    s.client.contribute(&id, &contributor_c, &(10 * UNIT));

    s.set_price(PRICE - 1);
    assert!(s.client.price_has_dropped(&id));

    assert_eq!(s.client.withdraw_contribution(&id, &contributor_c), 10 * UNIT);
    assert_eq!(s.token.balance(&contributor_c), 10 * UNIT);
    assert_eq!(s.client.get_contribution(&id, &contributor_c), 0);

    let campaign = s.client.get_campaign(&id);
    assert_eq!(campaign.total_raised, 0);
    assert!(campaign.refundable);
    assert!(!campaign.closed);
    assert_all_campaign_invariants(&campaign);

    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor_c),
        Err(Ok(Error::NothingToRefund))
    );
}

#[test]
fn test_withdraw_without_price_drop_fails() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let contributor = s.funded_contributor(10);
    s.client.contribute(&id, &contributor, &(10 * UNIT));

    assert!(!s.client.price_has_dropped(&id));
    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor),
        Err(Ok(Error::WithdrawalNotAllowed))
    );

    // A higher price is not a drop either.
    s.set_price(PRICE * 2);
    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor),
        Err(Ok(Error::WithdrawalNotAllowed))
    );
    assert_eq!(s.client.get_contribution(&id, &contributor), 10 * UNIT);
}

#[test]
fn test_withdraw_after_goal_reached_fails() {
    let s = Setup::new();
    let id = s.create_campaign(1_000, 14);
    let contributor = s.funded_contributor(200);
    s.client.contribute(&id, &contributor, &(200 * UNIT));
    assert!(s.client.get_campaign(&id).goal_reached);

    s.set_price(PRICE / 4);
    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor),
        Err(Ok(Error::WithdrawalNotAllowed))
    );
}

#[test]
fn test_withdraw_after_close_fails() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let contributor = s.funded_contributor(10);
    s.client.contribute(&id, &contributor, &(10 * UNIT));

    s.advance(15 * DAY);
    s.client.finalize_campaign(&id, &s.owner);
    s.set_price(PRICE / 2);

    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor),
        Err(Ok(Error::CampaignClosed))
    );
    // The deadline refund path is the way out instead.
    assert_eq!(s.client.claim_refund(&id, &contributor), 10 * UNIT);
}

#[test]
fn test_withdraw_allowed_after_deadline_before_close() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let contributor = s.funded_contributor(10);
    s.client.contribute(&id, &contributor, &(10 * UNIT));

    s.advance(20 * DAY);
    s.set_price(PRICE / 2);
    assert_eq!(s.client.withdraw_contribution(&id, &contributor), 10 * UNIT);
}

#[test]
fn test_withdraw_without_contribution_fails() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    s.set_price(PRICE / 2);

    let stranger = Address::generate(&s.env);
    assert_eq!(
        s.client.try_withdraw_contribution(&id, &stranger),
        Err(Ok(Error::NothingToRefund))
    );
}

#[test]
fn test_withdraw_fails_closed_when_oracle_is_down() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let contributor = s.funded_contributor(10);
    s.client.contribute(&id, &contributor, &(10 * UNIT));

    s.oracle.set_broken(&true);
    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor),
        Err(Ok(Error::OracleUnavailable))
    );
    assert_eq!(
        s.client.try_price_has_dropped(&id),
        Err(Ok(Error::OracleUnavailable))
    );
}

#[test]
fn test_partial_exit_keeps_other_balances() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let leaver = s.funded_contributor(10);
    let stayer = s.funded_contributor(30);
    s.client.contribute(&id, &leaver, &(10 * UNIT));
    s.client.contribute(&id, &stayer, &(30 * UNIT));

    s.set_price(PRICE / 2);
    s.client.withdraw_contribution(&id, &leaver);

    assert_eq!(s.client.get_campaign(&id).total_raised, 30 * UNIT);
    assert_eq!(s.client.get_contribution(&id, &stayer), 30 * UNIT);
    assert_eq!(s.token.balance(&s.client.address), 30 * UNIT);
    assert_total_matches_contributions(&s, id, &[leaver, stayer]);
}

#[test]
fn test_check_price_drop_latches_refund_flag_once() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);

    assert!(!s.client.check_price_drop(&id));
    assert!(!s.client.get_campaign(&id).refundable);

    s.set_price(PRICE / 2);
    assert!(s.client.check_price_drop(&id));

    let emitted = events_with_topic(&s.env, symbol_short!("refund_on"));
    assert_eq!(emitted.len(), 1);
    let event: RefundEnabled = emitted[0].try_into_val(&s.env).unwrap();
    assert_eq!(
        event,
        RefundEnabled {
            campaign_id: id,
            current_price: PRICE / 2,
            current_expo: EXPO,
            baseline_price: PRICE,
            baseline_expo: EXPO,
        }
    );
    assert!(s.client.get_campaign(&id).refundable);

    // Already latched: no second event.
    assert!(s.client.check_price_drop(&id));
    assert!(events_with_topic(&s.env, symbol_short!("refund_on")).is_empty());

    // Price recovery does not clear the flag but stops new withdrawals.
    s.set_price(PRICE);
    assert!(!s.client.check_price_drop(&id));
    assert!(s.client.get_campaign(&id).refundable);
}

/// The feed moves to a finer exponent; the same dollar price is not a drop.
#[test]
fn test_price_drop_compares_across_exponents() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 14);
    let contributor = s.funded_contributor(10);
    s.client.contribute(&id, &contributor, &(10 * UNIT));
    let now = s.env.ledger().timestamp();

    // $10.000000000 at expo -9: a larger mantissa for the same value.
    s.oracle.set_price(&(PRICE * 10), &(EXPO - 1), &now);
    assert!(!s.client.price_has_dropped(&id));
    assert_eq!(
        s.client.try_withdraw_contribution(&id, &contributor),
        Err(Ok(Error::WithdrawalNotAllowed))
    );

    // $9.999999999 at expo -9 is below the $10 baseline.
    s.oracle.set_price(&(PRICE * 10 - 1), &(EXPO - 1), &now);
    assert!(s.client.price_has_dropped(&id));

    // Coarser exponents are compared by value too: $10 and then $9.
    s.oracle.set_price(&1, &1, &now);
    assert!(!s.client.price_has_dropped(&id));
    s.oracle.set_price(&9, &0, &now);
    assert!(s.client.price_has_dropped(&id));

    assert_eq!(s.client.withdraw_contribution(&id, &contributor), 10 * UNIT);
}
