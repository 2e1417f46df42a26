extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, BytesN, IntoVal, Symbol, TryIntoVal,
};

use crate::events::{
    CampaignCreated, CampaignFinalized, FundingReceived, FundsReleased, GoalReached,
    OracleUpdated, RefundClaimed,
};
use crate::testutils::{events_with_topic, Setup, DAY, START_TIME, UNIT, USD};

#[test]
fn test_campaign_created_event() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 30);
    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("created"), campaign_id)
    assert_eq!(last_event.0, s.client.address);
    let expected_topics = vec![
        &s.env,
        symbol_short!("created").into_val(&s.env),
        id.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CampaignCreated = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        CampaignCreated {
            campaign_id: id,
            owner: s.owner.clone(),
            beneficiary: s.beneficiary.clone(),
            goal_usd: 5_000 * USD,
            deadline: START_TIME + 30 * DAY,
        }
    );
}

#[test]
fn test_funding_received_event() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 30);
    let contributor = s.funded_contributor(25);

    s.client.contribute(&id, &contributor, &(10 * UNIT));
    s.client.contribute(&id, &contributor, &(15 * UNIT));

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &s.env,
        symbol_short!("funded").into_val(&s.env),
        id.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundingReceived = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        FundingReceived {
            campaign_id: id,
            contributor,
            amount: 15 * UNIT,
            new_total: 25 * UNIT,
        }
    );
    assert!(events_with_topic(&s.env, symbol_short!("goal_met")).is_empty());
}

#[test]
fn test_goal_reached_event_on_contribution() {
    let s = Setup::new();
    let id = s.create_campaign(1_000, 30);
    let contributor = s.funded_contributor(100);

    // 100 tokens at $10 is exactly the goal.
    s.client.contribute(&id, &contributor, &(100 * UNIT));

    let emitted = events_with_topic(&s.env, symbol_short!("goal_met"));
    assert_eq!(emitted.len(), 1);
    let event_data: GoalReached = emitted[0].try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        GoalReached {
            campaign_id: id,
            total_raised: 100 * UNIT,
            raised_usd: 1_000 * USD,
        }
    );

    // Re-checking a reached goal is silent.
    s.client.check_goal_reached(&id);
    assert!(events_with_topic(&s.env, symbol_short!("goal_met")).is_empty());
}

#[test]
fn test_finalized_and_released_events() {
    let s = Setup::new();
    let id = s.create_campaign(1_000, 30);
    let contributor = s.funded_contributor(150);
    s.client.contribute(&id, &contributor, &(150 * UNIT));

    s.advance(31 * DAY);
    s.client.finalize_campaign(&id, &s.owner);

    let finalized = events_with_topic(&s.env, symbol_short!("finalized"));
    assert_eq!(finalized.len(), 1);
    let finalized: CampaignFinalized = finalized[0].try_into_val(&s.env).unwrap();
    assert_eq!(
        finalized,
        CampaignFinalized {
            campaign_id: id,
            total_raised: 150 * UNIT,
            goal_reached: true,
        }
    );

    let released = events_with_topic(&s.env, symbol_short!("released"));
    assert_eq!(released.len(), 1);
    let released: FundsReleased = released[0].try_into_val(&s.env).unwrap();
    assert_eq!(
        released,
        FundsReleased {
            campaign_id: id,
            beneficiary: s.beneficiary.clone(),
            amount: 150 * UNIT,
        }
    );
}

#[test]
fn test_failed_campaign_emits_no_release() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 7);
    let contributor = s.funded_contributor(20);
    s.client.contribute(&id, &contributor, &(20 * UNIT));

    s.advance(8 * DAY);
    s.client.finalize_campaign(&id, &s.owner);

    let finalized = events_with_topic(&s.env, symbol_short!("finalized"));
    let finalized: CampaignFinalized = finalized[0].try_into_val(&s.env).unwrap();
    assert!(!finalized.goal_reached);
    assert!(events_with_topic(&s.env, symbol_short!("released")).is_empty());
}

#[test]
fn test_refund_claimed_event() {
    let s = Setup::new();
    let id = s.create_campaign(5_000, 7);
    let contributor = s.funded_contributor(20);
    s.client.contribute(&id, &contributor, &(20 * UNIT));
    s.advance(8 * DAY);
    s.client.finalize_campaign(&id, &s.owner);

    s.client.claim_refund(&id, &contributor);

    let all_events = s.env.events().all();
    let last_event = all_events.last().expect("No events found");
    let expected_topics = vec![
        &s.env,
        symbol_short!("refunded").into_val(&s.env),
        id.into_val(&s.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: RefundClaimed = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        RefundClaimed {
            campaign_id: id,
            contributor,
            amount: 20 * UNIT,
        }
    );
}

#[test]
fn test_oracle_updated_event() {
    let s = Setup::new();
    let new_oracle = Address::generate(&s.env);
    let new_feed = BytesN::from_array(&s.env, &[0x22u8; 32]);

    s.client.set_oracle(&s.admin, &new_oracle, &new_feed);

    let emitted = events_with_topic(&s.env, Symbol::new(&s.env, "oracle_set"));
    assert_eq!(emitted.len(), 1);
    let event_data: OracleUpdated = emitted[0].try_into_val(&s.env).unwrap();
    assert_eq!(
        event_data,
        OracleUpdated {
            oracle: new_oracle,
            feed_id: new_feed,
        }
    );
}
