#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::testutils::Setup;
use crate::CampaignSnapshot;

/// INV-1: Campaign goal must always be positive.
pub fn assert_goal_positive(campaign: &CampaignSnapshot) {
    assert!(
        campaign.goal_usd > 0,
        "INV-1 violated: campaign {} has non-positive goal ({})",
        campaign.id,
        campaign.goal_usd
    );
}

/// INV-2: The deadline lies strictly after creation.
pub fn assert_deadline_after_creation(campaign: &CampaignSnapshot) {
    assert!(
        campaign.deadline > campaign.created_at,
        "INV-2 violated: campaign {} deadline {} not after creation {}",
        campaign.id,
        campaign.deadline,
        campaign.created_at
    );
}

/// INV-3: Raised total is never negative.
pub fn assert_total_non_negative(campaign: &CampaignSnapshot) {
    assert!(
        campaign.total_raised >= 0,
        "INV-3 violated: campaign {} has negative total ({})",
        campaign.id,
        campaign.total_raised
    );
}

/// INV-4: Funds are only released by a closed, successful campaign, and a
/// successful campaign never offers refunds.
pub fn assert_release_consistent(campaign: &CampaignSnapshot) {
    if campaign.funds_released {
        assert!(
            campaign.closed && campaign.goal_reached,
            "INV-4 violated: campaign {} released funds without closing successfully",
            campaign.id
        );
    }
    if campaign.goal_reached {
        assert!(
            !campaign.refundable,
            "INV-4 violated: campaign {} is refundable after reaching its goal",
            campaign.id
        );
    }
}

/// INV-5: Flags only move forward.
///   closed:       false -> true
///   goal_reached: false -> true
pub fn assert_valid_transition(before: &CampaignSnapshot, after: &CampaignSnapshot) {
    assert!(
        !before.closed || after.closed,
        "INV-5 violated: campaign {} re-opened",
        before.id
    );
    assert!(
        !before.goal_reached || after.goal_reached,
        "INV-5 violated: campaign {} lost goal_reached",
        before.id
    );
    assert!(
        !before.funds_released || after.funds_released,
        "INV-5 violated: campaign {} un-released funds",
        before.id
    );
}

/// INV-6: Fields fixed at creation never change.
pub fn assert_immutable_fields(original: &CampaignSnapshot, current: &CampaignSnapshot) {
    assert_eq!(original.id, current.id, "INV-6 violated: campaign id changed");
    assert_eq!(
        original.owner, current.owner,
        "INV-6 violated: campaign owner changed"
    );
    assert_eq!(
        original.beneficiary, current.beneficiary,
        "INV-6 violated: campaign beneficiary changed"
    );
    assert_eq!(
        original.goal_usd, current.goal_usd,
        "INV-6 violated: campaign goal changed"
    );
    assert_eq!(
        original.deadline, current.deadline,
        "INV-6 violated: campaign deadline changed"
    );
    assert_eq!(
        original.baseline_price, current.baseline_price,
        "INV-6 violated: campaign baseline price changed"
    );
    assert_eq!(
        original.baseline_expo, current.baseline_expo,
        "INV-6 violated: campaign baseline exponent changed"
    );
    assert_eq!(
        original.metadata, current.metadata,
        "INV-6 violated: campaign metadata changed"
    );
}

/// INV-7: Until funds are released, the raised total equals the sum of the
/// stored contributions of `contributors` (which must be every contributor).
pub fn assert_total_matches_contributions(s: &Setup, campaign_id: u64, contributors: &[Address]) {
    let campaign = s.client.get_campaign(&campaign_id);
    if campaign.funds_released {
        return;
    }
    let sum: i128 = contributors
        .iter()
        .map(|c| s.client.get_contribution(&campaign_id, c))
        .sum();
    assert_eq!(
        campaign.total_raised, sum,
        "INV-7 violated: campaign {} total {} != sum of contributions {}",
        campaign_id, campaign.total_raised, sum
    );
    assert_eq!(
        s.client.escrow_balance(&campaign_id),
        sum,
        "INV-7 violated: campaign {} escrow differs from contributions",
        campaign_id
    );
}

/// Run all stateless campaign invariants.
pub fn assert_all_campaign_invariants(campaign: &CampaignSnapshot) {
    assert_goal_positive(campaign);
    assert_deadline_after_creation(campaign);
    assert_total_non_negative(campaign);
    assert_release_consistent(campaign);
}
