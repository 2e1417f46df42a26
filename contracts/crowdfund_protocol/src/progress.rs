//! Funding progress arithmetic shared by `get_progress`.

pub const SECONDS_PER_DAY: u64 = 86_400;

/// `raised / goal * 100`, capped at 100. A non-positive goal reads as 0.
pub fn percent_funded(raised_usd: i128, goal_usd: i128) -> u32 {
    if goal_usd <= 0 || raised_usd <= 0 {
        return 0;
    }
    if raised_usd >= goal_usd {
        return 100;
    }
    // raised < goal, so the quotient is below 100; the multiplication only
    // overflows for goals near i128::MAX, where dividing first is exact enough.
    match raised_usd.checked_mul(100) {
        Some(scaled) => (scaled / goal_usd) as u32,
        None => (raised_usd / (goal_usd / 100)) as u32,
    }
}

/// Whole days left until `deadline`, rounded up; zero once it has passed.
pub fn days_remaining(deadline: u64, now: u64) -> u64 {
    if deadline <= now {
        return 0;
    }
    (deadline - now).div_ceil(SECONDS_PER_DAY)
}
