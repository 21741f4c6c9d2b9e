use crate::types::Agent;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const BASE_SCORE: u64 = 50;
pub const FEEDBACK_BONUS_CAP: u64 = 250;
pub const COMPLETION_BONUS_CAP: u64 = 500;

const FRACTION_BITS: u32 = 40;

/// `floor(log2(max(staked_sol, 1)) * 10)` in integer arithmetic, truncating.
///
/// The integer part of the logarithm is found by doubling. The first decimal
/// comes from the bit length of `mantissa^10`, where `mantissa` is the
/// remaining factor in `[1, 2)` held as Q40 fixed point. Each step rounds
/// down, so just above a tenth boundary the result can land one tenth low.
/// It never overshoots and stays non-decreasing.
pub fn stake_score(staked_lamports: u64) -> u64 {
    if staked_lamports <= LAMPORTS_PER_SOL {
        return 0;
    }
    let lamports = staked_lamports as u128;
    let unit = LAMPORTS_PER_SOL as u128;

    let mut whole: u32 = 0;
    while unit << (whole + 1) <= lamports {
        whole += 1;
    }

    let one = 1u128 << FRACTION_BITS;
    let mantissa = (lamports << FRACTION_BITS) / (unit << whole);
    let mut power = one;
    for _ in 0..10 {
        power = (power * mantissa) >> FRACTION_BITS;
    }
    let tenths = (127 - power.leading_zeros()).saturating_sub(FRACTION_BITS).min(9);

    (whole as u64) * 10 + tenths as u64
}

/// Grows with both the number of reviews and their average rating: every new
/// rating adds between 1 and 5 points until the cap.
pub fn feedback_bonus(rating_total: u64) -> u64 {
    rating_total.min(FEEDBACK_BONUS_CAP)
}

pub fn completion_bonus(services_completed: u64) -> u64 {
    services_completed.min(COMPLETION_BONUS_CAP)
}

pub fn score(agent: &Agent) -> u64 {
    stake_score(agent.total_staked)
        + BASE_SCORE
        + feedback_bonus(agent.rating_total)
        + completion_bonus(agent.services_completed)
}

/// Recomputes the stored score from the agent's current counters.
pub fn refresh(agent: &mut Agent) -> u64 {
    agent.reputation_score = score(agent);
    agent.reputation_score
}
