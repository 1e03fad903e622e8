//! Cricket constants and the rate arithmetic shared by every projection.
//!
//! Rates are computed over legal balls. A zero denominator yields `0.0`,
//! never NaN or infinity.

/// Legal deliveries in one over
pub const BALLS_PER_OVER: u32 = 6;

/// Wickets that end an innings
pub const MAX_WICKETS: u32 = 10;

/// Runs per six legal balls.
///
/// Returns `0.0` when `legal_balls` is zero.
#[must_use]
pub fn per_over_rate(runs: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    f64::from(runs) / (f64::from(legal_balls) / f64::from(BALLS_PER_OVER))
}

/// Render a rate with two decimals (`12.00`).
#[must_use]
pub fn format_rate(rate: f64) -> String {
    if rate.is_finite() {
        format!("{:.2}", rate)
    } else {
        "0.00".to_string()
    }
}

/// Render legal balls as overs notation.
///
/// `26` balls is `4.2`; a whole number of overs drops the suffix (`24` is `4`).
#[must_use]
pub fn format_overs(legal_balls: u32) -> String {
    let overs = legal_balls / BALLS_PER_OVER;
    let balls = legal_balls % BALLS_PER_OVER;
    if balls == 0 {
        overs.to_string()
    } else {
        format!("{}.{}", overs, balls)
    }
}
