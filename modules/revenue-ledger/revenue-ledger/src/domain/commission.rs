//! Commission arithmetic in integer cents.

/// Basis points in a whole (100%).
pub const BPS_SCALE: i64 = 10_000;

/// `amount_cents * rate_bps / 10_000`, rounded half away from zero.
///
/// Returns `None` on overflow.
#[must_use]
pub fn round_commission(amount_cents: i64, rate_bps: i32) -> Option<i64> {
    let product = amount_cents.checked_mul(i64::from(rate_bps))?;
    let half = BPS_SCALE / 2;
    if product >= 0 {
        Some(product.checked_add(half)? / BPS_SCALE)
    } else {
        Some(-(product.checked_neg()?.checked_add(half)? / BPS_SCALE))
    }
}

/// The commission for a positive amount, if the rate lies in
/// `1..=BPS_SCALE` and the result satisfies `0 < commission <= amount`.
#[must_use]
pub fn checked_commission(amount_cents: i64, rate_bps: i32) -> Option<i64> {
    if !(1..=BPS_SCALE).contains(&i64::from(rate_bps)) {
        return None;
    }
    round_commission(amount_cents, rate_bps).filter(|c| *c > 0 && *c <= amount_cents)
}
