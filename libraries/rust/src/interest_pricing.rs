//! Conversions between yearly interest rates and fixed term ticket prices.
//!
//! The integer implementations here are canonical: order placement feeds
//! their output straight into orderbook instruction arguments, so they carry
//! out every intermediate step in 128 bits and truncate exactly once, the
//! same way the on-chain program does. The f64 helpers at the bottom are for
//! UI display only and must never be routed back into order math.

use std::f64::consts::E;

use crate::error::{PricingError, Result};
use crate::fp32::FP32_ONE;

/// Seconds in the year that interest rates are quoted against
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Basis points in one year of seconds, the common scale factor of both
/// conversions
const BPS_YEAR_SCALE: u128 = 10_000 * SECONDS_PER_YEAR as u128;

/// Given an interest rate and market tenor, calculate a price
///
/// interest_rate_bps: yearly rate in basis points
/// tenor_seconds: length of the loan term
/// return: underlying per ticket, fixed point 32
///
/// price = 1 / (1 + rate * tenor / year)
pub fn rate_to_price(interest_rate_bps: u64, tenor_seconds: u64) -> Result<u64> {
    if tenor_seconds == 0 {
        return Err(PricingError::InvalidTenor);
    }

    let growth = interest_rate_bps as u128 * tenor_seconds as u128;
    let price = (FP32_ONE * BPS_YEAR_SCALE) / (BPS_YEAR_SCALE + growth);
    if price == 0 {
        // the rate is too extreme for a representable nonzero price
        return Err(PricingError::Overflow);
    }

    // price <= FP32_ONE, always fits
    Ok(price as u64)
}

/// Given a price and market tenor, calculate an interest rate
///
/// price: underlying per ticket, fixed point 32
/// tenor_seconds: length of the loan term
/// return: yearly rate in basis points, rounded to the nearest point
///
/// Exact inverse of [rate_to_price] up to fp32 truncation. One fp32 price
/// step spans about `73 / tenor_seconds` basis points, so round trips are
/// within one basis point for any tenor longer than roughly two minutes.
pub fn price_to_rate(price: u64, tenor_seconds: u64) -> Result<u64> {
    if tenor_seconds == 0 {
        return Err(PricingError::InvalidTenor);
    }
    // a price of zero is an infinite rate, and a price above one is
    // negative interest. neither is a loan this market can express.
    if price == 0 || price as u128 > FP32_ONE {
        return Err(PricingError::InvalidPrice);
    }

    let numer = (FP32_ONE - price as u128) * BPS_YEAR_SCALE;
    let denom = price as u128 * tenor_seconds as u128;

    u64::try_from((numer + denom / 2) / denom).map_err(|_| PricingError::Overflow)
}

/// Converts a fixed point 32 price to an f64 for UI display
pub fn fp32_to_f64(fp: u64) -> f64 {
    (fp as f64) / FP32_ONE as f64
}

pub fn f64_to_fp32(f: f64) -> u64 {
    let shifted = f * FP32_ONE as f64;
    assert!(shifted <= u64::MAX as f64);
    assert!(shifted >= 0.0);
    shifted.round() as u64
}

pub fn f64_to_bps(f: f64) -> u64 {
    let bps = f * 10_000.0;
    assert!(bps <= u64::MAX as f64);
    assert!(bps >= 0.0);
    bps.round() as u64
}

pub fn bps_to_f64(bps: u64) -> f64 {
    bps as f64 / 10_000.0
}

/// The total yield of a continuously compounded rate over some term, for
/// displaying an equivalent compounded return next to the quoted rate
pub fn rate_to_yield(rate: f64, rate_term: f64, yield_term: f64) -> f64 {
    E.powf(rate * yield_term / rate_term) - 1f64
}

/// Inverse of [rate_to_yield]
pub fn yield_to_rate(yld: f64, yield_term: f64, rate_term: f64) -> f64 {
    (yld + 1.0).ln() * rate_term / yield_term
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn price_of_one_is_zero_interest() {
        assert_eq!(Ok(1 << 32), rate_to_price(0, SECONDS_PER_YEAR));
        assert_eq!(Ok(0), price_to_rate(1 << 32, SECONDS_PER_YEAR));
    }

    #[test]
    fn full_rate_over_a_year_halves_the_price() {
        assert_eq!(Ok(1 << 31), rate_to_price(10_000, SECONDS_PER_YEAR));
        assert_eq!(Ok(10_000), price_to_rate(1 << 31, SECONDS_PER_YEAR));
    }

    #[test]
    fn tenor_scales_the_rate() {
        let one_day = 24 * 60 * 60;
        let price = rate_to_price(500, one_day).unwrap();

        // 5% over a single day barely discounts the ticket
        assert!(price < 1 << 32);
        assert!(price > f64_to_fp32(0.999));
        assert_eq!(Ok(500), price_to_rate(price, one_day));
    }

    #[test]
    fn zero_tenor_is_rejected() {
        assert_eq!(Err(PricingError::InvalidTenor), rate_to_price(100, 0));
        assert_eq!(Err(PricingError::InvalidTenor), price_to_rate(1 << 31, 0));
    }

    #[test]
    fn nonsense_prices_are_rejected() {
        // zero price means infinite interest
        assert_eq!(
            Err(PricingError::InvalidPrice),
            price_to_rate(0, SECONDS_PER_YEAR)
        );
        // 1.5 in fp32 means negative interest
        assert_eq!(
            Err(PricingError::InvalidPrice),
            price_to_rate(3 << 31, SECONDS_PER_YEAR)
        );
    }

    #[test]
    fn tiny_price_over_tiny_tenor_overflows_the_rate() {
        assert_eq!(Err(PricingError::Overflow), price_to_rate(1, 1));
    }

    #[test]
    fn extreme_rate_cannot_produce_a_zero_price() {
        assert_eq!(
            Err(PricingError::Overflow),
            rate_to_price(u64::MAX, SECONDS_PER_YEAR)
        );
    }

    #[test]
    fn conversions() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for _ in 0..1024 {
            let rate = rng.gen_range(1..=10_000u64);
            // an hour out to ten years; below a couple of minutes the fp32
            // price grid is coarser than a basis point
            let tenor = rng.gen_range(3_600..=10 * SECONDS_PER_YEAR);

            let price = rate_to_price(rate, tenor).unwrap();
            let recovered = price_to_rate(price, tenor).unwrap();
            assert!(
                recovered.abs_diff(rate) <= 1,
                "rate {rate} tenor {tenor} recovered {recovered}"
            );
        }
    }

    #[test]
    fn display_helpers() {
        assert_eq!(f64_to_fp32(0.5), 1 << 31);
        assert_eq!(fp32_to_f64(1 << 31), 0.5);
        assert_eq!(f64_to_bps(0.05), 500);
        assert_eq!(bps_to_f64(500), 0.05);
    }

    #[test]
    fn happy_path_yields() {
        roughly_eq(0.105_170_918, rate_to_yield(0.1, 1.0, 1.0));
        roughly_eq(0.1, yield_to_rate(rate_to_yield(0.1, 1.0, 1.0), 1.0, 1.0));
    }

    fn roughly_eq(x: f64, y: f64) {
        let diff = (x - y).abs();
        if diff > 0.000_000_001 * x || diff > 0.000_000_001 * y {
            panic!("\nnot roughly equal:\n  {x}\n  {y}\n")
        }
    }
}
