//! Order size and limit price primitives for the fixed term orderbook.
//!
//! Base is the ticket quantity, principal plus interest. Quote is the
//! underlying principal token quantity. The fixed point 32 limit price is
//! embedded verbatim in orderbook instruction arguments, so the truncation
//! here defines the economic terms of the order.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

use crate::error::{PricingError, Result};
use crate::fp32::Fp32;

/// The three primitives the orderbook matching engine needs from an order
#[derive(Pod, Zeroable, Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct OrderAmount {
    /// Maximum ticket quantity to trade
    pub base: u64,
    /// Maximum underlying token quantity to trade
    pub quote: u64,
    /// Limit price as underlying per ticket, fixed point 32
    pub price: u64,
}

const_assert_eq!(std::mem::size_of::<OrderAmount>(), 24);

impl OrderAmount {
    /// Calculate an `OrderAmount` from an amount being traded and a desired
    /// interest rate over the market tenor
    ///
    /// amount: principal in token lamports
    /// interest_bps: interest over the tenor, in basis points
    pub fn from_amount_rate(amount: u64, interest_bps: u64) -> Result<Self> {
        if amount == 0 {
            return Err(PricingError::InvalidAmount);
        }

        let interest = (amount as u128 * interest_bps as u128) / 10_000;
        let base = u64::try_from(amount as u128 + interest).map_err(|_| PricingError::Overflow)?;
        let price = calculate_implied_price(base, amount)?;

        Ok(Self {
            base,
            quote: amount,
            price,
        })
    }
}

/// For calculation of an implied limit price given to the orderbook
///
/// Base is principal plus interest
///
/// Quote is principal
///
/// Example usage
/// ```
/// // 100 token lamports at 10% interest
/// let price = jet_pricing::orderbook::calculate_implied_price(110, 100).unwrap();
/// ```
pub fn calculate_implied_price(base: u64, quote: u64) -> Result<u64> {
    if base == 0 || quote == 0 {
        return Err(PricingError::InvalidAmount);
    }

    let price = (Fp32::from(quote) / base)
        .downcast_u64()
        .ok_or(PricingError::Overflow)?;
    if price == 0 {
        // a zero limit price would post the order at infinite interest
        return Err(PricingError::Overflow);
    }

    Ok(price)
}

/// Given a base quantity and fixed point 32 price, calculate the quote
pub fn base_to_quote(base: u64, price: u64) -> Result<u64> {
    Fp32::upcast_fp32(price)
        .u64_mul(base)
        .ok_or(PricingError::Overflow)
}

/// Given a quote quantity and fixed point 32 price, calculate the base
pub fn quote_to_base(quote: u64, price: u64) -> Result<u64> {
    if price == 0 {
        return Err(PricingError::InvalidPrice);
    }

    Fp32::upcast_fp32(price)
        .u64_div(quote)
        .ok_or(PricingError::Overflow)
}

/// Given a fixed point 32 value, truncate to its decimal representation
pub fn fixed_point_to_decimal(fp: u64) -> u64 {
    // a u64 shifted right always fits
    Fp32::upcast_fp32(fp).as_decimal_u64().unwrap()
}

/// Converts a fixed point 32 price to an f64 for UI display
pub fn ui_price(price: u64) -> f64 {
    Fp32::upcast_fp32(price).as_f64()
}
