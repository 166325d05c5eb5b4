// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2022 JET PROTOCOL HOLDINGS, LLC.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The two-coin StableSwap invariant, solved by Newton iteration.
//!
//! `amp_factor` is the amplification coefficient A. As A grows the curve
//! flattens toward constant sum around the peg; as A shrinks toward zero it
//! degrades to constant product.

use crate::error::{PricingError, Result};

/// Newton converges quadratically, so this cap is never reached for finite
/// reserves. It only bounds the loop.
const MAX_ITERATIONS: usize = 256;

/// One lamport of the smallest token denomination
const TOLERANCE: f64 = 1.0;

const N_COINS: f64 = 2.0;

/// Output of a StableSwap trade. The invariant is solved on gross balances
/// and the fee is taken from the gross output.
pub(super) fn simulate_output(
    input_amount: u64,
    source_balance: u64,
    destination_balance: u64,
    fee_rate_bps: u32,
    amp_factor: f64,
) -> Result<u64> {
    if !amp_factor.is_finite() || amp_factor <= 0.0 {
        return Err(PricingError::InvalidAmpFactor);
    }
    if source_balance == 0 || destination_balance == 0 {
        return Err(PricingError::InsufficientLiquidity);
    }
    if input_amount == 0 {
        return Ok(0);
    }

    let x = source_balance as f64;
    let y = destination_balance as f64;

    let d = compute_d(x, y, amp_factor);
    let new_y = compute_y(x + input_amount as f64, d, amp_factor);

    let gross = y - new_y;
    let fee = gross * fee_rate_bps.min(10_000) as f64 / 10_000.0;
    let output = (gross - fee).floor();

    if output >= y || new_y < 1.0 {
        return Err(PricingError::InsufficientLiquidity);
    }

    Ok(output.max(0.0) as u64)
}

/// The invariant D: total deposits when the pool is balanced
///
/// Newton step with D_P = D^(n+1) / (n^n * x * y):
/// D <- (Ann * S + n * D_P) * D / ((Ann - 1) * D + (n + 1) * D_P)
fn compute_d(x: f64, y: f64, amp_factor: f64) -> f64 {
    let ann = amp_factor * N_COINS * N_COINS;
    let s = x + y;

    let mut d = s;
    for _ in 0..MAX_ITERATIONS {
        let d_p = d * d * d / (N_COINS * N_COINS * x * y);
        let d_next =
            (ann * s + d_p * N_COINS) * d / ((ann - 1.0) * d + (N_COINS + 1.0) * d_p);

        if (d_next - d).abs() <= TOLERANCE {
            return d_next;
        }
        d = d_next;
    }

    d
}

/// The destination reserve that preserves D after the source reserve moves
/// to `new_x`
///
/// y^2 + (new_x + D/Ann - D) * y = D^3 / (n^n * new_x * Ann)
fn compute_y(new_x: f64, d: f64, amp_factor: f64) -> f64 {
    let ann = amp_factor * N_COINS * N_COINS;
    let c = d * d * d / (N_COINS * N_COINS * new_x * ann);
    let b = new_x + d / ann;

    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let y_next = (y * y + c) / (2.0 * y + b - d);

        if (y_next - y).abs() <= TOLERANCE {
            return y_next;
        }
        y = y_next;
    }

    y
}
