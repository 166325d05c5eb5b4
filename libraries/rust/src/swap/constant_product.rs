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

//! The x * y = k invariant, integer arithmetic throughout.

use crate::error::{PricingError, Result};

/// Output of a constant product swap. The fee comes off the input, then the
/// invariant is preserved with floor division so the pool never pays out a
/// fractional lamport.
pub(super) fn simulate_output(
    input_amount: u64,
    source_balance: u64,
    destination_balance: u64,
    fee_rate_bps: u32,
) -> Result<u64> {
    if source_balance == 0 || destination_balance == 0 {
        return Err(PricingError::InsufficientLiquidity);
    }

    let fee_rate = (fee_rate_bps as u128).min(10_000);
    let effective_in = input_amount as u128 * (10_000 - fee_rate) / 10_000;

    let invariant = source_balance as u128 * destination_balance as u128;
    let new_destination = invariant / (source_balance as u128 + effective_in);
    let output = destination_balance as u128 - new_destination;

    if effective_in > 0 && output >= destination_balance as u128 {
        return Err(PricingError::InsufficientLiquidity);
    }

    // output <= destination_balance, always fits
    Ok(output as u64)
}
