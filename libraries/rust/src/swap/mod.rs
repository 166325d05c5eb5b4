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

//! Hypothetical swap simulation over supported pool curves.
//!
//! Everything here operates on an immutable [SwapPool] snapshot. A simulated
//! trade never moves the pool, so the UI can probe any number of trade sizes
//! against the same reserves to chart slippage before the user signs
//! anything.

mod constant_product;
mod stable;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The invariant curve a pool trades along
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", tag = "swapType")]
pub enum SwapCurve {
    /// x * y = k
    ConstantProduct,
    /// StableSwap with an amplification coefficient
    Stable { amp_factor: f64 },
}

/// A point in time view of one direction of a swap pool
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct SwapPool {
    /// Reserves of the token being paid in
    pub source_balance: u64,
    /// Reserves of the token being received
    pub destination_balance: u64,
    pub source_decimals: u8,
    pub destination_decimals: u8,
    pub curve: SwapCurve,
    /// Trade fee in basis points
    pub fee_rate_bps: u32,
    /// Report prices as source per destination instead of the default
    /// destination per source
    pub inverted: bool,
}

/// One sample of a pool liquidity curve, in display token units
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub input_amount: f64,
    pub implied_price: f64,
}

/// How finely to sample a liquidity curve. More samples cost render time but
/// never change the value of any individual point.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CurveConfig {
    pub sample_count: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self { sample_count: 50 }
    }
}

impl SwapPool {
    /// The token amount received for `input_amount`, after fees, floored to
    /// a whole token lamport. The pool itself is untouched.
    pub fn simulate_output(&self, input_amount: u64) -> Result<u64> {
        match self.curve {
            SwapCurve::ConstantProduct => constant_product::simulate_output(
                input_amount,
                self.source_balance,
                self.destination_balance,
                self.fee_rate_bps,
            ),
            SwapCurve::Stable { amp_factor } => stable::simulate_output(
                input_amount,
                self.source_balance,
                self.destination_balance,
                self.fee_rate_bps,
                amp_factor,
            ),
        }
    }

    /// The zero impact reference price: the decimal adjusted ratio of the
    /// pool reserves
    pub fn mid_price(&self) -> f64 {
        let price = (self.destination_balance as f64 / expo(self.destination_decimals))
            / (self.source_balance as f64 / expo(self.source_decimals));

        if self.inverted {
            1.0 / price
        } else {
            price
        }
    }

    /// Relative deviation of the executed price from [SwapPool::mid_price]
    /// for a trade of `input_amount`. Fees count toward impact.
    pub fn price_impact(&self, input_amount: u64) -> Result<f64> {
        if input_amount == 0 {
            return Ok(0.0);
        }

        let output = self.simulate_output(input_amount)?;
        let executed = self.implied_price(input_amount, output);
        let mid = self.mid_price();

        Ok((1.0 - executed / mid).abs())
    }

    /// Sample the liquidity curve at `config.sample_count` evenly spaced
    /// input amounts in `(0, max_input]`.
    ///
    /// The iterator is lazy and yields inputs in strictly increasing order;
    /// duplicate integer inputs below the sample resolution are skipped. A
    /// `max_input` of zero produces an empty curve rather than an error so
    /// the UI can render a blank chart.
    pub fn generate_curve(&self, max_input: u64, config: &CurveConfig) -> CurveIter {
        tracing::debug!(
            max_input,
            samples = config.sample_count,
            curve = ?self.curve,
            "sampling liquidity curve"
        );

        CurveIter {
            pool: *self,
            max_input,
            samples: config.sample_count as u64,
            next_sample: 1,
            last_input: 0,
        }
    }

    fn implied_price(&self, input: u64, output: u64) -> f64 {
        let price = (output as f64 / expo(self.destination_decimals))
            / (input as f64 / expo(self.source_decimals));

        if self.inverted {
            1.0 / price
        } else {
            price
        }
    }
}

fn expo(decimals: u8) -> f64 {
    10f64.powi(decimals as i32)
}

/// Lazy walk along a pool liquidity curve. Restart by cloning or by calling
/// [SwapPool::generate_curve] again; the snapshot never changes underneath.
#[derive(Debug, Clone)]
pub struct CurveIter {
    pool: SwapPool,
    max_input: u64,
    samples: u64,
    next_sample: u64,
    last_input: u64,
}

impl Iterator for CurveIter {
    type Item = Result<CurvePoint>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_sample <= self.samples {
            let sample = self.next_sample;
            self.next_sample += 1;

            let input = ((self.max_input as u128 * sample as u128) / self.samples as u128) as u64;
            if input == 0 || input == self.last_input {
                continue;
            }
            self.last_input = input;

            let output = match self.pool.simulate_output(input) {
                // fees can floor the smallest samples to nothing, and a zero
                // output charts as a zero or infinite price artifact
                Ok(0) => continue,
                Ok(output) => output,
                Err(err) => return Some(Err(err)),
            };

            return Some(Ok(CurvePoint {
                input_amount: input as f64 / expo(self.pool.source_decimals),
                implied_price: self.pool.implied_price(input, output),
            }));
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.samples + 1 - self.next_sample) as usize))
    }
}
