use std::ops::{Add, Div, Mul, Sub};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// The representation of 1.0 in fixed point 32
pub const FP32_ONE: u128 = 1 << 32;

/// Fixed point 32 value, stored with the fraction in the low 32 bits.
///
/// The backing store is u128 so that products and shifted quotients of u64
/// token quantities cannot overflow before the final downcast. The u64
/// downcast is what gets embedded in orderbook instruction arguments, so it
/// must be bit-exact with the on-chain representation.
#[derive(
    Pod,
    Zeroable,
    Serialize,
    Deserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[repr(transparent)]
pub struct Fp32(u128);

impl Fp32 {
    pub const ONE: Self = Self(FP32_ONE);
    pub const ZERO: Self = Self(0);

    /// Reinterpret an existing u64 fp32 representation, such as the limit
    /// price stored on an order
    pub fn upcast_fp32(fp: u64) -> Self {
        Self(fp as u128)
    }

    /// Wrap a raw u128 fp32 representation
    pub fn wrap_u128(fp: u128) -> Self {
        Self(fp)
    }

    /// Narrow to the u64 fp32 representation, `None` when the value does
    /// not fit
    pub fn downcast_u64(self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    /// The integer part, fractional bits truncated
    pub fn as_decimal_u64(self) -> Option<u64> {
        u64::try_from(self.0 >> 32).ok()
    }

    /// The integer part, rounded up when any fractional bits are set
    pub fn as_decimal_u64_ceil(self) -> Option<u64> {
        let floored = self.0 >> 32;
        if self.0 & (FP32_ONE - 1) == 0 {
            u64::try_from(floored).ok()
        } else {
            u64::try_from(floored + 1).ok()
        }
    }

    /// Multiply by a token quantity, truncating to a token quantity
    pub fn u64_mul(self, rhs: u64) -> Option<u64> {
        (self * rhs).as_decimal_u64()
    }

    /// Divide into a token quantity, truncating to a token quantity
    pub fn u64_div(self, lhs: u64) -> Option<u64> {
        (Fp32::from(lhs) / self).as_decimal_u64()
    }

    /// Lossy conversion for display only, never for order math
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / FP32_ONE as f64
    }
}

impl From<u64> for Fp32 {
    fn from(n: u64) -> Self {
        Self((n as u128) << 32)
    }
}

impl Add for Fp32 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Fp32 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u64> for Fp32 {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self {
        Self(self.0 * rhs as u128)
    }
}

impl Div<u64> for Fp32 {
    type Output = Self;

    fn div(self, rhs: u64) -> Self {
        Self(self.0 / rhs as u128)
    }
}

impl Div for Fp32 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self((self.0 << 32) / rhs.0)
    }
}
