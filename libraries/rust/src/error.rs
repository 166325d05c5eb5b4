use thiserror::Error;

/// Everything that can go wrong while pricing an order or simulating a swap.
///
/// These are deterministic failures of pure functions. Retrying with the
/// same inputs returns the same error, so callers surface them to the user
/// instead of retrying.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    #[error("order amount must be greater than zero")]
    InvalidAmount,

    #[error("market tenor must be greater than zero")]
    InvalidTenor,

    #[error("price must be nonzero and no greater than one")]
    InvalidPrice,

    #[error("calculation overflowed the 64-bit result range")]
    Overflow,

    #[error("swap would exceed the available pool liquidity")]
    InsufficientLiquidity,

    #[error("amplification coefficient must be a positive finite number")]
    InvalidAmpFactor,
}

pub type Result<T> = std::result::Result<T, PricingError>;
