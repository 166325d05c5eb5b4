//! Pure pricing math shared by the fixed term markets UI and client tooling.
//!
//! Two concerns live here, both stateless and synchronous:
//!
//! * converting between principal amounts, yearly interest rates, and the
//!   (base, quote, fixed point 32 price) triple the orderbook consumes
//! * simulating swap pool output and liquidity curves against an immutable
//!   pool snapshot
//!
//! Callers supply every input explicitly and every call allocates its own
//! result, so the whole crate is safe to use from any thread without
//! synchronization.

mod error;
mod fp32;

pub mod interest_pricing;
pub mod orderbook;
pub mod swap;

#[doc(inline)]
pub use error::*;

#[doc(inline)]
pub use fp32::*;
