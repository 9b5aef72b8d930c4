//! Stateless financial primitives used by the projection builders
//!
//! All rates are decimals (0.09 for 9%). Cash-flow sequences start at period 0.

mod irr;
mod npv;
mod payment;

pub use irr::{irr, irr_or_none, DEFAULT_IRR_GUESS, IRR_MAX_ITERATIONS, IRR_TOLERANCE};
pub use npv::{npv, npv_and_derivative};
pub use payment::pmt;
