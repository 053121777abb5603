//! Fluent assertion API for emitted events.
//!
//! This module provides a Jest-like API for making assertions about the
//! events a transaction emitted. Assertions evaluate immediately (panic on
//! failure) when using methods like `to_be_emitted()`, or can be evaluated
//! non-destructively using `check_emitted()` / `check_not_emitted()`.
//!
//! # Example
//!
//! ```rust,ignore
//! use txassert::{expect, fields};
//!
//! // Immediate evaluation (panics on failure)
//! expect(&outcome)
//!     .event("Payout")
//!     .with_fields(fields! {"payout" => 50})
//!     .to_be_emitted();
//!
//! // Non-panicking evaluation
//! let result = expect(&outcome).event("Refund").check_not_emitted();
//! assert!(result.is_ok());
//! ```

mod builder;
mod matchers;

pub use builder::{assert_emitted, assert_not_emitted, expect, EventAssertion, OutcomeExpectation};
pub use matchers::{args_match, MatchSpec};
