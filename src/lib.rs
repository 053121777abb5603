//! # txassert
//!
//! Event and failure assertions for transaction outcomes.
//!
//! This library verifies already-produced execution results: given a
//! [`TransactionOutcome`] (a transaction hash, its receipt, and the ordered
//! list of events it emitted), it asserts presence or absence of named
//! events (optionally narrowed by argument filters), classifies how an
//! asynchronous operation failed, and renders a readable dump of everything
//! that was emitted. It does not execute or simulate anything itself.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use txassert::{expect, fields};
//!
//! let outcome = txassert::source::build_outcome(&node, &tx_hash).await?;
//!
//! expect(&outcome)
//!     .event("Payout")
//!     .with_fields(fields! {"winner" => "0xB", "payout" => 50})
//!     .to_be_emitted();
//!
//! expect(&outcome).event("Refund").not_to_be_emitted();
//! ```
//!
//! ## Expecting Failures
//!
//! ```rust,ignore
//! use txassert::{expect_revert, expect_success};
//!
//! expect_revert(casino.play_for_free(6), Some("Only owner"), None).await?;
//! expect_success(casino.play(6), None).await?;
//! ```
//!
//! Failure text is unstructured prose from the execution host, so
//! classification and reason checks are substring searches; see
//! [`expect_failure`] for the trade-off this implies.
//!
//! ## Inspecting Outcomes
//!
//! ```rust,ignore
//! use txassert::print_outcome;
//!
//! // Events emitted in tx 0x...:
//! // ----------------------------------------------------------------------------------------
//! // Play(player: 0xB, betNumber: 3, winningNumber: 7)
//! // ----------------------------------------------------------------------------------------
//! print_outcome(&outcome);
//! ```

pub mod error;
pub mod failure;
pub mod fluent;
pub mod outcome;
pub mod render;
pub mod source;

// Core data model
pub use outcome::{
    load_outcome, ArgValue, EmittedEvent, EventArgs, Receipt, TransactionOutcome, TxHash,
};

// Assertions
pub use error::{compose, AssertionError};
pub use fluent::{
    args_match, assert_emitted, assert_not_emitted, expect, EventAssertion, MatchSpec,
    OutcomeExpectation,
};

// Failure classification
pub use failure::{expect_failure, expect_revert, expect_success, FailureKind};

// Rendering
pub use render::{print_outcome, render_event, render_outcome};
