//! Outcome retrieval over external data sources.
//!
//! The assertion engine consumes [`crate::TransactionOutcome`] records and
//! places no constraint on where they come from. This module is the shim
//! that produces them from an external handle (a node connection, an
//! in-process test chain, a recorded log) using whichever retrieval style
//! the handle supports.
//!
//! # Architecture
//!
//! - [`TxHandle`]: receipt lookup plus capability probes
//! - [`RangeQuery`] / [`EventFeed`]: the two historical retrieval styles,
//!   pull-based and push-based
//! - [`OutcomeSource`]: facade that probes capabilities once at
//!   construction and assembles attributed, ordered outcomes
//!
//! # Example
//!
//! ```rust,ignore
//! use txassert::source::build_outcome;
//! use txassert::expect;
//!
//! let outcome = build_outcome(&node, &tx_hash).await?;
//! expect(&outcome).event("Payout").to_be_emitted();
//! ```

mod fetch;
mod traits;

pub use fetch::{build_outcome, OutcomeSource};
pub use traits::{EventFeed, EventRecord, RangeQuery, TxHandle};
