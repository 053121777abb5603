//! Core data model for transaction outcomes and their emitted events.
//!
//! A [`TransactionOutcome`] is the record every assertion in this crate
//! operates on: a transaction hash, its receipt, and the ordered list of
//! events the transaction emitted. Outcomes are immutable once constructed
//! and can be shared across any number of assertion calls.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Opaque transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TxHash {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TxHash {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Execution metadata attached to a confirmed transaction.
///
/// The assertion engine treats the receipt as opaque pass-through data; only
/// the outcome source reads `block_number` to scope event retrieval. All
/// fields are defaulted so fixtures may omit what they don't care about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Receipt {
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Whether execution succeeded.
    pub status: bool,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Timestamp of the containing block, when the source provides one.
    pub timestamp: Option<DateTime<Utc>>,
}

/// A single event argument value.
///
/// Values compare per-variant with no cross-variant coercion: `Int(5)` never
/// equals `Str("5")`, and `Uint` equality goes through [`U256`]'s own
/// equality rather than any numeric cast. Numeric strings compare as plain
/// strings.
///
/// The serde representation is untagged so fixtures read naturally
/// (`{"payout": 50, "winner": "0xB"}`). `Uint` values are constructed in
/// code via `From<U256>`; they serialize through `U256`'s string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Uint(U256),
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(v.into())
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        ArgValue::Int(v.into())
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}

impl From<U256> for ArgValue {
    fn from(v: U256) -> Self {
        ArgValue::Uint(v)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(v) => write!(f, "{}", v),
            ArgValue::Int(v) => write!(f, "{}", v),
            ArgValue::Str(v) => write!(f, "{}", v),
            ArgValue::Uint(v) => write!(f, "{}", v),
        }
    }
}

/// Ordered field map of an emitted event.
///
/// Iteration order is insertion order, which the renderer relies on; it has
/// no significance for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventArgs(IndexMap<String, ArgValue>);

impl EventArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field by name.
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    /// Insert a field, preserving insertion order for rendering.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ArgValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for EventArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A named event record emitted during transaction execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmittedEvent {
    pub name: String,
    pub args: EventArgs,
}

impl EmittedEvent {
    pub fn new(name: impl Into<String>, args: EventArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// The transaction record assertions operate on.
///
/// `events` is in emission order (the order the underlying execution
/// produced them), which matters for any scenario involving multiple events
/// of the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOutcome {
    /// Transaction hash the events are attributed to.
    pub tx: TxHash,
    /// Execution metadata, passed through untouched.
    pub receipt: Receipt,
    /// Emitted events in emission order.
    pub events: Vec<EmittedEvent>,
}

impl TransactionOutcome {
    pub fn new(tx: impl Into<TxHash>, receipt: Receipt, events: Vec<EmittedEvent>) -> Self {
        Self {
            tx: tx.into(),
            receipt,
            events,
        }
    }
}

/// Load a transaction outcome from a JSON fixture file.
pub fn load_outcome(path: &Path) -> Result<TransactionOutcome> {
    let content = fs::read_to_string(path).context("Failed to read outcome fixture")?;
    serde_json::from_str(&content).context("Failed to parse outcome JSON")
}

/// Create an [`EventArgs`] map from key-value pairs.
///
/// # Example
///
/// ```rust
/// use txassert::fields;
///
/// let args = fields! {
///     "winner" => "0xB",
///     "payout" => 50,
/// };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut args = $crate::EventArgs::new();
        $(
            args.insert($key, $crate::ArgValue::from($value));
        )*
        args
    }};
}
