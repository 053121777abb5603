//! Core traits for outcome retrieval handles.

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::outcome::{EmittedEvent, Receipt, TxHash};

/// An event record as produced by a handle.
///
/// Records still carry their attribution, because retrieval granularity can
/// be coarser than a single transaction: a block-range query returns every
/// event in the block, and [`super::OutcomeSource`] drops the ones belonging
/// to other transactions.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Transaction the event was emitted by.
    pub tx: TxHash,
    /// Block the event was emitted in.
    pub block_number: u64,
    /// The event itself.
    pub event: EmittedEvent,
}

/// The core trait every retrieval handle must implement.
///
/// A handle resolves receipt metadata and advertises which retrieval style
/// it supports through the capability probes. At least one of
/// [`TxHandle::range_query`] / [`TxHandle::event_feed`] must return `Some`
/// for a handle to be usable.
#[async_trait]
pub trait TxHandle: Send + Sync {
    /// Resolve receipt metadata for a transaction.
    async fn receipt(&self, tx: &TxHash) -> Result<Receipt>;

    /// Pull-style capability: query events by block range.
    fn range_query(&self) -> Option<&dyn RangeQuery> {
        None
    }

    /// Push-style capability: subscribe to an event feed.
    fn event_feed(&self) -> Option<&dyn EventFeed> {
        None
    }
}

/// Pull-based retrieval: all events emitted within a block range.
#[async_trait]
pub trait RangeQuery: Send + Sync {
    /// Events emitted in blocks `from_block..=to_block`, in emission order.
    async fn events_in_range(&self, from_block: u64, to_block: u64) -> Result<Vec<EventRecord>>;
}

/// Push-based retrieval: a bounded subscription over emitted events.
///
/// The stream must yield the records for blocks `from_block..=to_block` in
/// emission order and then terminate.
pub trait EventFeed: Send + Sync {
    fn subscribe(&self, from_block: u64, to_block: u64) -> BoxStream<'static, Result<EventRecord>>;
}
