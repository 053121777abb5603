//! Outcome assembly over retrieval handles.

use anyhow::{bail, Context, Result};
use futures::StreamExt;
use log::{debug, trace};

use super::traits::{EventFeed, EventRecord, RangeQuery, TxHandle};
use crate::outcome::{TransactionOutcome, TxHash};

/// Retrieval style selected for a handle.
enum Retrieval<'h> {
    Range(&'h dyn RangeQuery),
    Feed(&'h dyn EventFeed),
}

/// Produces [`TransactionOutcome`]s from a retrieval handle.
///
/// The retrieval style is selected once, at construction, by probing the
/// handle's capabilities; the assertion engine never learns which style was
/// used.
pub struct OutcomeSource<'h> {
    handle: &'h dyn TxHandle,
    retrieval: Retrieval<'h>,
}

impl<'h> std::fmt::Debug for OutcomeSource<'h> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let style = match self.retrieval {
            Retrieval::Range(_) => "Range",
            Retrieval::Feed(_) => "Feed",
        };
        f.debug_struct("OutcomeSource")
            .field("retrieval", &style)
            .finish()
    }
}

impl<'h> OutcomeSource<'h> {
    /// Probe the handle's capabilities and select a retrieval style.
    ///
    /// Range queries are preferred when a handle exposes both: a bounded
    /// range query is the cheaper call for a single block.
    pub fn new(handle: &'h dyn TxHandle) -> Result<Self> {
        let retrieval = if let Some(query) = handle.range_query() {
            debug!("outcome source: using range queries");
            Retrieval::Range(query)
        } else if let Some(feed) = handle.event_feed() {
            debug!("outcome source: using event feed");
            Retrieval::Feed(feed)
        } else {
            bail!("handle exposes neither range queries nor an event feed");
        };
        Ok(Self { handle, retrieval })
    }

    /// Fetch the outcome of a transaction.
    ///
    /// Resolves the receipt, retrieves every event emitted in the containing
    /// block, and keeps only the events attributed to `tx`, preserving
    /// emission order.
    pub async fn fetch(&self, tx: &TxHash) -> Result<TransactionOutcome> {
        let receipt = self
            .handle
            .receipt(tx)
            .await
            .context("Failed to resolve receipt")?;
        let block = receipt.block_number;
        trace!("resolved receipt for {} in block {}", tx, block);

        let records = match &self.retrieval {
            Retrieval::Range(query) => query
                .events_in_range(block, block)
                .await
                .context("Range query failed")?,
            Retrieval::Feed(feed) => collect_feed(*feed, block).await?,
        };

        let total = records.len();
        let events: Vec<_> = records
            .into_iter()
            .filter(|record| record.tx == *tx)
            .map(|record| record.event)
            .collect();
        debug!(
            "block {}: {} of {} event records attributed to {}",
            block,
            events.len(),
            total,
            tx
        );

        Ok(TransactionOutcome {
            tx: tx.clone(),
            receipt,
            events,
        })
    }
}

async fn collect_feed(feed: &dyn EventFeed, block: u64) -> Result<Vec<EventRecord>> {
    let mut stream = feed.subscribe(block, block);
    let mut records = Vec::new();
    while let Some(record) = stream.next().await {
        records.push(record.context("Event feed produced an error")?);
    }
    Ok(records)
}

/// Fetch a transaction outcome from a handle in one call.
///
/// # Example
///
/// ```rust,ignore
/// use txassert::source::build_outcome;
///
/// let outcome = build_outcome(&node, &"0xabc".into()).await?;
/// ```
pub async fn build_outcome(handle: &dyn TxHandle, tx: &TxHash) -> Result<TransactionOutcome> {
    OutcomeSource::new(handle)?.fetch(tx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::outcome::{EmittedEvent, Receipt};
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream};

    fn record(tx: &str, block: u64, name: &str, bet: i64) -> EventRecord {
        EventRecord {
            tx: tx.into(),
            block_number: block,
            event: EmittedEvent::new(name, fields! {"betNumber" => bet}),
        }
    }

    fn in_range(records: &[EventRecord], from: u64, to: u64) -> Vec<EventRecord> {
        records
            .iter()
            .filter(|r| r.block_number >= from && r.block_number <= to)
            .cloned()
            .collect()
    }

    struct RangeHandle {
        records: Vec<EventRecord>,
    }

    #[async_trait]
    impl TxHandle for RangeHandle {
        async fn receipt(&self, _tx: &TxHash) -> Result<Receipt> {
            Ok(Receipt {
                block_number: 7,
                status: true,
                ..Receipt::default()
            })
        }

        fn range_query(&self) -> Option<&dyn RangeQuery> {
            Some(self)
        }
    }

    #[async_trait]
    impl RangeQuery for RangeHandle {
        async fn events_in_range(&self, from: u64, to: u64) -> Result<Vec<EventRecord>> {
            Ok(in_range(&self.records, from, to))
        }
    }

    struct FeedHandle {
        records: Vec<EventRecord>,
    }

    #[async_trait]
    impl TxHandle for FeedHandle {
        async fn receipt(&self, _tx: &TxHash) -> Result<Receipt> {
            Ok(Receipt {
                block_number: 7,
                status: true,
                ..Receipt::default()
            })
        }

        fn event_feed(&self) -> Option<&dyn EventFeed> {
            Some(self)
        }
    }

    impl EventFeed for FeedHandle {
        fn subscribe(&self, from: u64, to: u64) -> BoxStream<'static, Result<EventRecord>> {
            let records: Vec<Result<EventRecord>> =
                in_range(&self.records, from, to).into_iter().map(Ok).collect();
            stream::iter(records).boxed()
        }
    }

    struct NoCapability;

    #[async_trait]
    impl TxHandle for NoCapability {
        async fn receipt(&self, _tx: &TxHash) -> Result<Receipt> {
            Ok(Receipt::default())
        }
    }

    fn mixed_block_records() -> Vec<EventRecord> {
        vec![
            record("0xaaa", 7, "Play", 3),
            record("0xbbb", 7, "Play", 5),
            record("0xaaa", 7, "Payout", 9),
            record("0xccc", 8, "Play", 1),
        ]
    }

    #[tokio::test]
    async fn test_fetch_via_range_query() {
        let handle = RangeHandle {
            records: mixed_block_records(),
        };

        let outcome = build_outcome(&handle, &"0xaaa".into()).await.unwrap();
        assert_eq!(outcome.tx.as_str(), "0xaaa");
        assert_eq!(outcome.receipt.block_number, 7);
        let names: Vec<&str> = outcome.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Play", "Payout"]);
    }

    #[tokio::test]
    async fn test_fetch_via_event_feed() {
        let handle = FeedHandle {
            records: mixed_block_records(),
        };

        let outcome = build_outcome(&handle, &"0xaaa".into()).await.unwrap();
        let names: Vec<&str> = outcome.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Play", "Payout"]);
    }

    #[tokio::test]
    async fn test_foreign_transactions_filtered_out() {
        let handle = RangeHandle {
            records: mixed_block_records(),
        };

        let outcome = build_outcome(&handle, &"0xbbb".into()).await.unwrap();
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].name, "Play");
    }

    #[tokio::test]
    async fn test_unattributed_transaction_yields_empty_outcome() {
        let handle = RangeHandle {
            records: mixed_block_records(),
        };

        let outcome = build_outcome(&handle, &"0xeee".into()).await.unwrap();
        assert!(outcome.events.is_empty());
    }

    #[test]
    fn test_no_capability_is_rejected() {
        let handle = NoCapability;
        let err = OutcomeSource::new(&handle).unwrap_err();
        assert!(err.to_string().contains("neither"));
    }

    #[tokio::test]
    async fn test_range_preferred_over_feed() {
        struct Both {
            records: Vec<EventRecord>,
        }

        #[async_trait]
        impl TxHandle for Both {
            async fn receipt(&self, _tx: &TxHash) -> Result<Receipt> {
                Ok(Receipt {
                    block_number: 7,
                    ..Receipt::default()
                })
            }

            fn range_query(&self) -> Option<&dyn RangeQuery> {
                Some(self)
            }

            fn event_feed(&self) -> Option<&dyn EventFeed> {
                Some(self)
            }
        }

        #[async_trait]
        impl RangeQuery for Both {
            async fn events_in_range(&self, from: u64, to: u64) -> Result<Vec<EventRecord>> {
                Ok(in_range(&self.records, from, to))
            }
        }

        impl EventFeed for Both {
            fn subscribe(&self, _from: u64, _to: u64) -> BoxStream<'static, Result<EventRecord>> {
                stream::iter(vec![Err(anyhow::anyhow!("feed should not be used"))]).boxed()
            }
        }

        let handle = Both {
            records: vec![record("0xaaa", 7, "Play", 3)],
        };
        let outcome = build_outcome(&handle, &"0xaaa".into()).await.unwrap();
        assert_eq!(outcome.events.len(), 1);
    }
}
