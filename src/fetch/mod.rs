//! Batched concurrent fetching with partial-failure tolerance.
//!
//! [`fetch_in_batches`] is the pacing and fault-isolation layer between the
//! aggregator and the remote API. Identifiers are partitioned into
//! consecutive fixed-size batches; each batch waits out a fixed throttle
//! delay, then issues its per-item fetches concurrently and awaits them all
//! before the next batch starts. Batches are strictly sequential, items
//! within a batch are concurrent.
//!
//! # Failure policy
//!
//! A per-item failure never escapes this module: each fetch is wrapped so a
//! failure produces an [`ItemOutcome`] carrying a typed error instead of
//! aborting the batch. A batch that exceeds
//! [`batch_operation_timeout`](crate::constants::batch_operation_timeout)
//! is logged and its identifiers receive error outcomes, then the loop
//! continues. The output therefore always contains exactly one outcome per
//! requested identifier, even if every fetch failed.

use futures::future::join_all;
use std::future::Future;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::constants::{batch_delay, batch_operation_timeout};
use crate::core::PokedexError;

/// The tagged result of one per-item fetch.
///
/// Success carries the fetched value; failure carries the reason. Either
/// way the identifier is preserved so the join step can line outcomes up
/// with the requested id sequence.
#[derive(Debug)]
pub struct ItemOutcome<T> {
    /// Identifier this outcome belongs to
    pub id: u32,
    /// The fetched value, or why fetching it failed
    pub result: Result<T, PokedexError>,
}

impl<T> ItemOutcome<T> {
    /// The fetched value, consuming the outcome. `None` on failure.
    pub fn into_value(self) -> Option<T> {
        self.result.ok()
    }

    /// Whether the fetch succeeded.
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetch `ids` in sequential batches of `batch_size`, items concurrently.
///
/// Returns exactly `ids.len()` outcomes, one per identifier, in batch order
/// (outcomes of batch N all precede outcomes of batch N+1). Callers must
/// not rely on ordering within a batch, only on every id appearing exactly
/// once.
///
/// `per_item` is invoked once per identifier; its error is captured into
/// the outcome for that identifier and never propagated.
pub async fn fetch_in_batches<T, F, Fut>(
    ids: &[u32],
    batch_size: usize,
    per_item: F,
) -> Vec<ItemOutcome<T>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<T, PokedexError>>,
{
    let mut results = Vec::with_capacity(ids.len());
    if ids.is_empty() {
        return results;
    }

    let batch_size = batch_size.max(1);
    let batch_count = ids.len().div_ceil(batch_size);

    for (index, batch) in ids.chunks(batch_size).enumerate() {
        debug!(
            "fetching batch {}/{} ({} items)",
            index + 1,
            batch_count,
            batch.len()
        );

        // Fixed pacing delay, not adaptive backoff.
        sleep(batch_delay()).await;

        let items = batch.iter().map(|&id| {
            let fut = per_item(id);
            async move {
                match fut.await {
                    Ok(value) => ItemOutcome {
                        id,
                        result: Ok(value),
                    },
                    Err(err) => {
                        warn!("fetch for #{id} failed: {err}");
                        ItemOutcome {
                            id,
                            result: Err(PokedexError::ItemFetch {
                                id,
                                reason: err.to_string(),
                            }),
                        }
                    }
                }
            }
        });

        match timeout(batch_operation_timeout(), join_all(items)).await {
            Ok(outcomes) => results.extend(outcomes),
            Err(_) => {
                warn!(
                    "batch {}/{} timed out; substituting error outcomes",
                    index + 1,
                    batch_count
                );
                results.extend(batch.iter().map(|&id| ItemOutcome {
                    id,
                    result: Err(PokedexError::ItemFetch {
                        id,
                        reason: "batch timed out".to_string(),
                    }),
                }));
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn one_outcome_per_id_in_batch_order() {
        let ids: Vec<u32> = (1..=7).collect();
        let outcomes = fetch_in_batches(&ids, 3, |id| async move { Ok(id * 10) }).await;

        assert_eq!(outcomes.len(), 7);
        let returned: Vec<u32> = outcomes.iter().map(|o| o.id).collect();
        assert_eq!(returned, ids);
        assert!(outcomes.iter().all(ItemOutcome::is_ok));
        assert_eq!(outcomes[4].result.as_ref().copied().unwrap(), 50);
    }

    #[tokio::test]
    async fn failures_are_captured_not_propagated() {
        let ids: Vec<u32> = (1..=6).collect();
        let outcomes = fetch_in_batches(&ids, 2, |id| async move {
            if id % 2 == 0 {
                Err(PokedexError::ApiStatus {
                    url: format!("https://example.test/pokemon/{id}"),
                    status: 500,
                })
            } else {
                Ok(id)
            }
        })
        .await;

        assert_eq!(outcomes.len(), 6);
        for outcome in &outcomes {
            if outcome.id % 2 == 0 {
                assert!(matches!(
                    outcome.result,
                    Err(PokedexError::ItemFetch { id, .. }) if id == outcome.id
                ));
            } else {
                assert!(outcome.is_ok());
            }
        }
    }

    #[tokio::test]
    async fn all_failures_still_yield_full_output() {
        let ids: Vec<u32> = (1..=5).collect();
        let outcomes = fetch_in_batches(&ids, 2, |id| async move {
            Err::<u32, _>(PokedexError::ItemFetch {
                id,
                reason: "simulated".to_string(),
            })
        })
        .await;

        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| !o.is_ok()));
    }

    #[tokio::test]
    async fn empty_input_returns_empty_without_delay() {
        let outcomes =
            fetch_in_batches::<u32, _, _>(&[], 50, |id| async move { Ok(id) }).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn zero_batch_size_is_clamped() {
        let ids = [1, 2, 3];
        let outcomes = fetch_in_batches(&ids, 0, |id| async move { Ok(id) }).await;
        assert_eq!(outcomes.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_batch_substitutes_error_outcomes() {
        // Per-item futures that never resolve; the paused clock advances
        // past the batch timeout instead of waiting it out.
        let ids = [1, 2, 3];
        let outcomes = fetch_in_batches(&ids, 3, |_| {
            futures::future::pending::<Result<u32, PokedexError>>()
        })
        .await;

        assert_eq!(outcomes.len(), 3);
        for outcome in &outcomes {
            assert!(matches!(
                &outcome.result,
                Err(PokedexError::ItemFetch { id, reason })
                    if *id == outcome.id && reason == "batch timed out"
            ));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_batch_does_not_block_later_batches() {
        let ids = [1, 2, 3, 4];
        let outcomes = fetch_in_batches(&ids, 2, |id| async move {
            if id <= 2 {
                futures::future::pending::<()>().await;
            }
            Ok(id)
        })
        .await;

        assert_eq!(outcomes.len(), 4);
        assert!(outcomes[..2].iter().all(|o| !o.is_ok()));
        assert!(outcomes[2..].iter().all(ItemOutcome::is_ok));
    }

    #[tokio::test]
    async fn per_item_called_exactly_once_per_id() {
        let calls = AtomicUsize::new(0);
        let ids: Vec<u32> = (1..=10).collect();
        let outcomes = fetch_in_batches(&ids, 4, |id| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(id) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 10);
        assert_eq!(outcomes.len(), 10);
    }
}
