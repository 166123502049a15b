//! Index store client
//!
//! The one handle through which the indexer and query engine reach the
//! store. It is constructed explicitly (`connect` pings the store), shared
//! by cloning, and released with `shutdown`.
//!
//! Every call is bounded by the configured timeout and races the caller's
//! cancellation token:
//! - timeout -> `Unavailable`
//! - cancellation -> `Cancelled`

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::config::IndexConfig;
use super::errors::{SearchError, SearchResult};
use super::store::{IndexStore, LexRange, ProductPredicate};

/// Shared, timeout-bounded handle to an [`IndexStore`].
#[derive(Clone)]
pub struct IndexClient {
    store: Arc<dyn IndexStore>,
    op_timeout: Duration,
}

impl IndexClient {
    /// Connect to `store`, failing with `Unavailable` if it does not answer.
    pub async fn connect(store: Arc<dyn IndexStore>, config: &IndexConfig) -> SearchResult<Self> {
        let client = Self {
            store,
            op_timeout: config.op_timeout(),
        };
        client
            .call("ping", &CancellationToken::new(), client.store.ping())
            .await?;
        tracing::info!(timeout_ms = config.op_timeout_ms, "index client connected");
        Ok(client)
    }

    async fn call<T, F>(&self, op: &'static str, cancel: &CancellationToken, fut: F) -> SearchResult<T>
    where
        F: Future<Output = SearchResult<T>>,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SearchError::cancelled(op)),
            result = tokio::time::timeout(self.op_timeout, fut) => match result {
                Ok(inner) => inner,
                Err(_) => Err(SearchError::unavailable(format!(
                    "{} timed out after {}ms",
                    op,
                    self.op_timeout.as_millis()
                ))),
            },
        }
    }

    pub async fn insert_many(&self, members: Vec<String>, cancel: &CancellationToken) -> SearchResult<()> {
        self.call("insert_many", cancel, self.store.insert_many(members))
            .await
    }

    pub async fn range_by_lex(
        &self,
        range: LexRange,
        offset: usize,
        count: usize,
        cancel: &CancellationToken,
    ) -> SearchResult<Vec<String>> {
        self.call(
            "range_by_lex",
            cancel,
            self.store.range_by_lex(range, offset, count),
        )
        .await
    }

    pub async fn delete_matching(
        &self,
        predicate: ProductPredicate<'_>,
        cancel: &CancellationToken,
    ) -> SearchResult<u64> {
        self.call("delete_matching", cancel, self.store.delete_matching(predicate))
            .await
    }

    pub async fn replace_matching(
        &self,
        predicate: ProductPredicate<'_>,
        members: Vec<String>,
        cancel: &CancellationToken,
    ) -> SearchResult<u64> {
        self.call(
            "replace_matching",
            cancel,
            self.store.replace_matching(predicate, members),
        )
        .await
    }

    /// Close the underlying store.
    pub async fn shutdown(&self) -> SearchResult<()> {
        self.store.close().await?;
        tracing::info!("index client shut down");
        Ok(())
    }
}
