// ── Reactive state streams ──
//
// Subscription types for consuming request-state changes from a Fetcher.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::fetch::FetchState;

/// A subscription to a [`Fetcher`](crate::fetch::Fetcher)'s state.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct FetchStream<T: Send + Sync + 'static> {
    current: FetchState<T>,
    receiver: watch::Receiver<FetchState<T>>,
}

impl<T: Send + Sync + 'static> FetchStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<FetchState<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time (or at the last
    /// observed change).
    pub fn current(&self) -> &FetchState<T> {
        &self.current
    }

    /// Get the latest state (may have changed since creation).
    pub fn latest(&self) -> FetchState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new state.
    /// Returns `None` once the owning fetcher has been dropped.
    pub async fn changed(&mut self) -> Option<FetchState<T>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> FetchWatchStream<T> {
        FetchWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields a new [`FetchState`] each time the fetcher transitions.
pub struct FetchWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<FetchState<T>>,
}

impl<T: Send + Sync + 'static> Stream for FetchWatchStream<T> {
    type Item = FetchState<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin when the inner type is Unpin, and
        // FetchState always is.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
