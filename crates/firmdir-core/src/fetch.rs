// ── Request lifecycle controller ──
//
// Wraps one async operation at a time behind an observable
// {status, data, error} triple. Dispatching while a prior invocation is
// still pending cancels it and retires its authority to commit state:
// only the newest invocation may write a terminal transition, so a slow
// response can never clobber the result of a later request.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::CoreError;
use crate::stream::FetchStream;

// ── State ────────────────────────────────────────────────────────────

/// Request phase. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FetchStatus {
    /// No dispatch has happened yet on this controller.
    NotRequested,
    /// A request is in flight (and a cancellation handle exists for it).
    Loading,
    /// The last request succeeded; `data` is present.
    Loaded,
    /// The last request failed; `error` is present, `data` keeps the
    /// last successful value if there was one.
    Error,
}

impl FetchStatus {
    pub fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded or Error — a dispatch has run to completion.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Loaded | Self::Error)
    }
}

/// Observable state of a [`Fetcher`].
#[derive(Debug)]
pub struct FetchState<T> {
    pub status: FetchStatus,

    /// Last successfully loaded value. Retained across subsequent
    /// errors (stale reads stay visible), overwritten on next success.
    pub data: Option<Arc<T>>,

    /// Last failure. Cleared when a new request starts or succeeds.
    pub error: Option<Arc<CoreError>>,

    /// When `data` was last refreshed.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl<T> FetchState<T> {
    fn initial() -> Self {
        Self {
            status: FetchStatus::NotRequested,
            data: None,
            error: None,
            loaded_at: None,
        }
    }
}

// Manual impl: Arc fields clone without requiring `T: Clone`.
impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

// ── Outcome ──────────────────────────────────────────────────────────

/// Resolution of a single dispatch, as seen by the immediate caller.
///
/// Failures are re-raised here *and* recorded in state, so call sites
/// can gate follow-up work (skip navigation on failure) while reactive
/// consumers render the stored error. Cancellations are a no-op
/// resolution: nothing is stored and nothing is raised.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The invocation succeeded and committed its value.
    Ok(T),
    /// The invocation was superseded or aborted; state is untouched.
    Cancelled,
    /// The invocation failed; the error is also stored in state.
    Failed(Arc<CoreError>),
}

impl<T> FetchOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Collapse into a `Result`, mapping a cancelled resolution to
    /// `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, Arc<CoreError>> {
        match self {
            Self::Ok(value) => Ok(Some(value)),
            Self::Cancelled => Ok(None),
            Self::Failed(err) => Err(err),
        }
    }
}

// ── Fetcher ──────────────────────────────────────────────────────────

/// The current flight, if any. `generation` is bumped on every dispatch;
/// an invocation may only commit state while its generation still
/// matches the slot.
struct FlightSlot {
    generation: u64,
    token: Option<CancellationToken>,
}

/// Request lifecycle controller for one logical view.
///
/// At most one invocation is in flight at a time. Dropping the fetcher
/// cancels the root token, so pending operations observe cancellation;
/// no state updates can occur after drop.
pub struct Fetcher<T> {
    state: watch::Sender<FetchState<T>>,
    slot: Mutex<FlightSlot>,
    root: CancellationToken,
}

impl<T: Send + Sync + 'static> Fetcher<T> {
    /// Fresh controller in the `NotRequested` state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(FetchState::initial());
        Self {
            state,
            slot: Mutex::new(FlightSlot {
                generation: 0,
                token: None,
            }),
            root: CancellationToken::new(),
        }
    }

    /// Run `op` as the new current invocation.
    ///
    /// Cancels the previous flight's token (exactly once), transitions
    /// to `Loading` (clearing `error`, keeping `data`), and awaits the
    /// operation with a fresh child token. The operation must observe
    /// the token to abort its I/O; a superseded invocation that ignores
    /// it and resolves anyway is still inert — the commit path rejects
    /// any invocation whose generation is no longer current.
    pub async fn dispatch<F, Fut>(&self, op: F) -> FetchOutcome<Arc<T>>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let token = self.root.child_token();
        let generation = {
            let mut slot = self.slot.lock().await;
            if let Some(prev) = slot.token.take() {
                debug!("superseding in-flight request");
                prev.cancel();
            }
            slot.generation += 1;
            slot.token = Some(token.clone());

            // Loading transition happens inside the same critical
            // section as the token swap, so two racing dispatches can't
            // interleave between supersession and the state write.
            self.state.send_modify(|s| {
                s.status = FetchStatus::Loading;
                s.error = None;
            });

            slot.generation
        };

        let result = op(token).await;

        let mut slot = self.slot.lock().await;
        if slot.generation != generation {
            // Superseded — the newer invocation owns the terminal
            // transition, whatever this one resolved to.
            return FetchOutcome::Cancelled;
        }
        slot.token = None;

        match result {
            Ok(value) => {
                let value = Arc::new(value);
                self.state.send_modify(|s| {
                    s.status = FetchStatus::Loaded;
                    s.data = Some(Arc::clone(&value));
                    s.error = None;
                    s.loaded_at = Some(Utc::now());
                });
                FetchOutcome::Ok(value)
            }
            Err(err) if err.is_cancelled() => FetchOutcome::Cancelled,
            Err(err) => {
                let err = Arc::new(err);
                self.state.send_modify(|s| {
                    s.status = FetchStatus::Error;
                    s.error = Some(Arc::clone(&err));
                    // data keeps the last successful load
                });
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Point-in-time state snapshot.
    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> FetchStream<T> {
        FetchStream::new(self.state.subscribe())
    }
}

impl<T: Send + Sync + 'static> Default for Fetcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Fetcher<T> {
    fn drop(&mut self) {
        // Teardown: cancel whatever is still pending. The watch sender
        // drops with self, so no state update can follow.
        self.root.cancel();
    }
}
