//! Effect execution
//!
//! The reducer returns [`Command`] values; the [`EffectRunner`] turns each one
//! into a spawned task that does the impure work and re-enters the store
//! through a [`StoreHandle`] when it settles.
//!
//! A single effect goes `Scheduled -> Settled -> Delivered`. There is no
//! retry and no cancellation: a superseded fetch still runs to completion and
//! its result is delivered, and the reducer discards it by generation.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::app::{Action, Command, FetchResult};
use crate::config::FetchConfig;
use crate::store::StoreHandle;
use crate::types::{ErrorInfo, Item};

/// Where `FetchItems` gets its items from
///
/// This is the only boundary between the store and the outside world.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch_items(&self) -> FetchResult;
}

/// Item source that answers with the canonical items after a fixed delay
///
/// Configured with a failure description it settles as a failure instead.
#[derive(Debug, Clone)]
pub struct DelayedRepository {
    delay: Duration,
    fail_with: Option<String>,
}

impl DelayedRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_with: None,
        }
    }

    /// A repository whose every fetch fails with `description`
    pub fn failing(delay: Duration, description: impl Into<String>) -> Self {
        Self {
            delay,
            fail_with: Some(description.into()),
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            delay: config.delay,
            fail_with: config.fail_with.clone(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for DelayedRepository {
    fn default() -> Self {
        Self::from_config(&FetchConfig::default())
    }
}

#[async_trait]
impl ItemSource for DelayedRepository {
    async fn fetch_items(&self) -> FetchResult {
        tokio::time::sleep(self.delay).await;
        match &self.fail_with {
            Some(description) => Err(ErrorInfo::new(description.clone())),
            None => Ok(Item::canonical()),
        }
    }
}

/// Executes commands and feeds their outcome back into the store
#[derive(Clone)]
pub struct EffectRunner {
    source: Arc<dyn ItemSource>,
    in_flight: Arc<InFlightCount>,
}

impl EffectRunner {
    pub fn new(source: Arc<dyn ItemSource>) -> Self {
        Self {
            source,
            in_flight: Arc::new(InFlightCount::default()),
        }
    }

    /// Number of effects scheduled but not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::SeqCst)
    }

    /// Resolves after an effect finishes, whether or not it delivered
    ///
    /// A finish that happened while nobody was waiting is remembered, so the
    /// next call returns at once.
    pub async fn effect_finished(&self) {
        self.in_flight.finished.notified().await
    }

    /// Spawn the task for `command`; its follow-up action goes to `store`
    ///
    /// Effects may overlap. Their completions reach the store in settlement
    /// order. Outside a tokio runtime nothing can be spawned: the command is
    /// logged and dropped, and `None` is returned.
    pub fn run(&self, command: Command, store: StoreHandle) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(command = command.name(), "Cannot run effect: {}", e);
                return None;
            }
        };

        // Counted before spawning so `in_flight` never under-reports
        let guard = InFlight::enter(&self.in_flight);
        let source = Arc::clone(&self.source);

        match command {
            Command::FetchItems { generation } => {
                tracing::debug!(%generation, "Fetch scheduled");
                Some(runtime.spawn(async move {
                    let mut guard = guard;
                    let result = source.fetch_items().await;
                    tracing::debug!(%generation, ok = result.is_ok(), "Fetch settled");

                    let action = Action::RepositoryLoadingComplete { generation, result };
                    if let Err(e) = store.dispatch(action) {
                        tracing::warn!(%generation, "Fetch result not delivered: {}", e);
                    }
                    guard.finish();
                }))
            }
        }
    }
}

impl std::fmt::Debug for EffectRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRunner")
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct InFlightCount {
    count: AtomicUsize,
    finished: Notify,
}

/// Leaves the in-flight count when the effect task ends
///
/// The task delivers before the guard drops. A task that panics or is
/// aborted drops it without delivering, and waiters are still woken.
struct InFlight {
    counter: Arc<InFlightCount>,
    finished: bool,
}

impl InFlight {
    fn enter(counter: &Arc<InFlightCount>) -> Self {
        counter.count.fetch_add(1, Ordering::SeqCst);
        Self {
            counter: Arc::clone(counter),
            finished: false,
        }
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Effect task ended before delivering its result");
        }
        self.counter.count.fetch_sub(1, Ordering::SeqCst);
        self.counter.finished.notify_one();
    }
}
