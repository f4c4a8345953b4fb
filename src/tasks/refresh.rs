//! Auto-Refresh Task
//!
//! Background loop that periodically reloads data, with at most one loop
//! per coordinator and cooperative shutdown.
//!
//! Lifecycle:
//! - `Idle`: no loop
//! - `Running`: one loop, alternating reload and interval wait
//! - `StopRequested`: `disable()` was called; the loop exits at its next
//!   checkpoint (after the in-flight reload, or as soon as it is woken from
//!   the interval wait) and the state returns to `Idle`

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::notifications::{Notification, NotificationChannel};

/// Boxed future returned by a reload callback; resolves to the number of
/// items loaded.
pub type ReloadFuture = Pin<Box<dyn Future<Output = Result<usize>> + Send>>;

type ReloadFn = dyn Fn() -> ReloadFuture + Send + Sync;

// == Refresh State ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    Idle,
    Running,
    StopRequested,
}

struct Shared {
    state: Mutex<RefreshState>,
    wake: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, RefreshState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Auto Refresh ==
/// Single-flight periodic reload coordinator.
///
/// Each successful reload is announced with a `Refreshed` notification.
/// Dropping the coordinator requests a stop.
pub struct AutoRefresh<T> {
    interval: Duration,
    reload: Arc<ReloadFn>,
    notifications: NotificationChannel<T>,
    shared: Arc<Shared>,
}

impl<T> AutoRefresh<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle coordinator.
    ///
    /// # Arguments
    /// * `interval` - Wait between the end of one reload and the start of the next
    /// * `reload` - Caller-supplied reload; its errors are logged and retried
    /// * `notifications` - Channel receiving the `Refreshed` events
    ///
    /// # Errors
    /// `AppError::InvalidInterval` for a zero interval.
    pub fn new<F, Fut>(
        interval: Duration,
        reload: F,
        notifications: NotificationChannel<T>,
    ) -> Result<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<usize>> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(AppError::InvalidInterval(interval));
        }

        let reload: Arc<ReloadFn> = Arc::new(move || -> ReloadFuture { Box::pin(reload()) });
        Ok(Self {
            interval,
            reload,
            notifications,
            shared: Arc::new(Shared {
                state: Mutex::new(RefreshState::Idle),
                wake: Notify::new(),
            }),
        })
    }

    // == Enable ==
    /// Starts the refresh loop unless one is already active.
    ///
    /// Returns the handle of the newly spawned loop, or `None` when an
    /// existing loop was kept (including one that had been asked to stop but
    /// had not exited yet, which simply carries on).
    pub fn enable(&self) -> Option<JoinHandle<()>> {
        {
            let mut state = self.shared.lock();
            match *state {
                RefreshState::Running => {
                    debug!("Auto refresh already enabled");
                    return None;
                }
                RefreshState::StopRequested => {
                    *state = RefreshState::Running;
                    debug!("Auto refresh re-enabled before the previous loop exited");
                    return None;
                }
                RefreshState::Idle => *state = RefreshState::Running,
            }
        }

        info!(
            "Starting auto refresh with interval of {} ms",
            self.interval.as_millis()
        );
        Some(tokio::spawn(run_loop(
            self.interval,
            Arc::clone(&self.reload),
            self.notifications.clone(),
            Arc::clone(&self.shared),
        )))
    }

    // == Disable ==
    /// Asks the active loop to stop. Never cancels an in-flight reload.
    pub fn disable(&self) {
        let mut state = self.shared.lock();
        if *state == RefreshState::Running {
            *state = RefreshState::StopRequested;
            self.shared.wake.notify_one();
            debug!("Auto refresh stop requested");
        }
    }

    pub fn state(&self) -> RefreshState {
        *self.shared.lock()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl<T> Drop for AutoRefresh<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        if *state == RefreshState::Running {
            *state = RefreshState::StopRequested;
            self.shared.wake.notify_one();
        }
    }
}

/// Puts the coordinator back to `Idle` when the loop dies without reaching
/// its normal exit (panic or abort).
struct LoopGuard {
    shared: Arc<Shared>,
    armed: bool,
}

impl Drop for LoopGuard {
    fn drop(&mut self) {
        if self.armed {
            *self.shared.lock() = RefreshState::Idle;
        }
    }
}

async fn run_loop<T>(
    interval: Duration,
    reload: Arc<ReloadFn>,
    notifications: NotificationChannel<T>,
    shared: Arc<Shared>,
) where
    T: Clone + Send + Sync + 'static,
{
    let mut guard = LoopGuard {
        shared: Arc::clone(&shared),
        armed: true,
    };

    loop {
        debug!("Auto refresh reloading data");
        // Callback and future both run in their own task so neither a panicking
        // call nor a panicking future can take the loop down with it.
        let reload = Arc::clone(&reload);
        match tokio::spawn(async move { reload().await }).await {
            Ok(Ok(count)) => {
                info!("Auto refresh: loaded {} items", count);
                let notification = Notification::refreshed(format!("New data loaded: {}", count));
                if let Err(e) = notifications.send(notification) {
                    warn!(error = %e, "Auto refresh notification not delivered");
                }
            }
            Ok(Err(e)) => warn!(error = %e, "Auto refresh reload failed"),
            Err(e) => error!(error = %e, "Auto refresh reload panicked"),
        }

        let deadline = Instant::now() + interval;
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                _ = shared.wake.notified() => {
                    if *shared.lock() == RefreshState::StopRequested {
                        break;
                    }
                }
            }
        }

        let mut state = shared.lock();
        if *state != RefreshState::Running {
            *state = RefreshState::Idle;
            guard.armed = false;
            break;
        }
    }

    info!("Auto refresh stopped");
}
