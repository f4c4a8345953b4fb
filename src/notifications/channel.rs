//! Notification Channel Module
//!
//! Broadcasts domain events to any number of subscribers.
//!
//! Built on `tokio::sync::broadcast`:
//! - `send` never blocks the publisher
//! - each subscriber sees every event published after it subscribed, in order
//! - a subscriber that falls more than `capacity` events behind loses the
//!   oldest unread ones and resumes with the newest (drop-oldest)
//! - late subscribers get no replay
//!
//! A capacity of 1 turns each subscription into a single latest-value slot.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::notifications::Notification;

// == Notification Channel ==
/// Cloneable handle to one shared broadcast channel.
///
/// All clones publish into the same stream; `stop()` on any clone stops it
/// for all of them.
pub struct NotificationChannel<T> {
    sender: Arc<RwLock<Option<broadcast::Sender<Notification<T>>>>>,
}

impl<T> Clone for NotificationChannel<T> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T: Clone> NotificationChannel<T> {
    // == Constructor ==
    /// Creates an open channel buffering up to `capacity` events per
    /// subscriber (at least one).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(RwLock::new(Some(sender))),
        }
    }

    // == Send ==
    /// Publishes `notification` to current subscribers.
    ///
    /// Returns how many subscribers it reached; having none is not an error.
    /// Fails with [`AppError::ChannelClosed`] once the channel is stopped.
    pub fn send(&self, notification: Notification<T>) -> Result<usize> {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        let sender = guard.as_ref().ok_or(AppError::ChannelClosed)?;

        debug!(kind = ?notification.kind, message = %notification.message, "Sending notification");
        Ok(sender.send(notification).unwrap_or(0))
    }

    // == Subscribe ==
    /// Starts receiving events published from now on.
    pub fn subscribe(&self) -> Subscription<T> {
        let guard = self.sender.read().unwrap_or_else(PoisonError::into_inner);
        Subscription {
            receiver: guard.as_ref().map(broadcast::Sender::subscribe),
        }
    }

    // == Stop ==
    /// Closes the channel. Idempotent.
    ///
    /// Subscribers drain what is already queued and then see the end of the
    /// stream.
    pub fn stop(&self) {
        let mut guard = self.sender.write().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            debug!("Notification channel stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

// == Subscription ==
/// Receiving side of a [`NotificationChannel`].
pub struct Subscription<T> {
    receiver: Option<broadcast::Receiver<Notification<T>>>,
}

impl<T: Clone> Subscription<T> {
    /// Waits for the next notification.
    ///
    /// Returns `None` once the channel is stopped and everything queued for
    /// this subscriber has been delivered.
    pub async fn recv(&mut self) -> Option<Notification<T>> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(notification) => return Some(notification),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged, oldest notifications dropped");
                }
                Err(RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Returns the next queued notification without waiting.
    pub fn try_recv(&mut self) -> Option<Notification<T>> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.try_recv() {
                Ok(notification) => return Some(notification),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber lagged, oldest notifications dropped");
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// True once the end of the stream has been observed.
    pub fn is_closed(&self) -> bool {
        self.receiver.is_none()
    }
}
