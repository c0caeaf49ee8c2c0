//! In-process fan-out of candidate availability events.
//!
//! Backed by a `tokio::sync::broadcast` channel. Subscribers that fall more
//! than [`CHANNEL_CAPACITY`] events behind skip the missed events and carry on
//! from the oldest retained one.

use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::domain::CandidateUnavailable;
use crate::domain::ports::AvailabilityNotifier;

/// Events retained for slow subscribers.
pub const CHANNEL_CAPACITY: usize = 64;

/// Broadcast-channel implementation of [`AvailabilityNotifier`].
#[derive(Debug, Clone)]
pub struct BroadcastAvailabilityNotifier {
    sender: broadcast::Sender<CandidateUnavailable>,
}

impl BroadcastAvailabilityNotifier {
    /// Create a notifier with the default capacity.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastAvailabilityNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityNotifier for BroadcastAvailabilityNotifier {
    fn publish(&self, event: CandidateUnavailable) {
        let candidate_id = event.candidate_id;
        match self.sender.send(event) {
            Ok(receivers) => debug!(%candidate_id, receivers, "candidate unavailable event published"),
            // No subscribers; the event is dropped.
            Err(_) => debug!(%candidate_id, "candidate unavailable event had no subscribers"),
        }
    }

    fn subscribe(&self) -> BoxStream<'static, CandidateUnavailable> {
        let receiver = self.sender.subscribe();
        stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((event, receiver)),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "availability subscriber lagged; events skipped");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}
