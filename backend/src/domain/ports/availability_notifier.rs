//! Port for broadcasting candidate availability changes.
//!
//! Delivery is best effort: publishing never fails the calling use-case, and
//! subscribers that fall behind miss events rather than slowing publishers.

use futures_util::stream::BoxStream;

use crate::domain::CandidateUnavailable;

pub trait AvailabilityNotifier: Send + Sync {
    /// Publish an event to current subscribers.
    fn publish(&self, event: CandidateUnavailable);

    /// Stream of events published after the call.
    fn subscribe(&self) -> BoxStream<'static, CandidateUnavailable>;
}
