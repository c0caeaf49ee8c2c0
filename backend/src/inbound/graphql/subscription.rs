//! Live admin feeds.

use async_graphql::{Context, Result, Subscription};
use futures_util::{Stream, StreamExt};

use super::types::CandidateUnavailableEvent;
use super::{caller, ports, to_gql};

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// One event per candidate blocked after the subscription starts. Admin only.
    async fn candidate_unavailable(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = CandidateUnavailableEvent>> {
        let caller = caller(ctx)?;
        let events = ports(ctx)?
            .admin
            .candidate_unavailable_events(&caller)
            .await
            .map_err(to_gql)?;
        Ok(events.map(CandidateUnavailableEvent::from))
    }
}
