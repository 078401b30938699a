use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::types::Pacing;

/// Rate-limit policy consulted between successive page fetches of one call.
///
/// `pause` is never called before the first page.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before issuing the next page.
    async fn pause(&self);
}

/// Sleep for a fixed delay between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Issue pages back to back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}

/// Build the pacer for a configured policy.
#[must_use]
pub fn pacer_for(pacing: Pacing) -> Arc<dyn Pacer> {
    match pacing.delay() {
        Some(d) => Arc::new(FixedDelay(d)),
        None => Arc::new(NoPacing),
    }
}
