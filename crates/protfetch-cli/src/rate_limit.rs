//! Client-side rate limiting for the STRING and QuickGO adapters
//!
//! Both services ask clients to space out requests. Adapters receive a
//! [`RateLimiter`] and wrap every sub-call in [`throttled`], which pauses after
//! the call whether it succeeded or failed.

use crate::config::Config;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Pacing policy applied after each upstream call
#[async_trait]
pub trait RateLimiter: Send + Sync + std::fmt::Debug {
    /// Wait until the next call may be issued
    async fn pause(&self);
}

/// Sleep a fixed duration after every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No pacing at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RateLimiter for NoDelay {
    async fn pause(&self) {}
}

/// Build the limiter described by the configuration
pub fn from_config(config: &Config) -> Arc<dyn RateLimiter> {
    let delay = config.delay();
    if delay.is_zero() {
        Arc::new(NoDelay)
    } else {
        Arc::new(FixedDelay::new(delay))
    }
}

/// Run `call`, then pause, and hand back the call's output unchanged
pub async fn throttled<F, T>(limiter: &dyn RateLimiter, call: F) -> T
where
    F: Future<Output = T>,
{
    let output = call.await;
    limiter.pause().await;
    output
}
