//! Readiness polling for freshly created deployments
//!
//! A new deployment's URL does not serve traffic until the backing
//! infrastructure is provisioned. The poller probes it at a fixed interval
//! and gives up quietly after a bounded number of attempts: readiness is a
//! best-effort report, never a reason to fail the create.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};

use crate::config::readiness as defaults;

/// Polling bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessConfig {
    /// Probes before giving up; zero disables polling
    pub max_attempts: u32,
    /// Wait before each probe
    pub interval: Duration,
    /// Timeout of a single probe request
    pub probe_timeout: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::MAX_ATTEMPTS,
            interval: Duration::from_secs(defaults::INTERVAL_SECS),
            probe_timeout: Duration::from_secs(defaults::PROBE_TIMEOUT_SECS),
        }
    }
}

impl ReadinessConfig {
    /// Configuration that skips polling entirely
    pub fn disabled() -> Self {
        Self {
            max_attempts: 0,
            ..Self::default()
        }
    }

    /// Worst-case time spent waiting
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Outcome of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// URL answered 200 on the given attempt
    Ready { attempts: u32 },
    /// Every attempt failed
    TimedOut { attempts: u32 },
    /// Caller cancelled after the given number of completed probes
    Cancelled { attempts: u32 },
    /// Polling disabled by configuration
    Skipped,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

/// Checks whether a URL is serving
#[async_trait]
pub trait Probe: Send + Sync {
    async fn is_ready(&self, url: &str) -> bool;
}

/// Waits between probes
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Plain unauthenticated GET; only a 200 counts as ready
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn is_ready(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(resp) => {
                debug!("Readiness probe {} -> {}", url, resp.status());
                resp.status() == StatusCode::OK
            }
            Err(e) => {
                debug!("Readiness probe {} failed: {}", url, e);
                false
            }
        }
    }
}

/// Real-time sleeper backed by tokio
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Bounded fixed-interval poller
pub struct ReadinessPoller<P = HttpProbe, S = TokioSleeper> {
    config: ReadinessConfig,
    probe: P,
    sleeper: S,
}

impl ReadinessPoller {
    /// Poller that probes over HTTP and sleeps in real time
    pub fn new(config: ReadinessConfig) -> Self {
        Self {
            config,
            probe: HttpProbe::new(config.probe_timeout),
            sleeper: TokioSleeper,
        }
    }
}

impl<P: Probe, S: Sleeper> ReadinessPoller<P, S> {
    /// Poller with injected probe and clock
    pub fn with_parts(config: ReadinessConfig, probe: P, sleeper: S) -> Self {
        Self {
            config,
            probe,
            sleeper,
        }
    }

    pub fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    /// Wait for `url` to answer 200. Never fails.
    pub async fn await_ready(&self, url: &str) -> Readiness {
        self.await_ready_until(url, std::future::pending::<()>())
            .await
    }

    /// Like [`await_ready`](Self::await_ready), stopping as soon as `cancel`
    /// completes. Cancellation is reported, not treated as a failure.
    pub async fn await_ready_until<F>(&self, url: &str, cancel: F) -> Readiness
    where
        F: Future<Output = ()>,
    {
        if self.config.max_attempts == 0 {
            debug!("Readiness polling disabled for {}", url);
            return Readiness::Skipped;
        }

        info!(
            "Waiting for {} to become ready (up to {} attempts, every {:?})",
            url, self.config.max_attempts, self.config.interval
        );

        tokio::pin!(cancel);

        for attempt in 1..=self.config.max_attempts {
            tokio::select! {
                biased;
                _ = &mut cancel => return Readiness::Cancelled { attempts: attempt - 1 },
                _ = self.sleeper.sleep(self.config.interval) => {}
            }

            let ready = tokio::select! {
                biased;
                _ = &mut cancel => return Readiness::Cancelled { attempts: attempt - 1 },
                ready = self.probe.is_ready(url) => ready,
            };

            if ready {
                info!("{} is ready after {} attempt(s)", url, attempt);
                return Readiness::Ready { attempts: attempt };
            }
            debug!(
                "{} not ready (attempt {}/{})",
                url, attempt, self.config.max_attempts
            );
        }

        warn!(
            "{} did not become ready after {} attempts; continuing anyway",
            url, self.config.max_attempts
        );
        Readiness::TimedOut {
            attempts: self.config.max_attempts,
        }
    }
}
