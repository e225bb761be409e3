//! Probe executor reducing the enabled sub-checks to one verdict

use crate::client::TvdbClient;
use crate::config::ProbeOptions;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Outcome of one probe invocation: the aggregate status plus, on failure,
/// the causing error. Created fresh per invocation and owned by the caller.
#[derive(Debug)]
pub struct ProbeVerdict {
    pub status: HealthStatus,
    pub error: Option<anyhow::Error>,
}

impl ProbeVerdict {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
        }
    }

    pub fn failed(status: HealthStatus, error: anyhow::Error) -> Self {
        Self {
            status,
            error: Some(error),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Runs the enabled sub-checks against the client, in a fixed order, and
/// short-circuits on the first failure. Holds no mutable state, so one probe
/// may serve any number of concurrent invocations.
pub struct TvdbProbe {
    client: Arc<dyn TvdbClient>,
    options: Arc<ProbeOptions>,
    failure_status: HealthStatus,
}

impl TvdbProbe {
    pub fn new(client: Arc<dyn TvdbClient>, options: Arc<ProbeOptions>) -> Self {
        Self {
            client,
            options,
            failure_status: HealthStatus::Unhealthy,
        }
    }

    /// Sets the status reported when a sub-check fails, in place of the
    /// default `Unhealthy`.
    pub fn with_failure_status(mut self, status: HealthStatus) -> Self {
        self.failure_status = status;
        self
    }

    /// Executes one invocation. A failing remote call never escapes as an
    /// error; it is folded into the verdict together with the configured
    /// failure status.
    pub async fn check(&self, cancel: CancellationToken) -> ProbeVerdict {
        match self.run_sub_checks(&cancel).await {
            Ok(()) => {
                debug!("TVDB health probe passed");
                ProbeVerdict::healthy()
            }
            Err(cause) => {
                match self.failure_status {
                    HealthStatus::Degraded => warn!("TVDB health probe degraded: {}", cause),
                    _ => error!("TVDB health probe failed: {}", cause),
                }
                ProbeVerdict::failed(self.failure_status.clone(), cause)
            }
        }
    }

    async fn run_sub_checks(&self, cancel: &CancellationToken) -> anyhow::Result<()> {
        if self.options.check_series {
            debug!("checking TVDB series by id {}", self.options.series_id);
            self.client
                .series_by_id(self.options.series_id, cancel.clone())
                .await?;
        }

        if self.options.check_search {
            debug!("checking TVDB search for '{}'", self.options.search_term);
            self.client
                .search_series_by_name(&self.options.search_term)
                .await?;
        }

        if self.options.check_updates {
            // Lower bound recomputed on every invocation, in local time.
            let since = Local::now() - chrono::Duration::days(1);
            debug!("checking TVDB updates since {}", since);
            self.client.updates_since(since, cancel.clone()).await?;
        }

        if self.options.check_languages {
            debug!("checking TVDB language catalog");
            self.client.all_languages(cancel.clone()).await?;
        }

        Ok(())
    }
}
