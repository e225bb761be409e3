//! Registration glue between the probe and the host's health-check registry

use crate::client::TvdbClient;
use crate::config::ProbeOptions;
use crate::error::ConfigError;
use crate::probe::{HealthStatus, ProbeVerdict, TvdbProbe};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default registration name, matching the upstream API version the probe
/// targets.
pub const TVDB_PROBE_NAME: &str = "TVDB API V3";

/// Registration-level settings: the entry name plus the metadata the host
/// aggregator reads back. The timeout is carried for the host; the probe
/// itself never enforces it.
#[derive(Debug, Clone)]
pub struct RegistrationOptions {
    pub name: String,
    pub failure_status: HealthStatus,
    pub tags: Vec<String>,
    pub timeout: Option<Duration>,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            name: TVDB_PROBE_NAME.to_string(),
            failure_status: HealthStatus::Unhealthy,
            tags: Vec::new(),
            timeout: None,
        }
    }
}

impl RegistrationOptions {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_failure_status(mut self, status: HealthStatus) -> Self {
        self.failure_status = status;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One validated entry in the registry. Read-only once added; the options are
/// shared with every executor resolved from this entry.
#[derive(Debug)]
pub struct ProbeRegistration {
    name: String,
    failure_status: HealthStatus,
    tags: Vec<String>,
    timeout: Option<Duration>,
    options: Arc<ProbeOptions>,
}

impl ProbeRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_status(&self) -> &HealthStatus {
        &self.failure_status
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }
}

/// In-process surface of the host's health-check registry: a slot for the
/// shared TVDB client plus the named probe entries added so far.
///
/// Client presence is an explicit query here rather than an ambient service
/// lookup, which keeps registration testable without a host environment.
pub struct HealthRegistry {
    client: Option<Arc<dyn TvdbClient>>,
    registrations: Vec<ProbeRegistration>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            client: None,
            registrations: Vec::new(),
        }
    }

    /// Creates a registry with a client already installed, the equivalent of
    /// the host having wired the client before registering any probe.
    pub fn with_client(client: Arc<dyn TvdbClient>) -> Self {
        Self {
            client: Some(client),
            registrations: Vec::new(),
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Option<Arc<dyn TvdbClient>> {
        self.client.clone()
    }

    pub fn registrations(&self) -> &[ProbeRegistration] {
        &self.registrations
    }

    /// Registers a TVDB probe under the default name and failure status.
    ///
    /// The configurator receives default [`ProbeOptions`] to adjust. Fails
    /// fast with a [`ConfigError`] before any entry is added: first when no
    /// client is installed and the options supply no deferred setup, then on
    /// the sub-check parameter rules.
    pub fn add_tvdb<F>(&mut self, configure: F) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut ProbeOptions),
    {
        self.add_tvdb_with(configure, RegistrationOptions::default())
    }

    pub fn add_tvdb_with<F>(
        &mut self,
        configure: F,
        registration: RegistrationOptions,
    ) -> Result<(), ConfigError>
    where
        F: FnOnce(&mut ProbeOptions),
    {
        let mut options = ProbeOptions::default();
        configure(&mut options);

        // An already-installed client wins; the deferred setup is dropped
        // without being invoked.
        let setup = options.take_client_setup();
        if self.client.is_none() {
            let setup = setup.ok_or(ConfigError::ClientNotConfigured)?;
            self.client = Some(setup());
            debug!("TVDB client constructed through deferred setup");
        }

        options.validate()?;

        info!(
            "registered TVDB health probe '{}' with failure status {}",
            registration.name, registration.failure_status
        );

        self.registrations.push(ProbeRegistration {
            name: registration.name,
            failure_status: registration.failure_status,
            tags: registration.tags,
            timeout: registration.timeout,
            options: Arc::new(options),
        });

        Ok(())
    }

    /// Resolves the client and builds the executor for a named entry, the
    /// way the host turns a registration into a runnable check.
    pub fn resolve(&self, name: &str) -> Option<TvdbProbe> {
        let registration = self
            .registrations
            .iter()
            .find(|registration| registration.name == name)?;
        let client = self.client.clone()?;

        Some(
            TvdbProbe::new(client, Arc::clone(&registration.options))
                .with_failure_status(registration.failure_status.clone()),
        )
    }

    /// Resolves and runs a named entry in one step. Returns `None` when no
    /// entry with that name exists.
    pub async fn check(&self, name: &str, cancel: CancellationToken) -> Option<ProbeVerdict> {
        let probe = self.resolve(name)?;
        Some(probe.check(cancel).await)
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}
