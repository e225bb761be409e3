//! Health probe for TheTVDB API v3, pluggable into a host's health-check
//! registry.

pub mod client;
pub mod config;
pub mod error;
pub mod probe;
pub mod registry;


pub use client::{ClientSetup, LanguageRecord, SeriesRecord, TvdbClient, UpdateRecord};
pub use config::ProbeOptions;
pub use error::ConfigError;
pub use probe::{HealthStatus, ProbeVerdict, TvdbProbe};
pub use registry::{
    HealthRegistry, ProbeRegistration, RegistrationOptions, TVDB_PROBE_NAME,
};
