//! Registration-time error types

use thiserror::Error;

/// Errors raised while registering the probe, before any entry is added.
///
/// These abort host wiring; they are never converted into a runtime verdict.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("A TVDB client must be installed on the registry or supplied via ProbeOptions::configure_client before registering the probe")]
    ClientNotConfigured,

    #[error("Series id must be greater than 0 when the series check is enabled")]
    InvalidSeriesId,

    #[error("Search term must not be empty when the search check is enabled")]
    InvalidSearchTerm,
}
