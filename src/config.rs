use crate::client::{ClientSetup, TvdbClient};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const GAME_OF_THRONES_ID: i32 = 121361;

/// Sub-check selection for one probe registration.
///
/// Built once per registration (usually through the configurator closure
/// passed to `HealthRegistry::add_tvdb`), validated fail-fast, and read-only
/// afterwards.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeOptions {
    pub check_series: bool,
    pub series_id: i32,
    pub check_search: bool,
    pub search_term: String,
    pub check_updates: bool,
    pub check_languages: bool,
    #[serde(skip)]
    client_setup: Option<ClientSetup>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            check_series: true,
            series_id: GAME_OF_THRONES_ID,
            check_search: false,
            search_term: "game of thrones".to_string(),
            check_updates: false,
            check_languages: false,
            client_setup: None,
        }
    }
}

impl fmt::Debug for ProbeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeOptions")
            .field("check_series", &self.check_series)
            .field("series_id", &self.series_id)
            .field("check_search", &self.check_search)
            .field("search_term", &self.search_term)
            .field("check_updates", &self.check_updates)
            .field("check_languages", &self.check_languages)
            .field("client_setup", &self.client_setup.is_some())
            .finish()
    }
}

impl ProbeOptions {
    /// Supplies the deferred client constructor, used only when the registry
    /// has no client installed at registration time.
    pub fn configure_client<F>(&mut self, setup: F)
    where
        F: FnOnce() -> Arc<dyn TvdbClient> + Send + 'static,
    {
        self.client_setup = Some(Box::new(setup));
    }

    pub(crate) fn take_client_setup(&mut self) -> Option<ClientSetup> {
        self.client_setup.take()
    }

    /// Checks the sub-check parameters for consistency. Pure; runs once at
    /// registration time, never per invocation. The series rule is checked
    /// first so a configuration with both faults reports a single
    /// deterministic error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check_series && self.series_id < 1 {
            return Err(ConfigError::InvalidSeriesId);
        }

        if self.check_search && self.search_term.is_empty() {
            return Err(ConfigError::InvalidSearchTerm);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ProbeOptions::default();
        assert!(options.check_series);
        assert_eq!(options.series_id, 121361);
        assert!(!options.check_search);
        assert_eq!(options.search_term, "game of thrones");
        assert!(!options.check_updates);
        assert!(!options.check_languages);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_invalid_series_id() {
        for series_id in [0, -1, i32::MIN] {
            let options = ProbeOptions {
                check_series: true,
                series_id,
                ..Default::default()
            };
            assert_eq!(options.validate(), Err(ConfigError::InvalidSeriesId));
        }
    }

    #[test]
    fn test_invalid_search_term() {
        let options = ProbeOptions {
            check_search: true,
            search_term: String::new(),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(ConfigError::InvalidSearchTerm));
    }

    #[test]
    fn test_series_rule_reported_before_search_rule() {
        let options = ProbeOptions {
            check_series: true,
            series_id: 0,
            check_search: true,
            search_term: String::new(),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(ConfigError::InvalidSeriesId));
    }

    #[test]
    fn test_disabled_checks_skip_validation() {
        let options = ProbeOptions {
            check_series: false,
            series_id: -5,
            check_search: false,
            search_term: String::new(),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_client_setup_taken_at_most_once() {
        let mut options = ProbeOptions::default();
        options.configure_client(|| unreachable!("setup must not run in this test"));

        assert!(options.take_client_setup().is_some());
        assert!(options.take_client_setup().is_none());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let mut options: ProbeOptions =
            serde_json::from_str(r#"{"check_search": true, "search_term": "doctor who"}"#)
                .unwrap();

        assert!(options.check_series);
        assert_eq!(options.series_id, 121361);
        assert!(options.check_search);
        assert_eq!(options.search_term, "doctor who");
        assert!(options.take_client_setup().is_none());
    }
}
