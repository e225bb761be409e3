//! Contract with the remote TVDB API client collaborator

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Deferred construction closure for the client, invoked at most once and only
/// when the registry has no client installed yet.
pub type ClientSetup = Box<dyn FnOnce() -> Arc<dyn TvdbClient> + Send>;

/// The four remote capabilities a probe invocation may exercise.
///
/// The probe only cares whether each call returns a value or fails; returned
/// payloads are never interpreted. Implementations must be safe for concurrent
/// use by multiple in-flight invocations.
#[async_trait::async_trait]
pub trait TvdbClient: Send + Sync {
    async fn series_by_id(
        &self,
        id: i32,
        cancel: CancellationToken,
    ) -> anyhow::Result<SeriesRecord>;

    /// Searches series by name. This capability takes no cancellation token,
    /// so an in-flight search cannot be interrupted; callers observe the
    /// cancellation only once the call completes.
    async fn search_series_by_name(&self, term: &str) -> anyhow::Result<Vec<SeriesRecord>>;

    async fn updates_since(
        &self,
        since: DateTime<Local>,
        cancel: CancellationToken,
    ) -> anyhow::Result<Vec<UpdateRecord>>;

    async fn all_languages(&self, cancel: CancellationToken)
        -> anyhow::Result<Vec<LanguageRecord>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRecord {
    pub id: i32,
    pub series_name: String,
    pub status: Option<String>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecord {
    pub id: i32,
    pub last_updated: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRecord {
    pub id: i32,
    pub abbreviation: String,
    pub name: String,
    pub english_name: String,
}
