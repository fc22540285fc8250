//! App version lookup
//!
//! The backend expects a current `Client-Version`. The latest published
//! build is read from a public version directory; callers fall back to
//! [`FALLBACK_APP_VERSION`](crate::session::FALLBACK_APP_VERSION) when it
//! cannot be reached.

use serde::{Deserialize, Serialize};

use crate::client::PayPayClient;
use crate::error::PayPayError;

pub const DEFAULT_VERSION_LOOKUP_URL: &str = "https://api.cokepokes.com/v-api/app/1435783608";

/// One published build, oldest first in the directory listing
#[non_exhaustive]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersionRecord {
    #[serde(default)]
    pub app_id: i64,
    #[serde(default)]
    pub bundle_identifier: String,
    pub bundle_version: String,
    #[serde(default)]
    pub external_version_id: i64,
}

fn latest_version(records: &[AppVersionRecord]) -> Option<&str> {
    records
        .last()
        .map(|record| record.bundle_version.as_str())
        .filter(|version| !version.is_empty())
}

/// Fetch the most recent app version string.
///
/// # Errors
/// - `PayPayError::Http` when the directory is unreachable or answers non-2xx
/// - `PayPayError::VersionLookup` when the listing holds no usable record
pub async fn lookup_app_version(client: &PayPayClient, url: &str) -> Result<String, PayPayError> {
    let records: Vec<AppVersionRecord> = client.get_external(url).await?;
    latest_version(&records)
        .map(str::to_string)
        .ok_or_else(|| PayPayError::VersionLookup("no version records returned".to_string()))
}
