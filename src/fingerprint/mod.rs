//! Device Fingerprints
//!
//! A fingerprint is a synthetic device identity (device id, session token,
//! user agent, client metadata) attached to every outbound request of an
//! account. Retired fingerprints are kept in a bounded history so they can be
//! restored later.

pub mod catalog;
pub mod factory;
pub mod headers;
pub mod history;

#[cfg(test)]
mod tests;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use factory::{FingerprintFactory, ProductIdentity};
pub use headers::{build_headers, FingerprintHeaders};
pub use history::{FingerprintHistory, HistoryEntry, MAX_HISTORY};

/// Product name stamped into every generated User-Agent
pub const PRODUCT_NAME: &str = "antigravity";

/// Product version stamped into every generated User-Agent
pub const PRODUCT_VERSION: &str = "1.11.5";

/// One synthetic device identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprint {
    pub device_id: String,
    pub session_token: String,
    /// `<product>/<version> <platform>/<arch>`
    pub user_agent: String,
    pub api_client: String,
    pub client_metadata: ClientMetadata,
    /// Key the remote service buckets quota accounting by
    pub quota_user: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Client metadata sent as JSON in the `Client-Metadata` header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientMetadata {
    pub ide_type: IdeType,
    pub platform: Platform,
    pub plugin_type: PluginType,
    pub os_version: String,
    pub arch: String,
    /// Secondary device id, uppercase and brace-wrapped
    pub sqm_id: String,
}

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Macos,
    Windows,
    Linux,
    #[serde(other)]
    PlatformUnspecified,
}

impl Platform {
    /// Platforms a generated fingerprint may claim
    pub const GENERATED: [Platform; 3] = [Platform::Macos, Platform::Windows, Platform::Linux];

    /// Platform token used in the User-Agent
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Platform::Macos => "darwin",
            Platform::Windows => "win32",
            Platform::Linux => "linux",
            Platform::PlatformUnspecified => "unknown",
        }
    }

    /// OS versions plausible for this platform
    #[must_use]
    pub fn os_versions(self) -> &'static [&'static str] {
        match self {
            Platform::Macos => catalog::DARWIN_VERSIONS,
            Platform::Windows => catalog::WIN32_VERSIONS,
            Platform::Linux | Platform::PlatformUnspecified => catalog::LINUX_VERSIONS,
        }
    }
}

/// IDE the client claims to run inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdeType {
    Vscode,
    Intellij,
    AndroidStudio,
    CloudShellEditor,
    #[serde(other)]
    IdeUnspecified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginType {
    Gemini,
    #[serde(other)]
    PluginUnspecified,
}

/// Why a fingerprint was moved into history
///
/// Persisted as a plain string; unknown strings survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RetireReason {
    Regenerated,
    Restored,
    Migrated,
    Other(String),
}

impl RetireReason {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            RetireReason::Regenerated => "regenerated",
            RetireReason::Restored => "restored",
            RetireReason::Migrated => "migrated",
            RetireReason::Other(reason) => reason,
        }
    }
}

impl From<String> for RetireReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "regenerated" => RetireReason::Regenerated,
            "restored" => RetireReason::Restored,
            "migrated" => RetireReason::Migrated,
            _ => RetireReason::Other(value),
        }
    }
}

impl From<RetireReason> for String {
    fn from(reason: RetireReason) -> Self {
        match reason {
            RetireReason::Other(reason) => reason,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RetireReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
