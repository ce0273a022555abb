//! Outbound request headers derived from a fingerprint

use http::{HeaderMap, HeaderName, HeaderValue};

use super::Fingerprint;
use crate::error::{FingerprintError, Result};

pub const USER_AGENT: &str = "User-Agent";
pub const API_CLIENT: &str = "X-Goog-Api-Client";
pub const CLIENT_METADATA: &str = "Client-Metadata";
pub const QUOTA_USER: &str = "X-Goog-QuotaUser";
pub const DEVICE_ID: &str = "X-Client-Device-Id";

/// Ordered header set for one fingerprint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintHeaders {
    entries: Vec<(&'static str, String)>,
}

impl FingerprintHeaders {
    /// Look up a header value, ignoring ASCII case of the name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to an `http::HeaderMap` for an HTTP client
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(self.entries.len());
        for &(name, ref value) in &self.entries {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FingerprintError::InvalidHeader { name })?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| FingerprintError::InvalidHeader { name })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

/// Build the header set for a fingerprint; no fingerprint means no headers
#[must_use]
pub fn build_headers(fingerprint: Option<&Fingerprint>) -> FingerprintHeaders {
    fingerprint.map(Fingerprint::to_headers).unwrap_or_default()
}

impl Fingerprint {
    #[must_use]
    pub fn to_headers(&self) -> FingerprintHeaders {
        // Strings and unit enums only, serialization cannot fail
        let metadata = serde_json::to_string(&self.client_metadata).unwrap_or_default();

        FingerprintHeaders {
            entries: vec![
                (USER_AGENT, self.user_agent.clone()),
                (API_CLIENT, self.api_client.clone()),
                (CLIENT_METADATA, metadata),
                (QUOTA_USER, self.quota_user.clone()),
                (DEVICE_ID, self.device_id.clone()),
            ],
        }
    }
}
