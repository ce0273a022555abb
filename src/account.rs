//! Persisted account records

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::fingerprint::{Fingerprint, FingerprintHistory};

/// One account as stored on disk.
///
/// Only the fingerprint fields are interpreted; everything else in the record
/// (credentials, flags) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<Fingerprint>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fingerprint_history: FingerprintHistory,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            fingerprint: None,
            fingerprint_history: FingerprintHistory::new(),
            extra: Map::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<FingerprintHistory, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FingerprintHistory>::deserialize(deserializer)?.unwrap_or_default())
}

/// Whole account store file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountsFile {
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Top-level keys other than `accounts`, e.g. `settings`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
