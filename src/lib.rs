//! `devprint` - Per-account device fingerprints
//!
//! # Features
//!
//! - **Generation**: randomized device identities (device id, session token,
//!   User-Agent, client metadata) from an injectable CSPRNG
//! - **History**: up to five retired fingerprints per account, restorable
//! - **Persistence**: JSON account store that keeps unrelated fields intact
//! - **Headers**: outbound header set for any HTTP client
//!
//! # Example
//!
//! ```rust,no_run
//! use devprint::{AccountFingerprintManager, FingerprintFactory, JsonFileStore, ProductIdentity};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let factory = FingerprintFactory::new(ProductIdentity::default())?;
//!     let store = JsonFileStore::new("accounts.json");
//!     let mut manager = AccountFingerprintManager::initialize(store, factory).await?;
//!
//!     let fresh = manager.regenerate_fingerprint("me@example.com")?;
//!     println!("New device id: {}", fresh.device_id);
//!     manager.flush().await?;
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod manager;
pub mod store;

pub use account::{Account, AccountsFile};
pub use config::Config;
pub use error::{FingerprintError, StoreError};
pub use fingerprint::{
    build_headers, ClientMetadata, Fingerprint, FingerprintFactory, FingerprintHeaders,
    FingerprintHistory, HistoryEntry, IdeType, Platform, PluginType, ProductIdentity,
    RetireReason, MAX_HISTORY,
};
pub use manager::AccountFingerprintManager;
pub use store::{AccountStore, JsonFileStore, MemoryStore};

/// Version of devprint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
