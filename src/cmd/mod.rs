pub mod accounts;
pub mod fingerprint;
pub mod rotate;

use anyhow::{Context, Result};

use devprint::{AccountFingerprintManager, Config, FingerprintFactory, JsonFileStore};

/// Open the configured store, backfilling and persisting any missing fingerprints
pub async fn open_manager(config: &Config) -> Result<AccountFingerprintManager<JsonFileStore>> {
    let path = config.store_path();
    let factory = FingerprintFactory::new(config.product.clone())?;
    let mut manager = AccountFingerprintManager::initialize(JsonFileStore::new(&path), factory)
        .await
        .with_context(|| format!("failed to load accounts from {}", path.display()))?;
    manager.flush().await?;
    Ok(manager)
}
