//! Account persistence
//!
//! The manager only ever talks to an [`AccountStore`]. `JsonFileStore` is the
//! on-disk backend; `MemoryStore` keeps everything in process.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::account::AccountsFile;
use crate::error::StoreError;

/// Load/save contract for account records
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load all account records. A store that does not exist yet is empty.
    async fn load(&self) -> Result<AccountsFile, StoreError>;

    /// Replace the stored records with `file`
    async fn save(&self, file: &AccountsFile) -> Result<(), StoreError>;
}

/// JSON file on disk, written atomically via rename
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_else(|| "accounts.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl AccountStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<AccountsFile, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Account store missing, starting empty");
                return Ok(AccountsFile::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(AccountsFile::default());
        }

        let file: AccountsFile =
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: self.path.display().to_string(),
                source,
            })?;

        debug!(accounts = file.accounts.len(), "Loaded account store");
        Ok(file)
    }

    #[instrument(skip(self, file), fields(path = %self.path.display()))]
    async fn save(&self, file: &AccountsFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(file).map_err(StoreError::Serialize)?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(accounts = file.accounts.len(), "Saved account store");
        Ok(())
    }
}

/// In-process store; clones share the same records
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    file: Arc<Mutex<AccountsFile>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(file: AccountsFile) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }

    /// Copy of the records as last saved
    pub async fn snapshot(&self) -> AccountsFile {
        self.file.lock().await.clone()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn load(&self) -> Result<AccountsFile, StoreError> {
        Ok(self.snapshot().await)
    }

    async fn save(&self, file: &AccountsFile) -> Result<(), StoreError> {
        *self.file.lock().await = file.clone();
        Ok(())
    }
}
