//! Per-account fingerprint lifecycle
//!
//! The manager owns the in-memory copy of every account record, indexed by
//! email. All mutations are synchronous and take `&mut self`; persistence is
//! the only async step and happens on [`AccountFingerprintManager::flush`].
//! Hosts that share a manager between tasks must wrap it in a mutex.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::account::{Account, AccountsFile};
use crate::error::{FingerprintError, Result};
use crate::fingerprint::{
    build_headers, Fingerprint, FingerprintFactory, FingerprintHeaders, HistoryEntry,
    RetireReason,
};
use crate::store::AccountStore;

pub struct AccountFingerprintManager<S> {
    store: S,
    factory: FingerprintFactory,
    records: AccountsFile,
    index: HashMap<String, usize>,
    dirty: bool,
}

impl<S: AccountStore> AccountFingerprintManager<S> {
    /// Load accounts from `store` and bring every fingerprint up to date.
    ///
    /// Accounts without a fingerprint get one, stale User-Agent versions are
    /// re-stamped and over-long histories are trimmed. None of this touches an
    /// existing identity.
    #[instrument(skip_all)]
    pub async fn initialize(store: S, factory: FingerprintFactory) -> Result<Self> {
        let records = store.load().await?;

        let mut index = HashMap::with_capacity(records.accounts.len());
        for (position, account) in records.accounts.iter().enumerate() {
            if index.contains_key(&account.email) {
                warn!(email = %account.email, "Duplicate account email, keeping the first record");
                continue;
            }
            index.insert(account.email.clone(), position);
        }

        let mut manager = Self {
            store,
            factory,
            records,
            index,
            dirty: false,
        };
        manager.migrate();

        info!(
            accounts = manager.records.accounts.len(),
            dirty = manager.dirty,
            "Account fingerprints loaded"
        );
        Ok(manager)
    }

    fn migrate(&mut self) {
        let Self {
            factory,
            records,
            dirty,
            ..
        } = self;

        for account in &mut records.accounts {
            if backfill(account, factory) {
                *dirty = true;
            }

            if let Some(current) = account.fingerprint.take() {
                let updated = factory.update_version(current.clone());
                if updated != current {
                    *dirty = true;
                }
                account.fingerprint = Some(updated);
            }

            let dropped = account.fingerprint_history.enforce_cap();
            if dropped > 0 {
                warn!(email = %account.email, dropped, "Trimmed over-long fingerprint history");
                *dirty = true;
            }
        }
    }

    /// Give `email` a fingerprint if it has none; an existing one is kept.
    pub fn ensure_fingerprint(&mut self, email: &str) -> Result<&Fingerprint> {
        let position = self.position(email)?;
        let account = &mut self.records.accounts[position];
        if backfill(account, &mut self.factory) {
            self.dirty = true;
        }
        account
            .fingerprint
            .as_ref()
            .ok_or_else(|| FingerprintError::AccountNotFound(email.to_string()))
    }

    /// Retire the current fingerprint and install a freshly generated one
    #[instrument(skip(self))]
    pub fn regenerate_fingerprint(&mut self, email: &str) -> Result<Fingerprint> {
        let position = self.position(email)?;
        let fresh = self.factory.generate();
        let account = &mut self.records.accounts[position];

        if let Some(previous) = account.fingerprint.replace(fresh.clone()) {
            let evicted = account
                .fingerprint_history
                .push(HistoryEntry::retire(previous, RetireReason::Regenerated));
            if let Some(evicted) = evicted {
                debug!(device_id = %evicted.fingerprint.device_id, "Evicted oldest fingerprint");
            }
        }
        self.dirty = true;

        info!(device_id = %fresh.device_id, "Regenerated fingerprint");
        Ok(fresh)
    }

    /// Swap the history entry at `history_index` back in as current.
    ///
    /// The current fingerprint goes to the front of history tagged `restored`
    /// before the target is removed, so the target sits one slot further back
    /// by then. If that push evicted the target (it was the oldest of a full
    /// history) there is nothing left to remove.
    #[instrument(skip(self))]
    pub fn restore_fingerprint(&mut self, email: &str, history_index: usize) -> Result<Fingerprint> {
        let position = self.position(email)?;
        let account = &mut self.records.accounts[position];

        let target = account
            .fingerprint_history
            .get(history_index)?
            .fingerprint
            .clone();

        match account.fingerprint.take() {
            Some(current) => {
                account
                    .fingerprint_history
                    .push(HistoryEntry::retire(current, RetireReason::Restored));
                let shifted = history_index + 1;
                if shifted < account.fingerprint_history.len() {
                    account.fingerprint_history.remove(shifted)?;
                }
            }
            None => {
                account.fingerprint_history.remove(history_index)?;
            }
        }

        let restored = self.factory.update_version(target);
        account.fingerprint = Some(restored.clone());
        self.dirty = true;

        info!(device_id = %restored.device_id, history_index, "Restored fingerprint");
        Ok(restored)
    }

    /// Retired fingerprints of `email`, most recent first
    pub fn fingerprint_history(&self, email: &str) -> Result<&[HistoryEntry]> {
        Ok(self.account(email)?.fingerprint_history.as_slice())
    }

    pub fn account(&self, email: &str) -> Result<&Account> {
        let position = self.position(email)?;
        Ok(&self.records.accounts[position])
    }

    /// All accounts in store order
    #[must_use]
    pub fn all_accounts(&self) -> &[Account] {
        &self.records.accounts
    }

    /// Outbound headers for the current fingerprint of `email`
    pub fn headers(&self, email: &str) -> Result<FingerprintHeaders> {
        Ok(build_headers(self.account(email)?.fingerprint.as_ref()))
    }

    /// Whether there are changes not yet written to the store
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist pending changes, if any
    pub async fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.save().await?;
        }
        Ok(())
    }

    /// Persist unconditionally
    pub async fn save(&mut self) -> Result<()> {
        self.store.save(&self.records).await?;
        self.dirty = false;
        Ok(())
    }

    fn position(&self, email: &str) -> Result<usize> {
        self.index
            .get(email)
            .copied()
            .ok_or_else(|| FingerprintError::AccountNotFound(email.to_string()))
    }
}

/// Generate a fingerprint for an account that has none. Returns whether it did.
fn backfill(account: &mut Account, factory: &mut FingerprintFactory) -> bool {
    if account.fingerprint.is_some() {
        return false;
    }
    let fingerprint = factory.generate();
    info!(email = %account.email, device_id = %fingerprint.device_id, "Generated missing fingerprint");
    account.fingerprint = Some(fingerprint);
    account.fingerprint_history.clear();
    true
}

impl<S> std::fmt::Debug for AccountFingerprintManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountFingerprintManager")
            .field("accounts", &self.records.accounts.len())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
