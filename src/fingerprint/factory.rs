//! Fingerprint generation and version re-stamping

use chrono::{SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::catalog::{API_CLIENTS, ARCHITECTURES, IDE_TYPES};
use super::{ClientMetadata, Fingerprint, Platform, PluginType, PRODUCT_NAME, PRODUCT_VERSION};
use crate::error::{FingerprintError, Result};

/// Product name and version that generated User-Agents claim
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProductIdentity {
    pub name: String,
    pub version: String,
}

impl Default for ProductIdentity {
    fn default() -> Self {
        Self {
            name: PRODUCT_NAME.to_string(),
            version: PRODUCT_VERSION.to_string(),
        }
    }
}

impl ProductIdentity {
    /// Build `<name>/<version> <platform_arch>`
    #[must_use]
    pub fn user_agent(&self, platform_arch: &str) -> String {
        format!("{}/{} {}", self.name, self.version, platform_arch)
    }

    /// Reject identities whose User-Agent could not be re-stamped later
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.name.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(FingerprintError::InvalidProduct {
                value: self.name.clone(),
                reason: "name must be non-empty without whitespace or '/'",
            });
        }
        if self.version.is_empty() || !self.version.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(FingerprintError::InvalidProduct {
                value: self.version.clone(),
                reason: "version must consist of digits and dots",
            });
        }
        Ok(())
    }

    fn user_agent_pattern(&self) -> Result<Regex> {
        let pattern = format!(r"^{}/[\d.]+ (.+)$", regex::escape(&self.name));
        Ok(Regex::new(&pattern)?)
    }
}

/// Generates fingerprints from an injected random source
pub struct FingerprintFactory {
    rng: Box<dyn RngCore + Send>,
    product: ProductIdentity,
    user_agent_pattern: Regex,
}

impl FingerprintFactory {
    /// Factory backed by an OS-seeded CSPRNG
    pub fn new(product: ProductIdentity) -> Result<Self> {
        Self::with_rng(product, StdRng::from_entropy())
    }

    /// Deterministic factory, for tests and reproducible output
    pub fn seeded(product: ProductIdentity, seed: u64) -> Result<Self> {
        Self::with_rng(product, StdRng::seed_from_u64(seed))
    }

    /// Factory drawing from `rng`, which must be a CSPRNG
    pub fn with_rng<R>(product: ProductIdentity, rng: R) -> Result<Self>
    where
        R: RngCore + CryptoRng + Send + 'static,
    {
        product.validate()?;
        let user_agent_pattern = product.user_agent_pattern()?;
        Ok(Self {
            rng: Box::new(rng),
            product,
            user_agent_pattern,
        })
    }

    #[must_use]
    pub fn product(&self) -> &ProductIdentity {
        &self.product
    }

    /// Generate a brand-new device identity
    pub fn generate(&mut self) -> Fingerprint {
        let platform = Platform::GENERATED[self.rng.gen_range(0..Platform::GENERATED.len())];
        let arch = self.pick(ARCHITECTURES);
        let os_version = self.pick(platform.os_versions());
        let ide_type = IDE_TYPES[self.rng.gen_range(0..IDE_TYPES.len())];
        let api_client = self.pick(API_CLIENTS);

        let fingerprint = Fingerprint {
            device_id: self.random_uuid().to_string(),
            session_token: self.random_hex::<16>(),
            user_agent: self
                .product
                .user_agent(&format!("{}/{}", platform.token(), arch)),
            api_client: api_client.to_string(),
            client_metadata: ClientMetadata {
                ide_type,
                platform,
                plugin_type: PluginType::Gemini,
                os_version: os_version.to_string(),
                arch: arch.to_string(),
                sqm_id: format!("{{{}}}", self.random_uuid().to_string().to_uppercase()),
            },
            quota_user: format!("device-{}", self.random_hex::<8>()),
            // Persisted with millisecond precision
            created_at: Utc::now().trunc_subsecs(3),
        };

        debug!(
            device_id = %fingerprint.device_id,
            user_agent = %fingerprint.user_agent,
            "Generated fingerprint"
        );
        fingerprint
    }

    /// Re-stamp the User-Agent with the current product version.
    ///
    /// Identity fields are never touched. A User-Agent that does not look like
    /// `<product>/<version> <platform>/<arch>` is left alone.
    #[must_use]
    pub fn update_version(&self, fingerprint: Fingerprint) -> Fingerprint {
        let Some(platform_arch) = self
            .user_agent_pattern
            .captures(&fingerprint.user_agent)
            .and_then(|caps| caps.get(1))
        else {
            return fingerprint;
        };

        let expected = self.product.user_agent(platform_arch.as_str());
        if fingerprint.user_agent == expected {
            return fingerprint;
        }

        debug!(
            device_id = %fingerprint.device_id,
            from = %fingerprint.user_agent,
            to = %expected,
            "Updated fingerprint version"
        );
        Fingerprint {
            user_agent: expected,
            ..fingerprint
        }
    }

    fn pick(&mut self, items: &[&'static str]) -> &'static str {
        items[self.rng.gen_range(0..items.len())]
    }

    fn random_uuid(&mut self) -> uuid::Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    fn random_hex<const N: usize>(&mut self) -> String {
        let mut bytes = [0u8; N];
        self.rng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

impl std::fmt::Debug for FingerprintFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FingerprintFactory")
            .field("product", &self.product)
            .finish_non_exhaustive()
    }
}
