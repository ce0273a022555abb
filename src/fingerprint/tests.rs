//! Unit tests for fingerprint generation, headers and versioning

use super::catalog::{API_CLIENTS, ARCHITECTURES};
use super::headers::{API_CLIENT, CLIENT_METADATA, DEVICE_ID, QUOTA_USER, USER_AGENT};
use super::*;

fn factory() -> FingerprintFactory {
    FingerprintFactory::new(ProductIdentity::default()).unwrap()
}

fn product(version: &str) -> ProductIdentity {
    ProductIdentity {
        name: PRODUCT_NAME.to_string(),
        version: version.to_string(),
    }
}

#[test]
fn test_generate_structure() {
    let fp = factory().generate();

    assert!(uuid::Uuid::parse_str(&fp.device_id).is_ok());
    assert_eq!(fp.session_token.len(), 32);
    assert!(fp.session_token.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(fp.quota_user.starts_with("device-"));
    assert_eq!(fp.quota_user.len(), "device-".len() + 16);
    assert!(API_CLIENTS.contains(&fp.api_client.as_str()));
    assert_eq!(fp.client_metadata.plugin_type, PluginType::Gemini);
    assert!(ARCHITECTURES.contains(&fp.client_metadata.arch.as_str()));
    assert!(fp
        .client_metadata
        .platform
        .os_versions()
        .contains(&fp.client_metadata.os_version.as_str()));

    let sqm = &fp.client_metadata.sqm_id;
    assert!(sqm.starts_with('{') && sqm.ends_with('}'));
    assert_eq!(sqm, &sqm.to_uppercase());
    assert!(uuid::Uuid::parse_str(&sqm[1..sqm.len() - 1]).is_ok());
}

#[test]
fn test_user_agent_carries_current_version() {
    let mut factory = factory();
    for _ in 0..20 {
        let fp = factory.generate();
        let prefix = format!("{PRODUCT_NAME}/{PRODUCT_VERSION} ");
        let rest = fp.user_agent.strip_prefix(&prefix).expect("version prefix");
        let (platform, arch) = rest.split_once('/').expect("platform/arch");
        assert_eq!(platform, fp.client_metadata.platform.token());
        assert_eq!(arch, fp.client_metadata.arch);
    }
}

#[test]
fn test_generated_ids_are_unique() {
    let mut factory = factory();
    let a = factory.generate();
    let b = factory.generate();
    assert_ne!(a.device_id, b.device_id);
    assert_ne!(a.session_token, b.session_token);
    assert_ne!(a.quota_user, b.quota_user);
}

#[test]
fn test_seeded_factory_is_deterministic() {
    let mut a = FingerprintFactory::seeded(ProductIdentity::default(), 42).unwrap();
    let mut b = FingerprintFactory::seeded(ProductIdentity::default(), 42).unwrap();
    let (fa, fb) = (a.generate(), b.generate());
    assert_eq!(fa.device_id, fb.device_id);
    assert_eq!(fa.session_token, fb.session_token);
    assert_eq!(fa.client_metadata, fb.client_metadata);
}

#[test]
fn test_headers_contain_fingerprint_fields() {
    let fp = factory().generate();
    let headers = build_headers(Some(&fp));

    assert_eq!(headers.len(), 5);
    assert_eq!(headers.get(USER_AGENT), Some(fp.user_agent.as_str()));
    assert_eq!(headers.get(API_CLIENT), Some(fp.api_client.as_str()));
    assert_eq!(headers.get(QUOTA_USER), Some(fp.quota_user.as_str()));
    assert_eq!(headers.get(DEVICE_ID), Some(fp.device_id.as_str()));
    assert_eq!(headers.get("x-client-device-id"), Some(fp.device_id.as_str()));
}

#[test]
fn test_client_metadata_header_round_trips() {
    let fp = factory().generate();
    let headers = fp.to_headers();
    let raw = headers.get(CLIENT_METADATA).unwrap();

    assert!(!raw.contains('\n'));
    let parsed: ClientMetadata = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed, fp.client_metadata);
}

#[test]
fn test_missing_fingerprint_yields_no_headers() {
    let headers = build_headers(None);
    assert!(headers.is_empty());
    assert!(headers.to_header_map().unwrap().is_empty());
}

#[test]
fn test_header_map_conversion() {
    let fp = factory().generate();
    let map = fp.to_headers().to_header_map().unwrap();
    assert_eq!(map.len(), 5);
    assert_eq!(map["user-agent"], fp.user_agent.as_str());
    assert_eq!(map["x-goog-quotauser"], fp.quota_user.as_str());
}

#[test]
fn test_update_version_rewrites_only_user_agent() {
    let old = FingerprintFactory::seeded(product("0.0.1"), 1)
        .unwrap()
        .generate();
    assert!(old.user_agent.starts_with("antigravity/0.0.1 "));

    let current = factory();
    let updated = current.update_version(old.clone());

    let platform_arch = old.user_agent.split_once(' ').unwrap().1;
    assert_eq!(
        updated.user_agent,
        format!("{PRODUCT_NAME}/{PRODUCT_VERSION} {platform_arch}")
    );
    assert_eq!(updated.device_id, old.device_id);
    assert_eq!(updated.session_token, old.session_token);
    assert_eq!(updated.quota_user, old.quota_user);
    assert_eq!(updated.client_metadata, old.client_metadata);
    assert_eq!(updated.created_at, old.created_at);
}

#[test]
fn test_update_version_keeps_current_fingerprint() {
    let factory = factory();
    let fp = FingerprintFactory::new(ProductIdentity::default())
        .unwrap()
        .generate();
    assert_eq!(factory.update_version(fp.clone()), fp);
}

#[test]
fn test_update_version_ignores_malformed_user_agent() {
    let factory = factory();
    let mut fp = FingerprintFactory::new(ProductIdentity::default())
        .unwrap()
        .generate();

    for ua in ["", "curl/8.0", "antigravity/ darwin/x64", "other/1.0 linux/x64"] {
        fp.user_agent = ua.to_string();
        assert_eq!(factory.update_version(fp.clone()).user_agent, ua);
    }
}

#[test]
fn test_platform_token_and_fallback() {
    assert_eq!(Platform::Macos.token(), "darwin");
    assert_eq!(Platform::Windows.token(), "win32");
    assert_eq!(Platform::Linux.token(), "linux");
    assert_eq!(
        Platform::PlatformUnspecified.os_versions(),
        Platform::Linux.os_versions()
    );
}

#[test]
fn test_enum_wire_values() {
    let meta = factory().generate().client_metadata;
    let mut value = serde_json::to_value(&meta).unwrap();
    assert_eq!(value["pluginType"], "GEMINI");

    value["platform"] = "BEOS".into();
    value["ideType"] = "EMACS".into();
    let parsed: ClientMetadata = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.platform, Platform::PlatformUnspecified);
    assert_eq!(parsed.ide_type, IdeType::IdeUnspecified);

    assert_eq!(serde_json::to_value(Platform::Macos).unwrap(), "MACOS");
    assert_eq!(
        serde_json::to_value(IdeType::CloudShellEditor).unwrap(),
        "CLOUD_SHELL_EDITOR"
    );
}

#[test]
fn test_retire_reason_strings() {
    for (reason, text) in [
        (RetireReason::Regenerated, "regenerated"),
        (RetireReason::Restored, "restored"),
        (RetireReason::Migrated, "migrated"),
    ] {
        assert_eq!(serde_json::to_value(&reason).unwrap(), text);
        assert_eq!(RetireReason::from(text.to_string()), reason);
    }

    let custom: RetireReason = serde_json::from_str("\"rotated-by-admin\"").unwrap();
    assert_eq!(custom, RetireReason::Other("rotated-by-admin".into()));
    assert_eq!(custom.to_string(), "rotated-by-admin");
}

#[test]
fn test_fingerprint_json_shape() {
    let fp = factory().generate();
    let value = serde_json::to_value(&fp).unwrap();
    for key in [
        "deviceId",
        "sessionToken",
        "userAgent",
        "apiClient",
        "quotaUser",
        "createdAt",
        "clientMetadata",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert_eq!(
        value["createdAt"].as_i64(),
        Some(fp.created_at.timestamp_millis())
    );
    let back: Fingerprint = serde_json::from_value(value).unwrap();
    assert_eq!(back, fp);
}

#[test]
fn test_factory_rejects_unrestampable_version() {
    for version in ["2.0.0-rc1", "", "v2", "2.0 beta"] {
        let err = FingerprintFactory::new(product(version)).unwrap_err();
        assert!(
            matches!(err, crate::FingerprintError::InvalidProduct { ref value, .. } if value == version),
            "{version:?} should be rejected, got {err}"
        );
    }
}

#[test]
fn test_factory_rejects_unrestampable_name() {
    for name in ["", "anti gravity", "anti/gravity"] {
        let identity = ProductIdentity {
            name: name.to_string(),
            version: PRODUCT_VERSION.to_string(),
        };
        assert!(matches!(
            FingerprintFactory::new(identity),
            Err(crate::FingerprintError::InvalidProduct { .. })
        ));
    }
}

#[test]
fn test_configured_version_can_be_restamped() {
    let fp = FingerprintFactory::new(product("2.0.0"))
        .unwrap()
        .generate();
    let updated = FingerprintFactory::new(product("2.1"))
        .unwrap()
        .update_version(fp.clone());

    let platform_arch = fp.user_agent.split_once(' ').unwrap().1;
    assert_eq!(updated.user_agent, format!("{PRODUCT_NAME}/2.1 {platform_arch}"));
    assert_eq!(updated.device_id, fp.device_id);
}

#[test]
fn test_factory_accepts_os_rng() {
    let mut factory =
        FingerprintFactory::with_rng(ProductIdentity::default(), rand::rngs::OsRng).unwrap();
    assert!(uuid::Uuid::parse_str(&factory.generate().device_id).is_ok());
}

#[test]
fn test_known_ide_types_round_trip() {
    for ide in super::catalog::IDE_TYPES {
        let json = serde_json::to_value(ide).unwrap();
        let back: IdeType = serde_json::from_value(json).unwrap();
        assert_eq!(&back, ide);
    }
    assert_eq!(
        serde_json::to_value(IdeType::IdeUnspecified).unwrap(),
        "IDE_UNSPECIFIED"
    );
}
