// Fixed catalogs fingerprints are drawn from

use super::IdeType;

pub const DARWIN_VERSIONS: &[&str] = &["10.15.7", "11.6.8", "12.6.3", "13.5.2", "14.2.1", "14.5"];

pub const WIN32_VERSIONS: &[&str] = &[
    "10.0.19041",
    "10.0.19042",
    "10.0.19043",
    "10.0.22000",
    "10.0.22621",
    "10.0.22631",
];

pub const LINUX_VERSIONS: &[&str] = &["5.15.0", "5.19.0", "6.1.0", "6.2.0", "6.5.0", "6.6.0"];

pub const ARCHITECTURES: &[&str] = &["x64", "arm64"];

pub const IDE_TYPES: &[IdeType] = &[
    IdeType::IdeUnspecified,
    IdeType::Vscode,
    IdeType::Intellij,
    IdeType::AndroidStudio,
    IdeType::CloudShellEditor,
];

/// `X-Goog-Api-Client` signatures of real SDK clients
pub const API_CLIENTS: &[&str] = &[
    "google-cloud-sdk vscode_cloudshelleditor/0.1",
    "google-cloud-sdk vscode/1.86.0",
    "google-cloud-sdk vscode/1.87.0",
    "google-cloud-sdk intellij/2024.1",
    "google-cloud-sdk android-studio/2024.1",
    "gcloud-python/1.2.0 grpc-google-iam-v1/0.12.6",
];
