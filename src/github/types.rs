//! Request and response payloads of the GitHub releases API.

use serde::{Deserialize, Serialize};

/// Body of the create-release call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    /// Tag the release points at, e.g. `v1.2.0`
    pub tag_name: String,
    /// Display title
    pub name: String,
    /// Release notes
    pub body: String,
    /// Create as an unpublished draft
    pub draft: bool,
    /// Mark as a pre-release
    pub prerelease: bool,
}

impl ReleaseRequest {
    /// Published, non-prerelease release titled `Release {version}`
    pub fn new(version: &str, body: impl Into<String>) -> Self {
        Self {
            tag_name: version.to_string(),
            name: format!("Release {version}"),
            body: body.into(),
            draft: false,
            prerelease: false,
        }
    }

    /// Set the draft flag
    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Set the prerelease flag
    pub fn prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }
}

/// Release record returned by a successful create call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRelease {
    /// Release ID
    #[serde(default)]
    pub id: u64,
    /// Web page of the release
    #[serde(default)]
    pub html_url: String,
    /// Asset upload URL template, e.g. `https://uploads.github.com/.../assets{?name,label}`
    pub upload_url: String,
}

impl CreatedRelease {
    /// Web URL if the API reported one, otherwise the release ID
    pub fn display_url(&self) -> String {
        if self.html_url.is_empty() {
            format!("#{}", self.id)
        } else {
            self.html_url.clone()
        }
    }
}

/// Asset record returned by a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadedAsset {
    /// Asset file name
    #[serde(default)]
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Public download URL
    #[serde(default)]
    pub browser_download_url: String,
}

/// A release with its asset attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    /// The created release
    pub release: CreatedRelease,
    /// The uploaded archive
    pub asset: UploadedAsset,
}
