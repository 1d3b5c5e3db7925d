//! GitHub integration for release operations
//!
//! Publishing is two explicit steps: create the release record, then upload
//! the archive to the upload URL the first step returned.

mod client;
mod release_manager;
mod types;

pub use client::{ACCEPT_MEDIA_TYPE, DEFAULT_API_URL, GitHubClient};
pub use release_manager::{GitHubReleaseManager, upload_url_for};
pub use types::{CreatedRelease, PublishedRelease, ReleaseRequest, UploadedAsset};
