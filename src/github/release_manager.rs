//! GitHub Release management: create a release, then attach the archive.

use super::client::GitHubClient;
use super::types::{CreatedRelease, PublishedRelease, ReleaseRequest, UploadedAsset};
use crate::error::PublishError;
use crate::git::RepositoryIdentity;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode};
use std::path::Path;
use url::Url;

/// Resolve an upload URL template into the concrete URL for `file_name`.
///
/// Everything from the first `{` on is the template's parameter placeholder
/// and is dropped; `name=<file_name>` is appended as the query.
pub fn upload_url_for(template: &str, file_name: &str) -> Result<Url, PublishError> {
    let base = template.split('{').next().unwrap_or(template);
    let mut url = Url::parse(base).map_err(|e| PublishError::InvalidUrl {
        url: template.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("name", file_name);
    Ok(url)
}

/// Creates releases and uploads their assets for one repository
#[derive(Debug, Clone)]
pub struct GitHubReleaseManager {
    client: GitHubClient,
    identity: RepositoryIdentity,
}

impl GitHubReleaseManager {
    /// Create a manager publishing to `identity`
    pub fn new(client: GitHubClient, identity: RepositoryIdentity) -> Self {
        Self { client, identity }
    }

    /// Repository releases are published to
    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// Create the release record.
    ///
    /// Anything but `201 Created` fails with the response body verbatim.
    pub async fn create_release(
        &self,
        request: &ReleaseRequest,
    ) -> Result<CreatedRelease, PublishError> {
        let url = self.client.endpoint(&format!(
            "repos/{}/{}/releases",
            self.identity.owner, self.identity.repo
        ));

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&url, headers)
            .json(request)
            .send()
            .await
            .map_err(|source| PublishError::Network {
                operation: "create release",
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| PublishError::Network {
                operation: "create release",
                source,
            })?;

        if status != StatusCode::CREATED {
            return Err(PublishError::CreateRelease {
                status: status.as_u16(),
                body,
            });
        }

        let release: CreatedRelease =
            serde_json::from_str(&body).map_err(|e| PublishError::Decode {
                operation: "create release",
                reason: e.to_string(),
            })?;

        log::info!("Created release {} ({})", request.tag_name, release.display_url());
        Ok(release)
    }

    /// Upload `archive` as an asset of `release`.
    ///
    /// The whole file is sent as the single part of a multipart form.
    pub async fn upload_asset(
        &self,
        release: &CreatedRelease,
        archive: &Path,
    ) -> Result<UploadedAsset, PublishError> {
        let file_name = archive
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| PublishError::ReadArchive {
                path: archive.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "archive path has no file name",
                ),
            })?;

        let url = upload_url_for(&release.upload_url, file_name)?;

        let content = tokio::fs::read(archive)
            .await
            .map_err(|source| PublishError::ReadArchive {
                path: archive.to_path_buf(),
                source,
            })?;
        let size = content.len() as u64;

        let part = Part::stream_with_length(Body::from(Bytes::from(content)), size)
            .file_name(file_name.to_string())
            .mime_str("application/zip")
            .map_err(|source| PublishError::Network {
                operation: "upload asset",
                source,
            })?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url.as_str(), HeaderMap::new())
            .multipart(form)
            .send()
            .await
            .map_err(|source| PublishError::Network {
                operation: "upload asset",
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| PublishError::Network {
                operation: "upload asset",
                source,
            })?;

        if status != StatusCode::CREATED {
            return Err(PublishError::UploadAsset {
                release: Box::new(release.clone()),
                status: status.as_u16(),
                body,
            });
        }

        let asset = serde_json::from_str::<UploadedAsset>(&body).unwrap_or_else(|e| {
            log::debug!("Upload response was not an asset record: {}", e);
            UploadedAsset::default()
        });

        Ok(UploadedAsset {
            name: if asset.name.is_empty() {
                file_name.to_string()
            } else {
                asset.name
            },
            size: if asset.size == 0 { size } else { asset.size },
            browser_download_url: asset.browser_download_url,
        })
    }

    /// Create the release and upload `archive` to it.
    ///
    /// The upload is never attempted when creation fails. A failed upload
    /// returns [`PublishError::UploadAsset`], which carries the release that
    /// was already created.
    pub async fn publish(
        &self,
        request: &ReleaseRequest,
        archive: &Path,
    ) -> Result<PublishedRelease, PublishError> {
        let release = self.create_release(request).await?;
        let asset = self.upload_asset(&release, archive).await?;
        Ok(PublishedRelease { release, asset })
    }
}
