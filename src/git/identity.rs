//! Repository owner/name derived from the git remote URL.

use super::GitRepository;
use crate::error::{IdentityError, Result};
use crate::process::CommandRunner;
use std::fmt;

/// GitHub owner and repository name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepositoryIdentity {
    /// `owner/repo`
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Parse owner/repo out of a git remote URL.
///
/// Handles both URL shapes GitHub hands out:
/// - HTTPS: `https://github.com/owner/repo.git`
/// - SSH SCP-like: `git@github.com:owner/repo.git`
///
/// The last path segment minus `.git` is the repository; the segment before
/// it, after any `:`, is the owner. No other validation is done.
pub fn parse_remote_url(url: &str) -> std::result::Result<RepositoryIdentity, IdentityError> {
    let url = url.trim();
    let unparseable = || IdentityError::Unparseable {
        url: url.to_string(),
    };

    let segments: Vec<&str> = url.split('/').collect();
    let &[.., owner_segment, repo_segment] = segments.as_slice() else {
        return Err(unparseable());
    };

    let repo = repo_segment.strip_suffix(".git").unwrap_or(repo_segment);
    let owner = owner_segment.rsplit(':').next().unwrap_or(owner_segment);

    if owner.is_empty() || repo.is_empty() {
        return Err(unparseable());
    }

    Ok(RepositoryIdentity {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

/// Read the URL of `remote` and derive the repository identity from it
pub async fn resolve_identity<R: CommandRunner>(
    git: &GitRepository<'_, R>,
    remote: &str,
) -> Result<RepositoryIdentity> {
    let output = git
        .remote_url(remote)
        .await
        .map_err(|e| IdentityError::RemoteUrl {
            remote: remote.to_string(),
            reason: e.to_string(),
        })?;

    if !output.success {
        let stderr = output.stderr.trim();
        return Err(IdentityError::RemoteUrl {
            remote: remote.to_string(),
            reason: if stderr.is_empty() {
                format!("git exited with {:?}", output.code)
            } else {
                stderr.to_string()
            },
        }
        .into());
    }

    let identity = parse_remote_url(&output.stdout)?;
    log::debug!("Resolved repository {} from remote '{}'", identity, remote);
    Ok(identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_https_remote() {
        let id = parse_remote_url("https://github.com/cyrup-ai/kodegen-release.git\n").unwrap();
        assert_eq!(id.owner, "cyrup-ai");
        assert_eq!(id.repo, "kodegen-release");
        assert_eq!(id.slug(), "cyrup-ai/kodegen-release");
    }

    #[test]
    fn parses_scp_like_ssh_remote() {
        let id = parse_remote_url("git@github.com:cyrup-ai/kodegen-release.git").unwrap();
        assert_eq!(id.owner, "cyrup-ai");
        assert_eq!(id.repo, "kodegen-release");
    }

    #[test]
    fn parses_remote_without_git_suffix() {
        let id = parse_remote_url("ssh://git@github.com/owner/repo").unwrap();
        assert_eq!(id.to_string(), "owner/repo");
    }

    #[test]
    fn rejects_urls_without_owner_and_repo() {
        assert!(parse_remote_url("repo.git").is_err());
        assert!(parse_remote_url("https://github.com/owner/").is_err());
        assert!(parse_remote_url("").is_err());
    }
}
