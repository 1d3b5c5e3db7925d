//! Release command execution.
//!
//! Stages run strictly in order and the first failure ends the run:
//! validate input, resolve configuration, detect the repository, build,
//! archive, generate the changelog, publish.

use super::args::{ReleaseOptions, validate_version};
use super::output::OutputManager;
use crate::archive::{ArchiveGuard, create_archive};
use crate::build::run_build;
use crate::config::{Config, EnvConfig};
use crate::error::Result;
use crate::git::{GitRepository, generate_changelog, resolve_identity};
use crate::github::{GitHubClient, GitHubReleaseManager, ReleaseRequest};
use crate::process::CommandRunner;

/// Outcome of a successful release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSummary {
    /// Released version tag
    pub version: String,
    /// `owner/repo`
    pub repository: String,
    /// Web URL (or ID) of the release
    pub release_url: String,
    /// Name of the uploaded asset
    pub asset_name: String,
    /// Files packed into the archive
    pub archived_files: usize,
    /// Changelog entries in the release body
    pub changelog_entries: usize,
}

/// Run a complete release.
///
/// `runner` executes the build command and git; `env` supplies configuration
/// the file leaves unset. The archive named in `options` is removed before
/// this returns, whether or not the release succeeded.
pub async fn execute_release<R: CommandRunner>(
    runner: &R,
    options: &ReleaseOptions,
    env: &EnvConfig,
    output: &OutputManager,
) -> Result<ReleaseSummary> {
    validate_version(&options.version)?;

    output.println("⚙️  Loading configuration...");
    let config = Config::load(&options.env_file, env)?;

    output.println("🔍 Detecting repository...");
    let git = GitRepository::new(runner);
    let identity = resolve_identity(&git, &options.remote).await?;
    output.indent(&format!("Repository: {}", identity));

    let client = GitHubClient::new(&config.github_token, options.api_url.as_str())?;
    let manager = GitHubReleaseManager::new(client, identity);

    let archive = ArchiveGuard::new(&options.archive);

    output.println("🔨 Building project...");
    run_build(runner, &config.build_command).await?;
    output.success("Build finished");

    output.println(&format!(
        "📦 Creating ZIP archive from {}...",
        config.build_path.display()
    ));
    let summary = create_archive(&config.build_path, archive.path()).await?;
    output.success(&format!(
        "Archived {} file(s) into {} ({} bytes)",
        summary.files,
        summary.path.display(),
        summary.bytes
    ));

    output.println("📝 Generating changelog...");
    let changelog = generate_changelog(&git).await?;
    match &changelog.previous_tag {
        Some(tag) => output.indent(&format!("{} commit(s) since {}", changelog.entries(), tag)),
        None => output.indent(&format!("{} commit(s), first release", changelog.entries())),
    }

    output.println(&format!("🚀 Creating GitHub release {}...", options.version));
    let request = ReleaseRequest::new(&options.version, changelog.body.as_str())
        .draft(options.draft)
        .prerelease(options.prerelease);
    let published = manager.publish(&request, archive.path()).await?;
    output.success(&format!("Uploaded {}", published.asset.name));

    Ok(ReleaseSummary {
        version: options.version.clone(),
        repository: manager.identity().slug(),
        release_url: published.release.display_url(),
        asset_name: published.asset.name,
        archived_files: summary.files,
        changelog_entries: changelog.entries(),
    })
}
