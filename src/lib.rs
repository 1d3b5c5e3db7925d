//! # Kodegen Release
//!
//! Release automation for any project with a build command and a GitHub
//! remote.
//!
//! A release is one fail-fast sequence:
//!
//! 1. load `GITHUB_TOKEN`, `BUILD_PATH` and `BUILD_COMMAND` from `.release.env`
//!    or the environment,
//! 2. derive `owner/repo` from the git remote,
//! 3. run the build command,
//! 4. zip the build output into `release.zip`,
//! 5. generate a changelog from commits since the last tag,
//! 6. create the GitHub release and upload the archive to it.
//!
//! The archive is deleted when the run ends, whatever the outcome.
//!
//! ## Usage
//!
//! ```bash
//! kodegen_release v1.0.0
//! kodegen_release v1.1.0-rc.1 --prerelease
//! kodegen_release v1.0.0 --env-file ci/release.env --remote upstream
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod archive;
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod process;

// Re-export main types for public API
pub use archive::{ArchiveGuard, ArchiveSummary, create_archive};
pub use cli::{Args, ReleaseOptions, ReleaseSummary, execute_release};
pub use config::{Config, EnvConfig};
pub use error::{ReleaseError, Result};
pub use git::{Changelog, GitRepository, RepositoryIdentity};
pub use github::{GitHubClient, GitHubReleaseManager, PublishedRelease, ReleaseRequest};
pub use process::{CommandOutput, CommandRunner, SystemRunner};
