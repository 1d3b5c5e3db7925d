//! Read-only git queries used by a release.
//!
//! All git access goes through the system `git` binary via
//! [`CommandRunner`](crate::process::CommandRunner): the remote URL for the
//! repository identity, and the latest tag plus commit subjects for the
//! changelog.

mod changelog;
mod identity;
mod repository;

pub use changelog::{Changelog, generate_changelog};
pub use identity::{RepositoryIdentity, parse_remote_url, resolve_identity};
pub use repository::GitRepository;
