//! Error types for kodegen_release operations.
//!
//! Each stage of the release pipeline owns one error enum. `ReleaseError`
//! wraps them all and knows which stage failed and what the user can do next.

use std::path::PathBuf;
use thiserror::Error;

use crate::github::CreatedRelease;

/// Result type alias for kodegen_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all kodegen_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Repository identity errors
    #[error("Repository error: {0}")]
    Identity(#[from] IdentityError),

    /// Build command errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Archive creation errors
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// Changelog generation errors
    #[error("Changelog error: {0}")]
    Changelog(#[from] ChangelogError),

    /// GitHub publishing errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Configuration resolution errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required fields absent from both the file and the environment
    #[error("missing required configuration: {}", .fields.join(", "))]
    Missing {
        /// Names of every missing field
        fields: Vec<&'static str>,
    },

    /// Configuration file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Repository identity errors
#[derive(Error, Debug)]
pub enum IdentityError {
    /// git could not report the remote URL
    #[error("failed to get remote URL for '{remote}': {reason}")]
    RemoteUrl {
        /// Remote name
        remote: String,
        /// Reason for the error
        reason: String,
    },

    /// Remote URL did not yield an owner and a repository name
    #[error("could not derive owner/repo from remote URL '{url}'")]
    Unparseable {
        /// The remote URL as reported by git
        url: String,
    },
}

/// Build command errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Build command string was blank
    #[error("build command is empty")]
    EmptyCommand,

    /// Build program could not be started
    #[error("could not run '{command}': {source}")]
    Launch {
        /// Command line
        command: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Build program exited unsuccessfully
    #[error("'{command}' exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    Failed {
        /// Command line
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },
}

/// Archive creation errors
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Build output directory does not exist
    #[error("build directory {} not found", .path.display())]
    DirectoryNotFound {
        /// Expected directory
        path: PathBuf,
    },

    /// Build output path is not a directory
    #[error("build path {} is not a directory", .path.display())]
    NotADirectory {
        /// Offending path
        path: PathBuf,
    },

    /// Filesystem error while walking or reading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error
    #[error("failed to walk build directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// ZIP writer error
    #[error("failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Background archive task failed
    #[error("archive task failed: {0}")]
    Task(String),
}

/// Changelog generation errors
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// Commit listing failed
    #[error("failed to list commits: {reason}")]
    Log {
        /// Reason for the error
        reason: String,
    },
}

/// GitHub publishing errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// Release creation returned a non-201 status
    #[error("failed to create release ({status}): {body}")]
    CreateRelease {
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Asset upload returned a non-201 status after the release was created
    #[error("failed to upload asset ({status}): {body}")]
    UploadAsset {
        /// The release that now exists without its asset
        release: Box<CreatedRelease>,
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Archive could not be read for upload
    #[error("failed to read {}: {source}", .path.display())]
    ReadArchive {
        /// Archive path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Malformed URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// URL text
        url: String,
        /// Reason for the error
        reason: String,
    },

    /// Response body could not be decoded
    #[error("unexpected response from {operation}: {reason}")]
    Decode {
        /// Operation that produced the response
        operation: &'static str,
        /// Reason for the error
        reason: String,
    },

    /// Transport-level failure
    #[error("network error during {operation}: {source}")]
    Network {
        /// Operation in progress
        operation: &'static str,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client could not be constructed
    #[error("failed to initialize GitHub client: {reason}")]
    ClientInit {
        /// Reason for the error
        reason: String,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Name of the pipeline stage that produced this error
    pub fn stage(&self) -> &'static str {
        match self {
            ReleaseError::Config(_) => "Configuration",
            ReleaseError::Identity(_) => "Repository detection",
            ReleaseError::Build(_) => "Build",
            ReleaseError::Archive(_) => "Archive",
            ReleaseError::Changelog(_) => "Changelog",
            ReleaseError::Publish(_) => "Publish",
            ReleaseError::Cli(_) => "Validation",
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Config(ConfigError::Missing { fields }) => vec![
                format!(
                    "Add {} to .release.env or export them in your shell",
                    fields.join(", ")
                ),
                "Each line of .release.env is KEY=VALUE, e.g. BUILD_PATH=dist".to_string(),
            ],
            ReleaseError::Identity(_) => vec![
                "Verify git remote URL: git remote -v".to_string(),
                "Use --remote to select a different remote".to_string(),
            ],
            ReleaseError::Build(BuildError::Launch { .. }) => vec![
                "Check that the first word of BUILD_COMMAND is an installed program".to_string(),
            ],
            ReleaseError::Archive(ArchiveError::DirectoryNotFound { .. }) => vec![
                "Check that BUILD_PATH matches the directory your build writes to".to_string(),
            ],
            ReleaseError::Publish(PublishError::CreateRelease { status: 401, .. }) => vec![
                "Verify GITHUB_TOKEN is valid and has the repo scope".to_string(),
            ],
            ReleaseError::Publish(PublishError::CreateRelease { status: 422, .. }) => vec![
                "A release for this tag may already exist; delete it or choose a new version"
                    .to_string(),
            ],
            ReleaseError::Publish(PublishError::UploadAsset { release, .. }) => vec![
                format!(
                    "Release {} was created without its asset",
                    release.display_url()
                ),
                "Upload the archive manually or delete the release before retrying".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
