//! Command line argument parsing and validation.

use crate::archive::DEFAULT_ARCHIVE_NAME;
use crate::config::{DEFAULT_ENV_FILE, EnvConfig, GITHUB_API_URL_KEY};
use crate::error::CliError;
use crate::github::DEFAULT_API_URL;
use clap::Parser;
use std::path::PathBuf;

/// Guidance printed when the invocation is malformed
pub const USAGE_GUIDANCE: &str = "Usage: kodegen_release <version>
Example: kodegen_release v1.0.0

Note: Create a .release.env file with your configuration:
GITHUB_TOKEN=your-token-here
BUILD_PATH=dist
BUILD_COMMAND=npm run build";

/// Build, archive and publish a GitHub release
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kodegen_release",
    version,
    about = "Build, archive and publish a GitHub release",
    long_about = "Run the build command, zip the build output, generate a changelog from git \
history since the last tag, and publish a GitHub release with the archive attached.

Usage:
  kodegen_release v1.0.0
  kodegen_release v1.0.0 --env-file ci/release.env
  kodegen_release v2.0.0-rc.1 --prerelease"
)]
pub struct Args {
    /// Version tag to release, must start with 'v'
    #[arg(index = 1, value_name = "VERSION")]
    pub tag: String,

    /// Configuration file with GITHUB_TOKEN, BUILD_PATH and BUILD_COMMAND
    #[arg(long, value_name = "PATH", default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Git remote identifying the GitHub repository
    #[arg(long, value_name = "NAME", default_value = "origin")]
    pub remote: String,

    /// GitHub API base URL [default: $GITHUB_API_URL or https://api.github.com]
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Archive file written before upload and deleted afterwards
    #[arg(long, value_name = "FILE", default_value = DEFAULT_ARCHIVE_NAME)]
    pub archive: PathBuf,

    /// Create the release as a draft
    #[arg(long)]
    pub draft: bool,

    /// Mark the release as a pre-release
    #[arg(long)]
    pub prerelease: bool,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        validate_version(&self.tag)
    }
}

/// Release versions are tags of the form `v<something>`
pub fn validate_version(version: &str) -> Result<(), CliError> {
    if !version.starts_with('v') {
        return Err(CliError::InvalidArguments {
            reason: format!("Version must start with 'v' (e.g., v1.0.0), got '{version}'"),
        });
    }
    Ok(())
}

/// Settings for one release run
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Version tag
    pub version: String,
    /// Configuration file path
    pub env_file: PathBuf,
    /// Git remote name
    pub remote: String,
    /// GitHub API base URL
    pub api_url: String,
    /// Transient archive path
    pub archive: PathBuf,
    /// Draft flag of the release
    pub draft: bool,
    /// Prerelease flag of the release
    pub prerelease: bool,
}

impl ReleaseOptions {
    /// Options with every default applied
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            remote: "origin".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            archive: PathBuf::from(DEFAULT_ARCHIVE_NAME),
            draft: false,
            prerelease: false,
        }
    }

    /// Options from parsed arguments.
    ///
    /// `--api-url` wins over `GITHUB_API_URL` in `env`, which wins over the
    /// public API.
    pub fn from_args(args: &Args, env: &EnvConfig) -> Self {
        Self {
            version: args.tag.clone(),
            env_file: args.env_file.clone(),
            remote: args.remote.clone(),
            api_url: args
                .api_url
                .clone()
                .or_else(|| env.get(GITHUB_API_URL_KEY))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            archive: args.archive.clone(),
            draft: args.draft,
            prerelease: args.prerelease,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn version_flag_and_version_argument_coexist() {
        let args = Args::try_parse_from(["kodegen_release", "v1.0.0"]).unwrap();
        assert_eq!(args.tag, "v1.0.0");

        let err = Args::try_parse_from(["kodegen_release", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn defaults_apply() {
        let args = Args::try_parse_from(["kodegen_release", "v1.0.0"]).unwrap();
        let options = ReleaseOptions::from_args(&args, &EnvConfig::default());
        assert_eq!(options.version, "v1.0.0");
        assert_eq!(options.api_url, DEFAULT_API_URL);
        assert_eq!(options.env_file, PathBuf::from(".release.env"));
        assert_eq!(options.archive, PathBuf::from("release.zip"));
        assert_eq!(options.remote, "origin");
        assert!(!options.draft && !options.prerelease);
    }

    #[test]
    fn api_url_comes_from_flag_then_environment_snapshot() {
        let env = EnvConfig::from_pairs([(GITHUB_API_URL_KEY, "https://ghe.example.com/api/v3")]);

        let args = Args::try_parse_from(["kodegen_release", "v1.0.0"]).unwrap();
        assert_eq!(
            ReleaseOptions::from_args(&args, &env).api_url,
            "https://ghe.example.com/api/v3"
        );

        let args =
            Args::try_parse_from(["kodegen_release", "v1.0.0", "--api-url", "http://127.0.0.1:9"])
                .unwrap();
        assert_eq!(ReleaseOptions::from_args(&args, &env).api_url, "http://127.0.0.1:9");
    }

    #[test]
    fn requires_exactly_one_version() {
        assert!(Args::try_parse_from(["kodegen_release"]).is_err());
        assert!(Args::try_parse_from(["kodegen_release", "v1", "v2"]).is_err());
    }

    #[test]
    fn version_must_start_with_v() {
        assert!(validate_version("v1.0.0").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("").is_err());
    }
}
