//! Release configuration loaded from a `.release.env` file and the environment.
//!
//! The file holds `KEY=VALUE` lines. Values found in the file win; anything
//! the file leaves empty is looked up in an [`EnvConfig`] snapshot. Missing
//! fields are reported together once both sources have been consulted.

use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default configuration file name, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".release.env";

/// Key holding the GitHub API token
pub const GITHUB_TOKEN_KEY: &str = "GITHUB_TOKEN";
/// Key holding the build output directory
pub const BUILD_PATH_KEY: &str = "BUILD_PATH";
/// Key holding the build command line
pub const BUILD_COMMAND_KEY: &str = "BUILD_COMMAND";
/// Environment variable overriding the GitHub API base URL
pub const GITHUB_API_URL_KEY: &str = "GITHUB_API_URL";

/// Immutable snapshot of environment variables.
///
/// Captured once at startup and passed down explicitly so that nothing reads
/// the process environment behind the caller's back.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    vars: HashMap<String, String>,
}

impl EnvConfig {
    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable, treating empty values as unset
    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Resolved release configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// GitHub API token
    pub github_token: String,
    /// Directory produced by the build, archived for upload
    pub build_path: PathBuf,
    /// Build command line, split on whitespace when executed
    pub build_command: String,
}

/// Values collected from the sources before validation
#[derive(Debug, Default)]
struct PartialConfig {
    github_token: String,
    build_path: String,
    build_command: String,
}

impl PartialConfig {
    fn apply_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let Some((key, value)) = line.split_once('=') else {
            return;
        };

        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        match key.trim() {
            GITHUB_TOKEN_KEY => self.github_token = value.to_string(),
            BUILD_PATH_KEY => self.build_path = value.to_string(),
            BUILD_COMMAND_KEY => self.build_command = value.to_string(),
            other => log::trace!("Ignoring unrecognized key '{}'", other),
        }
    }

    fn fill_from_env(&mut self, env: &EnvConfig) {
        for (slot, key) in [
            (&mut self.github_token, GITHUB_TOKEN_KEY),
            (&mut self.build_path, BUILD_PATH_KEY),
            (&mut self.build_command, BUILD_COMMAND_KEY),
        ] {
            if slot.is_empty()
                && let Some(value) = env.get(key)
            {
                log::debug!("Using {} from environment", key);
                *slot = value;
            }
        }
    }

    fn validate(self) -> std::result::Result<Config, ConfigError> {
        let missing: Vec<&'static str> = [
            (GITHUB_TOKEN_KEY, &self.github_token),
            (BUILD_PATH_KEY, &self.build_path),
            (BUILD_COMMAND_KEY, &self.build_command),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Missing { fields: missing });
        }

        Ok(Config {
            github_token: self.github_token,
            build_path: PathBuf::from(self.build_path),
            build_command: self.build_command,
        })
    }
}

impl Config {
    /// Resolve configuration from `.release.env` text and the environment.
    ///
    /// This is the pure core of [`Config::load`]: `contents` is `None` when
    /// there is no file.
    pub fn resolve(contents: Option<&str>, env: &EnvConfig) -> Result<Self> {
        let mut partial = PartialConfig::default();
        if let Some(contents) = contents {
            for line in contents.lines() {
                partial.apply_line(line);
            }
        }
        partial.fill_from_env(env);
        Ok(partial.validate()?)
    }

    /// Load configuration from `path`, falling back to `env` for unset fields.
    ///
    /// A missing file only produces a warning. Any other read failure is an error.
    pub fn load(path: &Path, env: &EnvConfig) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} not found, using environment only", path.display());
                None
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
                .into());
            }
        };

        Self::resolve(contents.as_deref(), env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[test]
    fn parses_comments_quotes_and_whitespace() {
        let text = "# release settings\n\n  GITHUB_TOKEN = \"abc\"  \nBUILD_PATH='dist'\nBUILD_COMMAND=npm run build\n";
        let config = Config::resolve(Some(text), &EnvConfig::default()).unwrap();
        assert_eq!(config.github_token, "abc");
        assert_eq!(config.build_path, PathBuf::from("dist"));
        assert_eq!(config.build_command, "npm run build");
    }

    #[test]
    fn splits_on_first_equals_only() {
        let text = "GITHUB_TOKEN=a=b=c\nBUILD_PATH=out\nBUILD_COMMAND=make ARGS=1";
        let config = Config::resolve(Some(text), &EnvConfig::default()).unwrap();
        assert_eq!(config.github_token, "a=b=c");
        assert_eq!(config.build_command, "make ARGS=1");
    }

    #[test]
    fn ignores_unknown_keys_and_lines_without_equals() {
        let text = "UNRELATED=1\njust some words\nGITHUB_TOKEN=t\nBUILD_PATH=p\nBUILD_COMMAND=c";
        assert!(Config::resolve(Some(text), &EnvConfig::default()).is_ok());
    }

    #[test]
    fn empty_environment_values_count_as_missing() {
        let env = EnvConfig::from_pairs([(GITHUB_TOKEN_KEY, "")]);
        assert_eq!(env.get(GITHUB_TOKEN_KEY), None);
    }

    #[test]
    fn reports_every_missing_field_at_once() {
        let err = Config::resolve(Some("BUILD_PATH=dist"), &EnvConfig::default()).unwrap_err();
        match err {
            ReleaseError::Config(ConfigError::Missing { fields }) => {
                assert_eq!(fields, vec![GITHUB_TOKEN_KEY, BUILD_COMMAND_KEY]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
