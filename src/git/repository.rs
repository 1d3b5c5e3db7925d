//! Thin wrapper over the git command line.

use crate::process::{CommandOutput, CommandRunner};
use std::io;

/// Format string producing one `- <subject>` line per commit
const CHANGELOG_FORMAT: &str = "--pretty=format:- %s";

/// Git queries issued through a [`CommandRunner`]
pub struct GitRepository<'a, R> {
    runner: &'a R,
}

impl<'a, R: CommandRunner> GitRepository<'a, R> {
    /// Wrap a runner whose working directory is inside the repository
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    async fn git(&self, args: &[&str]) -> io::Result<CommandOutput> {
        self.runner.output("git", args).await
    }

    /// `git config --get remote.<remote>.url`
    pub async fn remote_url(&self, remote: &str) -> io::Result<CommandOutput> {
        let key = format!("remote.{remote}.url");
        self.git(&["config", "--get", &key]).await
    }

    /// Most recent tag reachable from HEAD, `None` if there is none.
    ///
    /// Any failure of `git describe` is read as "no tag yet".
    pub async fn latest_tag(&self) -> Option<String> {
        match self.git(&["describe", "--tags", "--abbrev=0"]).await {
            Ok(output) if output.success => {
                let tag = output.stdout.trim();
                (!tag.is_empty()).then(|| tag.to_string())
            }
            Ok(output) => {
                log::debug!("git describe found no tag: {}", output.stderr.trim());
                None
            }
            Err(e) => {
                log::debug!("git describe could not run: {}", e);
                None
            }
        }
    }

    /// Commit subjects formatted as `- <subject>`, from `since` (exclusive) to
    /// HEAD, or the whole history when `since` is `None`.
    pub async fn commit_subjects(&self, since: Option<&str>) -> io::Result<CommandOutput> {
        match since {
            Some(tag) => {
                let range = format!("{tag}..HEAD");
                self.git(&["log", &range, CHANGELOG_FORMAT]).await
            }
            None => self.git(&["log", CHANGELOG_FORMAT]).await,
        }
    }
}
