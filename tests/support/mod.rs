//! Shared test helpers: a scripted command runner and fixture builders.

#![allow(dead_code)]

use kodegen_release::{CommandOutput, CommandRunner};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Canned reply for one command line
#[derive(Clone)]
pub enum Reply {
    Output(CommandOutput),
    NotFound,
}

/// CommandRunner that answers from a script and records every call
pub struct FakeRunner {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reply to the exact command line `command` with `output`
    pub fn on(mut self, command: &str, output: CommandOutput) -> Self {
        self.rules.push((command.to_string(), Reply::Output(output)));
        self
    }

    /// Make `command` fail to launch
    pub fn on_missing(mut self, command: &str) -> Self {
        self.rules.push((command.to_string(), Reply::NotFound));
        self
    }

    /// A repository with an `origin` remote, a build command `true`, and the given history
    pub fn repository(remote_url: &str, latest_tag: Option<&str>, log: &str) -> Self {
        let runner = Self::new()
            .on(
                "git config --get remote.origin.url",
                CommandOutput::ok(format!("{remote_url}\n")),
            )
            .on("true", CommandOutput::ok(""));

        match latest_tag {
            Some(tag) => runner
                .on(
                    "git describe --tags --abbrev=0",
                    CommandOutput::ok(format!("{tag}\n")),
                )
                .on(
                    &format!("git log {tag}..HEAD --pretty=format:- %s"),
                    CommandOutput::ok(log),
                ),
            None => runner
                .on(
                    "git describe --tags --abbrev=0",
                    CommandOutput::failed(128, "fatal: No names found, cannot describe anything."),
                )
                .on("git log --pretty=format:- %s", CommandOutput::ok(log)),
        }
    }

    /// Every command line run so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(line.clone());

        match self.rules.iter().find(|(command, _)| *command == line) {
            Some((_, Reply::Output(output))) => Ok(output.clone()),
            Some((_, Reply::NotFound)) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program}: not found"),
            )),
            None => Ok(CommandOutput::failed(127, format!("unscripted command: {line}"))),
        }
    }
}

impl CommandRunner for FakeRunner {
    async fn output(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        self.reply(program, args)
    }

    async fn run_inherited(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        self.reply(program, args).map(|output| CommandOutput {
            stdout: String::new(),
            stderr: String::new(),
            ..output
        })
    }
}

/// Write `files` (relative path, contents) under `root`, creating directories
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

/// Write a `.release.env` into `dir` and return its path
pub fn write_env_file(dir: &Path, token: &str, build_path: &Path, command: &str) -> PathBuf {
    let path = dir.join(".release.env");
    std::fs::write(
        &path,
        format!(
            "# release settings\nGITHUB_TOKEN={token}\nBUILD_PATH=\"{}\"\nBUILD_COMMAND={command}\n",
            build_path.display()
        ),
    )
    .unwrap();
    path
}
