use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{ExtractError, Result};

/// Source of the descriptive name of the latest tag.
pub trait TagSource {
    /// Raw descriptive tag string, e.g. `v1.0.0-3-gabc1234`.
    fn latest_tag(&self) -> Result<String>;

    /// Repository the tag comes from, for diagnostics.
    fn repo(&self) -> &Path;
}

/// Shells out to the `git` executable inside `repo`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    repo: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<String>, repo: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            repo: repo.into(),
        }
    }

    /// Most recently created tag by creation date, or None without tags.
    pub fn newest_tag(&self) -> Result<Option<String>> {
        let output = self.run(&[
            "for-each-ref",
            "--sort=-creatordate",
            "--count=1",
            "--format=%(refname:strip=2)",
            "refs/tags",
        ])?;
        let tag = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if tag.is_empty() { None } else { Some(tag) })
    }

    /// `git describe` of HEAD against `tag` only. When HEAD does not descend
    /// from `tag`, the tag itself is described instead.
    pub fn describe(&self, tag: &str) -> Result<String> {
        let pattern = glob_escape(tag);
        let args = ["describe", "--tags", "--candidates=1", "--match", pattern.as_str()];

        let output = match self.run(&args) {
            Ok(output) => output,
            Err(ExtractError::NoTags { .. }) => {
                info!("HEAD does not descend from {}, describing the tag itself", tag);
                let target = format!("refs/tags/{}", tag);
                let mut tag_args = args.to_vec();
                tag_args.push(target.as_str());
                self.run(&tag_args)?
            }
            Err(e) => return Err(e),
        };
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        if !self.repo.is_dir() {
            return Err(ExtractError::NotARepository { path: self.repo.clone() });
        }

        let command = format!("{} {}", self.program, args.join(" "));
        debug!("Running '{}' in {}", command, self.repo.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo)
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => ExtractError::GitUnavailable {
                    program: self.program.clone(),
                    source,
                },
                _ => ExtractError::GitCommand {
                    command: command.clone(),
                    message: source.to_string(),
                },
            })?;

        if output.status.success() {
            return Ok(output);
        }

        let message = failure_message(&output);
        debug!("'{}' exited with {}: {}", command, output.status, message);
        Err(self.classify_failure(command, message))
    }

    fn classify_failure(&self, command: String, message: String) -> ExtractError {
        let lower = message.to_lowercase();
        if lower.contains("not a git repository") {
            ExtractError::NotARepository { path: self.repo.clone() }
        } else if lower.contains("no names found") || lower.contains("no tags can describe") {
            ExtractError::NoTags { path: self.repo.clone() }
        } else {
            ExtractError::GitCommand { command, message }
        }
    }
}

impl TagSource for GitCli {
    fn latest_tag(&self) -> Result<String> {
        let newest = self
            .newest_tag()?
            .ok_or_else(|| ExtractError::NoTags { path: self.repo.clone() })?;
        info!("Most recently created tag: {}", newest);

        let tag = self.describe(&newest)?;
        info!("Latest git tag version: {}", tag);
        Ok(tag)
    }

    fn repo(&self) -> &Path {
        &self.repo
    }
}

/// Escape wildmatch metacharacters so `--match` selects exactly one tag.
fn glob_escape(tag: &str) -> String {
    let mut escaped = String::with_capacity(tag.len());
    for c in tag.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// stderr when present, otherwise stdout.
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr
    }
}
