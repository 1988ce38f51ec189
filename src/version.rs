use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{ExtractError, Result};

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(?P<version>(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+))")
        .expect("tag pattern is valid")
});

/// Three-component version captured from a git tag.
///
/// The captured text is kept verbatim, so `v01.2.3` displays as `01.2.3`
/// even though `major()` is `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    text: String,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            text: format!("{}.{}.{}", major, minor, patch),
        }
    }

    /// Match a descriptive tag string such as `v1.2.3` or `v1.2.3-4-gabcdef`.
    /// Anything after the patch number is discarded.
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        let malformed = || ExtractError::MalformedTag { tag: tag.to_string() };

        let caps = TAG_PATTERN.captures(tag).ok_or_else(malformed)?;
        let component = |name: &str| caps[name].parse::<u64>().map_err(|_| malformed());

        Ok(Self {
            major: component("major")?,
            minor: component("minor")?,
            patch: component("patch")?,
            text: caps["version"].to_string(),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Version {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
