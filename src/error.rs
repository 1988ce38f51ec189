use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{} is not a git repository", .path.display())]
    NotARepository { path: PathBuf },

    #[error("No git tags found in {}", .path.display())]
    NoTags { path: PathBuf },

    #[error("Unable to clean git tag '{tag}': expected v<major>.<minor>.<patch>")]
    MalformedTag { tag: String },

    #[error("Failed to run '{program}'")]
    GitUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed: {message}")]
    GitCommand { command: String, message: String },

    #[error("Failed to write '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' does not hold a <major>.<minor>.<patch> version: '{contents}'", .path.display())]
    MalformedVersionFile { path: PathBuf, contents: String },
}

impl ExtractError {
    /// Process exit status for this failure. 1 and 2 are left to general
    /// errors and clap usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotARepository { .. } => 3,
            Self::NoTags { .. } => 4,
            Self::MalformedTag { .. } => 5,
            Self::GitUnavailable { .. } => 6,
            Self::GitCommand { .. } => 7,
            Self::Write { .. } => 8,
            Self::Read { .. } => 9,
            Self::MalformedVersionFile { .. } => 10,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;

    fn all_variants() -> Vec<ExtractError> {
        vec![
            ExtractError::NotARepository { path: PathBuf::from("/tmp/x") },
            ExtractError::NoTags { path: PathBuf::from("/tmp/x") },
            ExtractError::MalformedTag { tag: "release-1".to_string() },
            ExtractError::GitUnavailable {
                program: "git".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            },
            ExtractError::GitCommand {
                command: "git describe".to_string(),
                message: "boom".to_string(),
            },
            ExtractError::Write {
                path: PathBuf::from("VERSION"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            },
            ExtractError::Read {
                path: PathBuf::from("VERSION"),
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            },
            ExtractError::MalformedVersionFile {
                path: PathBuf::from("VERSION"),
                contents: "garbage".to_string(),
            },
        ]
    }

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let codes: Vec<u8> = all_variants().iter().map(ExtractError::exit_code).collect();
        let unique: HashSet<u8> = codes.iter().copied().collect();

        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|code| *code > 2));
    }

    #[test]
    fn test_malformed_tag_message_names_the_tag() {
        let err = ExtractError::MalformedTag { tag: "release-1".to_string() };
        assert!(err.to_string().contains("'release-1'"));
        assert!(err.to_string().contains("Unable to clean git tag"));
    }

    #[test]
    fn test_malformed_version_file_message_names_the_file() {
        let err = ExtractError::MalformedVersionFile {
            path: PathBuf::from("/srv/repo/VERSION"),
            contents: "garbage".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("/srv/repo/VERSION"));
        assert!(message.contains("'garbage'"));
        assert!(!message.contains("git tag"));
    }

    #[test]
    fn test_no_tags_message_names_the_path() {
        let err = ExtractError::NoTags { path: PathBuf::from("/srv/repo") };
        assert_eq!(err.to_string(), "No git tags found in /srv/repo");
    }
}
