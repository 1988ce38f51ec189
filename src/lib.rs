pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod git;
pub mod version;

pub use error::ExtractError;
pub use extractor::{check, extract_and_write, VERSION_FILE};
pub use git::{GitCli, TagSource};
pub use version::Version;
