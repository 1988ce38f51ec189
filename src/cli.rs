use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tagversion",
    about = "Write the version from the latest git tag to a VERSION file",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/tagversion/logs/tagversion.log\n\nThe latest tag must look like v<major>.<minor>.<patch>; any suffix such as\n-rc1 or the -<n>-g<hash> added by git describe is dropped."
)]
pub struct Cli {
    /// Repository root to read tags from
    #[arg(short, long, default_value = ".", help = "Repository root to read tags from")]
    pub repo: PathBuf,

    /// Version file to write (default: VERSION in the repository root)
    #[arg(short, long, help = "Version file to write (default: VERSION in the repository root)")]
    pub output: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Report the existing version file instead of regenerating it
    #[arg(long, help = "Report the existing version file instead of regenerating it")]
    pub check: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_defaults_without_arguments() {
        let cli = Cli::try_parse_from(["tagversion"]).unwrap();
        assert_eq!(cli.repo, PathBuf::from("."));
        assert!(cli.output.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.check);
    }

    #[test]
    fn test_cli_parses_all_options() {
        let cli = Cli::try_parse_from([
            "tagversion",
            "--repo", "/srv/repo",
            "--output", "RELEASE",
            "--config", "tagversion.yml",
            "--check",
        ])
        .unwrap();

        assert_eq!(cli.repo, PathBuf::from("/srv/repo"));
        assert_eq!(cli.output, Some(PathBuf::from("RELEASE")));
        assert_eq!(cli.config, Some(PathBuf::from("tagversion.yml")));
        assert!(cli.check);
    }

    #[test]
    fn test_cli_parses_short_flags() {
        let cli = Cli::try_parse_from(["tagversion", "-r", "/tmp/short", "-o", "V", "-c", "short.yml"]).unwrap();

        assert_eq!(cli.repo, PathBuf::from("/tmp/short"));
        assert_eq!(cli.output, Some(PathBuf::from("V")));
        assert_eq!(cli.config, Some(PathBuf::from("short.yml")));
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["tagversion", "extra"]).is_err());
    }

    #[test]
    fn test_cli_help_contains_expected_text() {
        let help = Cli::command().render_help().to_string();

        assert!(help.contains("Write the version from the latest git tag"));
        assert!(help.contains("Repository root to read tags from"));
        assert!(help.contains("Version file to write"));
        assert!(help.contains("Path to config file"));
        assert!(help.contains("Report the existing version file"));
        assert!(help.contains("Logs are written to"));
    }

    #[test]
    fn test_cli_version_uses_git_describe() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("GIT_DESCRIBE")));
    }
}
