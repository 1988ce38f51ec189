use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{ExtractError, Result};
use crate::git::TagSource;
use crate::version::Version;

/// Default output file, relative to the repository root.
pub const VERSION_FILE: &str = "VERSION";

/// Resolve the latest tag from `source`, report it on `out` and write the
/// captured version to `output` without a trailing newline.
///
/// Nothing is written to `output` unless the tag matches.
pub fn extract_and_write<S, W>(source: &S, output: &Path, out: &mut W) -> Result<Version>
where
    S: TagSource + ?Sized,
    W: Write,
{
    let tag = source.latest_tag()?;
    let version = Version::parse(&tag)?;

    writeln!(
        out,
        "Writing git tag based version to file {}:  {}",
        display_name(output),
        version
    )
    .map_err(|err| ExtractError::Write {
        path: output.to_path_buf(),
        source: err,
    })?;

    write_replacing(output, version.as_str().as_bytes()).map_err(|err| ExtractError::Write {
        path: output.to_path_buf(),
        source: err,
    })?;

    info!(
        "Version {} written to {} (tag {} in {})",
        version,
        output.display(),
        tag,
        source.repo().display()
    );
    Ok(version)
}

/// Read back an existing version file and report it on `out`.
pub fn check<W: Write>(output: &Path, out: &mut W) -> Result<Version> {
    let contents = fs::read_to_string(output).map_err(|source| ExtractError::Read {
        path: output.to_path_buf(),
        source,
    })?;

    writeln!(
        out,
        "Package version in file '{}' set at '{}'.",
        display_name(output),
        contents
    )
    .map_err(|err| ExtractError::Write {
        path: output.to_path_buf(),
        source: err,
    })?;

    let version = Version::parse(&contents).map_err(|_| ExtractError::MalformedVersionFile {
        path: output.to_path_buf(),
        contents: contents.clone(),
    })?;
    info!("Checked {}: {}", output.display(), version);
    Ok(version)
}

/// Write `contents` to a temporary file beside `path` and rename it over
/// `path`, so a failed write never truncates the previous file.
fn write_replacing(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;

    // NamedTempFile is created 0600; keep the old file's mode or use 0644
    let permissions = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    };
    if let Some(permissions) = permissions {
        file.as_file().set_permissions(permissions)?;
    }

    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
