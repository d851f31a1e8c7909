//! Output sink selection for the generated interface.
//!
//! Without an output path the interface goes to stdout. With a path, the
//! configured extension is appended when missing and parent directories are
//! created on demand.

use crate::config::OutputConfig;
use crate::error::{AssembleError, AssembleResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append `.{extension}` unless `path` already ends with it
pub fn output_path(path: &Path, extension: &str) -> PathBuf {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        return path.to_path_buf();
    }

    let suffix = format!(".{extension}");
    let has_suffix = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(&suffix));
    if has_suffix {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(&suffix);
        PathBuf::from(name)
    }
}

/// Open the sink for `out`, or stdout when `out` is `None`.
///
/// Returns the resolved file path next to the writer so callers can report it.
pub fn open_sink(
    out: Option<&Path>,
    config: &OutputConfig,
) -> AssembleResult<(Box<dyn Write>, Option<PathBuf>)> {
    let Some(out) = out else {
        return Ok((Box::new(io::stdout().lock()), None));
    };

    let path = output_path(out, &config.file_extension);
    let output_error = |source: io::Error| AssembleError::Output {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            if !config.create_dirs {
                return Err(output_error(io::Error::new(
                    io::ErrorKind::NotFound,
                    "parent directory does not exist",
                )));
            }
            create_parent_dirs(parent).map_err(output_error)?;
            tracing::debug!("created output directory {}", parent.display());
        }
    }

    let file = File::create(&path).map_err(output_error)?;
    Ok((Box::new(BufWriter::new(file)), Some(path)))
}

#[cfg(unix)]
fn create_parent_dirs(parent: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o770)
        .create(parent)
}

#[cfg(not(unix))]
fn create_parent_dirs(parent: &Path) -> io::Result<()> {
    std::fs::create_dir_all(parent)
}
