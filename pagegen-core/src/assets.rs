//! Static asset handling: files that are copied into the output tree as-is.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Remove `output_dir` and everything in it, then recreate it empty.
pub fn clean_output<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();

    if output_dir.exists() {
        tracing::debug!(path = %output_dir.display(), "Removing output directory");
        fs::remove_dir_all(output_dir).map_err(|source| Error::Clean {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    create_dir(output_dir)
}

/// Copy every file under `static_dir` to the same relative path under
/// `output_dir`.
///
/// Returns the number of files copied.
pub fn copy_static<S, O>(static_dir: S, output_dir: O) -> Result<usize>
where
    S: AsRef<Path>,
    O: AsRef<Path>,
{
    let (static_dir, output_dir) = (static_dir.as_ref(), output_dir.as_ref());
    let mut count = 0;

    for entry in WalkDir::new(static_dir).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(static_dir)
            .map_err(|_| Error::InvalidPath(entry.path().to_path_buf()))?;
        let dest = output_dir.join(relative);

        if entry.file_type().is_dir() {
            create_dir(&dest)?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            create_dir(parent)?;
        }
        fs::copy(entry.path(), &dest).map_err(|source| Error::Copy {
            from: entry.path().to_path_buf(),
            to: dest.clone(),
            source,
        })?;

        tracing::debug!(from = %entry.path().display(), to = %dest.display(), "Copied asset");
        count += 1;
    }

    Ok(count)
}

pub(crate) fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_nested_files() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("images/icons")).unwrap();
        fs::create_dir_all(src.path().join("empty")).unwrap();
        fs::write(src.path().join("index.css"), "body {}").unwrap();
        fs::write(src.path().join("images/icons/a.svg"), "<svg/>").unwrap();

        let copied = copy_static(src.path(), out.path()).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(out.path().join("index.css")).unwrap(),
            "body {}"
        );
        assert!(out.path().join("images/icons/a.svg").is_file());
        assert!(out.path().join("empty").is_dir());
    }

    #[test]
    fn clean_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("public");
        fs::create_dir_all(out.join("old")).unwrap();
        fs::write(out.join("old/stale.html"), "stale").unwrap();

        clean_output(&out).unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn clean_creates_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fresh/public");

        clean_output(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn missing_static_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_static(dir.path().join("static"), dir.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::Walk(_)));
    }
}
