use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::site::{SourcePage, is_markdown_file_name};

pub struct SiteScanner {
    content_dir: PathBuf,
}

impl SiteScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            content_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Every `.md` file under the content directory, in file-name order.
    ///
    /// Any traversal error (including a missing content directory) stops the
    /// scan. File names need not be valid UTF-8.
    pub fn scan(&self) -> Result<Vec<SourcePage>> {
        tracing::debug!(content_dir = %self.content_dir.display(), "Scanning for markdown");

        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.content_dir).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            // Symlinked files count, as long as they point at a file
            if !path.is_file() {
                continue;
            }

            if !is_markdown_file_name(entry.file_name()) {
                continue;
            }

            pages.push(self.scan_page(path)?);
        }

        tracing::debug!(count = pages.len(), "Scan completed");
        Ok(pages)
    }

    fn scan_page(&self, path: &Path) -> Result<SourcePage> {
        let relative_path = path
            .strip_prefix(&self.content_dir)
            .map_err(|_| Error::InvalidPath(path.to_path_buf()))?;

        Ok(SourcePage {
            source: path.to_path_buf(),
            path: relative_path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn finds_nested_markdown_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/2024")).unwrap();
        fs::write(root.join("index.md"), "# Home").unwrap();
        fs::write(root.join("blog/b.md"), "# B").unwrap();
        fs::write(root.join("blog/a.md"), "# A").unwrap();
        fs::write(root.join("blog/2024/old.md"), "# Old").unwrap();
        fs::write(root.join("blog/cover.png"), [0u8; 4]).unwrap();
        fs::write(root.join("design.md.old"), "# Nope").unwrap();

        let pages = SiteScanner::new(root).scan().unwrap();
        let paths: Vec<_> = pages.iter().map(|p| p.path.clone()).collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("blog/2024/old.md"),
                PathBuf::from("blog/a.md"),
                PathBuf::from("blog/b.md"),
                PathBuf::from("index.md"),
            ]
        );
        assert_eq!(pages[3].source, root.join("index.md"));
    }

    #[test]
    fn ignores_directories_named_like_markdown() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("odd.md")).unwrap();

        let pages = SiteScanner::new(dir.path()).scan().unwrap();
        assert!(pages.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn finds_markdown_with_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.md");
        fs::write(dir.path().join(name), "# Cafe").unwrap();

        let pages = SiteScanner::new(dir.path()).scan().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].path, PathBuf::from(name));
    }

    #[test]
    fn missing_content_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteScanner::new(dir.path().join("missing")).scan().unwrap_err();
        assert!(matches!(err, Error::Walk(_)));
    }
}
