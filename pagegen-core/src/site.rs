use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A markdown file discovered under the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    /// Path to the markdown file as found by the scanner.
    pub source: PathBuf,
    /// Path of the file relative to the content directory.
    pub path: PathBuf,
}

impl SourcePage {
    /// Where the generated page goes: the same relative path under
    /// `output_dir`, with the trailing `.md` swapped for `.html`.
    pub fn out_path<P: AsRef<Path>>(&self, output_dir: P) -> PathBuf {
        let out = output_dir.as_ref().join(&self.path);

        match self.path.file_name().and_then(html_file_name) {
            Some(name) => out.with_file_name(name),
            None => out,
        }
    }
}

/// Works on raw file names, so names that are not valid UTF-8 still count.
pub(crate) fn is_markdown_file_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(b".md")
}

/// `notes.md` -> `notes.html`. Only a trailing `.md` counts, so
/// `design.md.old` is not a markdown file name.
pub(crate) fn html_file_name(name: &OsStr) -> Option<OsString> {
    let stem = match Path::new(name).extension() {
        Some(ext) if ext == "md" => Path::new(name).file_stem()?,
        // A bare `.md` has no extension as far as `Path` is concerned
        _ if name == ".md" => OsStr::new(""),
        _ => return None,
    };

    let mut html = stem.to_os_string();
    html.push(".html");
    Some(html)
}
