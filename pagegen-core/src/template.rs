use std::path::Path;

use crate::error::{Error, Result};

pub const TITLE_TOKEN: &str = "{{ Title }}";
pub const CONTENT_TOKEN: &str = "{{ Content }}";

/// An HTML page skeleton with `{{ Title }}` and `{{ Content }}` slots.
///
/// Only those two exact tokens are recognized; anything else in the source,
/// including other `{{ ... }}` text, is copied through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(source))
    }

    /// Fill both slots in one pass over the template.
    ///
    /// Every occurrence of each token is replaced. Substituted values are not
    /// scanned again, so a title containing `{{ Content }}` stays literal.
    pub fn render(&self, title: &str, content: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + title.len() + content.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("{{ ") {
            out.push_str(&rest[..start]);
            let slot = &rest[start..];

            if let Some(after) = slot.strip_prefix(TITLE_TOKEN) {
                out.push_str(title);
                rest = after;
            } else if let Some(after) = slot.strip_prefix(CONTENT_TOKEN) {
                out.push_str(content);
                rest = after;
            } else {
                out.push_str("{{ ");
                rest = &slot[3..];
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_both_slots() {
        let template = Template::new("<title>{{ Title }}</title><main>{{ Content }}</main>");
        assert_eq!(
            template.render("Home", "<p>hi</p>"),
            "<title>Home</title><main><p>hi</p></main>"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        let template = Template::new("{{ Title }}|{{ Title }}|{{ Content }}{{ Content }}");
        assert_eq!(template.render("T", "C"), "T|T|CC");
    }

    #[test]
    fn missing_slots_are_not_an_error() {
        let template = Template::new("<p>static</p>");
        assert_eq!(template.render("T", "C"), "<p>static</p>");
    }

    #[test]
    fn other_tokens_pass_through() {
        let template = Template::new("{{ title }} {{Title}} {{ Footer }} {{ {{ Title }}");
        assert_eq!(template.render("T", "C"), "{{ title }} {{Title}} {{ Footer }} {{ T");
    }

    #[test]
    fn substituted_values_are_not_expanded() {
        let template = Template::new("<h1>{{ Title }}</h1>{{ Content }}");
        assert_eq!(
            template.render("{{ Content }}", "{{ Title }}"),
            "<h1>{{ Content }}</h1>{{ Title }}"
        );
    }

    #[test]
    fn read_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.html");
        let err = Template::read(&missing).unwrap_err();
        assert!(matches!(err, Error::Read { ref path, .. } if path == &missing));
    }
}
