//! Base-path handling for sites deployed under a subpath.
//!
//! Templates link to site-local resources in two ways, and both get re-rooted
//! under the deployment base path:
//!
//! - root-relative attributes, `href="/about"` or `src="/logo.png"`
//! - the `HTMLStaticSite` marker, `href="HTMLStaticSite/style.css"`
//!
//! With a base path of `/blog/` those become `href="/blog/about"` and
//! `href="/blog/style.css"`.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Marker that templates may put at the start of an `href`/`src` value to
/// mean "the site root, wherever it is deployed".
pub const STATIC_SITE_MARKER: &str = "HTMLStaticSite";

static LINK_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r#"(href|src)="({STATIC_SITE_MARKER}/?|//?)"#))
        .expect("link pattern is valid")
});

/// URL prefix the site is served under. Always ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BasePath(String);

impl BasePath {
    pub fn new<S: Into<String>>(path: S) -> Self {
        let mut path = path.into();
        if !path.ends_with('/') {
            path.push('/');
        }
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base path without its trailing slash; empty for `/`.
    pub fn trimmed(&self) -> &str {
        self.0.trim_end_matches('/')
    }

    /// Re-root site-local `href`/`src` values in `html` under this base path.
    ///
    /// The input is scanned once, left to right. Text produced by a
    /// replacement is never looked at again, so a base path that itself starts
    /// with `/` is not applied twice. Protocol-relative URLs (`//host/...`)
    /// point off-site and are left alone, unlike a plain substring rewrite
    /// of every `href="/`.
    pub fn rewrite_links(&self, html: &str) -> String {
        LINK_ATTR
            .replace_all(html, |caps: &Captures| {
                let attr = &caps[1];
                match &caps[2] {
                    "//" => caps[0].to_string(),
                    "/" => format!(r#"{attr}="{}/"#, self.trimmed()),
                    _ => format!(r#"{attr}="{}"#, self.as_str()),
                }
            })
            .into_owned()
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BasePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BasePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<BasePath> for String {
    fn from(value: BasePath) -> Self {
        value.0
    }
}
