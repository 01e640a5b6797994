use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::error::MissingTitleError;

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

/// Turns a markdown document into an HTML fragment.
///
/// Page generation only needs this one capability, so anything that can
/// produce HTML from markdown text can stand in, including plain closures:
///
/// ```
/// use pagegen_core::MarkdownRenderer;
///
/// let renderer = |md: &str| format!("<pre>{md}</pre>");
/// assert_eq!(renderer.render("hi"), "<pre>hi</pre>");
/// ```
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// CommonMark renderer backed by pulldown-cmark, with syntect highlighting
/// for fenced code blocks.
#[derive(Debug, Clone)]
pub struct CommonMarkRenderer {
    options: Options,
    syntax_theme: String,
}

impl Default for CommonMarkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonMarkRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
            syntax_theme: DEFAULT_SYNTAX_THEME.to_string(),
        }
    }

    /// Name of a syntect default theme. Unknown names disable highlighting.
    pub fn syntax_theme<S: Into<String>>(mut self, theme: S) -> Self {
        self.syntax_theme = theme.into();
        self
    }

    fn highlight(&self, lang: &str, code: &str) -> String {
        // Info strings like "rust,ignore" or "sh title=x" carry the language first
        let token = lang.split([' ', ',']).next().unwrap_or_default();

        find_syntax(token)
            .zip(THEME_SET.themes.get(&self.syntax_theme))
            .and_then(|(syntax, theme)| {
                highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme).ok()
            })
            .unwrap_or_else(|| plain_code_block(code))
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut events = Vec::new();
        let mut code_block: Option<(CowStr, String)> = None;

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                    code_block = Some((lang, String::new()));
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    if let Some((lang, code)) = code_block.take() {
                        events.push(Event::Html(self.highlight(&lang, &code).into()));
                    }
                }
                other => events.push(other),
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }
}

fn find_syntax(token: &str) -> Option<&'static SyntaxReference> {
    if token.is_empty() {
        return None;
    }

    SYNTAX_SET.find_syntax_by_token(token).or_else(|| {
        // Fallback mappings for unsupported languages
        match token {
            "nix" => SYNTAX_SET.find_syntax_by_name("JavaScript"),
            "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
            _ => None,
        }
    })
}

fn plain_code_block(code: &str) -> String {
    format!("<pre><code>{}</code></pre>\n", html_escape::encode_text(code))
}

/// Returns the text after `# ` on the first line that starts with it.
///
/// The title is returned verbatim: trailing whitespace (including the `\r`
/// of a CRLF line ending) is kept.
pub fn extract_title(markdown: &str) -> Result<&str, MissingTitleError> {
    markdown
        .split('\n')
        .find_map(|line| line.strip_prefix("# "))
        .ok_or(MissingTitleError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_from_first_h1() {
        let md = "intro\n# First\n\n# Second\n";
        assert_eq!(extract_title(md), Ok("First"));
    }

    #[test]
    fn title_ignores_other_heading_levels() {
        let md = "## Sub\n### Deeper\n# Real\n";
        assert_eq!(extract_title(md), Ok("Real"));
    }

    #[test]
    fn title_requires_space_and_line_start() {
        assert_eq!(extract_title("#NoSpace\n"), Err(MissingTitleError));
        assert_eq!(extract_title("  # Indented\n"), Err(MissingTitleError));
    }

    #[test]
    fn title_is_not_trimmed() {
        assert_eq!(extract_title("# Padded  \nbody"), Ok("Padded  "));
        assert_eq!(extract_title("# Windows\r\nbody"), Ok("Windows\r"));
        assert_eq!(extract_title("# "), Ok(""));
    }

    #[test]
    fn missing_title() {
        assert_eq!(extract_title(""), Err(MissingTitleError));
        assert_eq!(extract_title("just text\n\n- a list"), Err(MissingTitleError));
    }

    #[test]
    fn renders_inline_styles() {
        let html = CommonMarkRenderer::new().render("# Welcome\n\nHello **world**.\n");
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<p>Hello <strong>world</strong>.</p>"));
    }

    #[test]
    fn highlights_known_languages() {
        let html = CommonMarkRenderer::new().render("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre style="));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn unknown_language_falls_back_to_escaped_block() {
        let html = CommonMarkRenderer::new().render("```nosuchlang\n<tag> & co\n```\n");
        assert_eq!(html, "<pre><code>&lt;tag&gt; &amp; co\n</code></pre>\n");
    }

    #[test]
    fn unknown_theme_disables_highlighting() {
        let html = CommonMarkRenderer::new()
            .syntax_theme("no-such-theme")
            .render("```rust\nlet x = 1;\n```\n");
        assert_eq!(html, "<pre><code>let x = 1;\n</code></pre>\n");
    }

    #[test]
    fn indented_code_is_left_to_pulldown() {
        let html = CommonMarkRenderer::new().render("    let x = 1;\n");
        assert_eq!(html, "<pre><code>let x = 1;\n</code></pre>\n");
    }

    #[test]
    fn closures_are_renderers() {
        let renderer = |md: &str| format!("<div>{}</div>", md.len());
        assert_eq!(renderer.render("abc"), "<div>3</div>");
    }
}
