use std::path::Path;

use crate::error::{Error, MissingTitleError, Result};
use crate::links::BasePath;
use crate::markdown::{CommonMarkRenderer, MarkdownRenderer, extract_title};
use crate::template::Template;

/// Turns one markdown document into one HTML page.
pub struct PageGenerator<R = CommonMarkRenderer> {
    renderer: R,
    base_path: BasePath,
}

impl<R: MarkdownRenderer> PageGenerator<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            base_path: BasePath::default(),
        }
    }

    pub fn with_base_path<B: Into<BasePath>>(mut self, base_path: B) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Build the final page text without touching the filesystem.
    pub fn render_page(
        &self,
        markdown: &str,
        template: &Template,
    ) -> Result<String, MissingTitleError> {
        let title = extract_title(markdown)?;
        let content = self.renderer.render(markdown);

        Ok(self.assemble(template, title, &content))
    }

    fn assemble(&self, template: &Template, title: &str, content: &str) -> String {
        let html = template.render(title, content);
        self.base_path.rewrite_links(&html)
    }

    /// Read `input`, render it into the template at `template_path` and write
    /// the page to `output`.
    ///
    /// The parent directory of `output` must already exist.
    pub fn generate_page<I, T, O>(&self, input: I, template_path: T, output: O) -> Result<()>
    where
        I: AsRef<Path>,
        T: AsRef<Path>,
        O: AsRef<Path>,
    {
        let (input, output) = (input.as_ref(), output.as_ref());

        let markdown = std::fs::read_to_string(input).map_err(|source| Error::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let title = extract_title(&markdown).map_err(|source| Error::MissingTitle {
            path: input.to_path_buf(),
            source,
        })?;
        let content = self.renderer.render(&markdown);

        let template = Template::read(template_path)?;
        let html = self.assemble(&template, title, &content);

        std::fs::write(output, html).map_err(|source| Error::Write {
            path: output.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            input = %input.display(),
            output = %output.display(),
            "Generated page"
        );
        Ok(())
    }
}

/// Generate a single page with the default markdown renderer.
pub fn generate_page<I, T, O>(input: I, template_path: T, output: O, base_path: &str) -> Result<()>
where
    I: AsRef<Path>,
    T: AsRef<Path>,
    O: AsRef<Path>,
{
    PageGenerator::new(CommonMarkRenderer::new())
        .with_base_path(base_path)
        .generate_page(input, template_path, output)
}
