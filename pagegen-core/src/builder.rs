use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::assets::{clean_output, copy_static, create_dir};
use crate::config::BuildConfig;
use crate::error::{BuildError, Error, Result};
use crate::links::BasePath;
use crate::markdown::{CommonMarkRenderer, MarkdownRenderer};
use crate::renderer::PageGenerator;
use crate::scanner::SiteScanner;
use crate::site::SourcePage;

/// What a full build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub static_files: usize,
}

pub struct SiteBuilder<R = CommonMarkRenderer> {
    content_dir: Option<PathBuf>,
    template: Option<PathBuf>,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    base_path: BasePath,
    clean: bool,
    parallel: bool,
    renderer: R,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            content_dir: None,
            template: None,
            output_dir: PathBuf::from("./public"),
            static_dir: None,
            base_path: BasePath::default(),
            clean: false,
            parallel: false,
            renderer: CommonMarkRenderer::new(),
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        let builder = Self::new()
            .content_dir(&config.content)
            .template(&config.template)
            .output_dir(&config.output)
            .base_path(config.base_path.clone())
            .clean(config.clean)
            .parallel(config.parallel);

        match &config.static_dir {
            Some(dir) => builder.static_dir(dir),
            None => builder,
        }
    }
}

impl<R: MarkdownRenderer> SiteBuilder<R> {
    // Required configuration
    pub fn content_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.content_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template = Some(path.as_ref().to_path_buf());
        self
    }

    // Optional paths
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn static_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.static_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn base_path<B: Into<BasePath>>(mut self, base_path: B) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Swap the markdown renderer used for page bodies.
    pub fn renderer<N: MarkdownRenderer>(self, renderer: N) -> SiteBuilder<N> {
        SiteBuilder {
            content_dir: self.content_dir,
            template: self.template,
            output_dir: self.output_dir,
            static_dir: self.static_dir,
            base_path: self.base_path,
            clean: self.clean,
            parallel: self.parallel,
            renderer,
        }
    }

    pub fn build(self) -> Result<Site<R>, BuildError> {
        let content_dir = self.content_dir.ok_or(BuildError::MissingContentDir)?;
        let template = self.template.ok_or(BuildError::MissingTemplate)?;

        Ok(Site {
            generator: PageGenerator::new(self.renderer).with_base_path(self.base_path),
            content_dir,
            template,
            output_dir: self.output_dir,
            static_dir: self.static_dir,
            clean: self.clean,
            parallel: self.parallel,
        })
    }
}

pub struct Site<R = CommonMarkRenderer> {
    generator: PageGenerator<R>,
    content_dir: PathBuf,
    template: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    clean: bool,
    parallel: bool,
}

impl<R: MarkdownRenderer> Site<R> {
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Markdown files under the content directory.
    pub fn pages(&self) -> Result<Vec<SourcePage>> {
        SiteScanner::new(&self.content_dir).scan()
    }

    /// Generate one page into its mirrored location, creating directories as
    /// needed. Returns the path written.
    pub fn render_page(&self, page: &SourcePage) -> Result<PathBuf> {
        let out_path = page.out_path(&self.output_dir);
        if let Some(parent) = out_path.parent() {
            create_dir(parent)?;
        }

        self.generator
            .generate_page(&page.source, &self.template, &out_path)?;

        Ok(out_path)
    }

    /// Clean (if enabled), copy static assets, then generate every page.
    ///
    /// The first error stops the build. Cleaning is refused with
    /// [`Error::UnsafeClean`] when a site source lives inside the output
    /// directory.
    pub fn render_all(&self) -> Result<BuildSummary> {
        let start = Instant::now();

        if self.clean {
            self.check_clean_target()?;
            clean_output(&self.output_dir)?;
        }

        let static_files = match &self.static_dir {
            Some(dir) if dir.is_dir() => copy_static(dir, &self.output_dir)?,
            Some(dir) => {
                tracing::debug!(path = %dir.display(), "No static directory, skipping assets");
                0
            }
            None => 0,
        };

        let pages = self.pages()?;
        if self.parallel {
            pages
                .par_iter()
                .try_for_each(|page| self.render_page(page).map(drop))?;
        } else {
            for page in &pages {
                self.render_page(page)?;
            }
        }

        let summary = BuildSummary {
            pages: pages.len(),
            static_files,
        };
        tracing::info!(
            pages = summary.pages,
            static_files = summary.static_files,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Site built"
        );

        Ok(summary)
    }

    /// Cleaning must not remove the content directory, the template or the
    /// static directory.
    fn check_clean_target(&self) -> Result<()> {
        // Nothing to remove yet
        let Ok(output_dir) = self.output_dir.canonicalize() else {
            return Ok(());
        };

        let sources = [
            Some(&self.content_dir),
            Some(&self.template),
            self.static_dir.as_ref(),
        ];
        for source in sources.into_iter().flatten() {
            if source
                .canonicalize()
                .is_ok_and(|source| source.starts_with(&output_dir))
            {
                return Err(Error::UnsafeClean {
                    path: self.output_dir.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Generate a page for every markdown file under `content_dir`, mirroring the
/// directory layout under `output_dir`.
///
/// Returns the number of pages written.
pub fn generate_pages_recursive<C, T, O>(
    content_dir: C,
    template_path: T,
    output_dir: O,
    base_path: &str,
) -> Result<usize>
where
    C: AsRef<Path>,
    T: AsRef<Path>,
    O: AsRef<Path>,
{
    let site = Site {
        generator: PageGenerator::new(CommonMarkRenderer::new()).with_base_path(base_path),
        content_dir: content_dir.as_ref().to_path_buf(),
        template: template_path.as_ref().to_path_buf(),
        output_dir: output_dir.as_ref().to_path_buf(),
        static_dir: None,
        clean: false,
        parallel: false,
    };

    Ok(site.render_all()?.pages)
}
