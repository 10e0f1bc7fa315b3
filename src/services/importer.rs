use crate::error::{ImportError, Result};
use crate::services::converter::MarkdownConverter;
use crate::services::resolver::PathResolver;
use crate::types::{ImportRequest, ImportResponse, OutputFormat};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

/// Saves imported HTML and, unless only HTML was asked for, its markdown
/// rendition next to it.
#[derive(Clone)]
pub struct HtmlImporter {
    resolver: PathResolver,
    converter: Arc<dyn MarkdownConverter>,
}

impl HtmlImporter {
    pub fn new(resolver: PathResolver, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self {
            resolver,
            converter,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub async fn import(&self, req: &ImportRequest) -> Result<ImportResponse> {
        if req.html.is_empty() {
            return Err(ImportError::MissingHtml);
        }

        let location = self.resolver.resolve(req).await?;

        fs::write(&location.html_path, &req.html).await?;
        info!(
            "Saved HTML for {:?} to {}",
            req.title.as_deref().or(req.url.as_deref()).unwrap_or("page"),
            location.html_path.display()
        );

        let saved_html = location.html_path.display().to_string();

        if req.output_format == OutputFormat::Html {
            return Ok(ImportResponse {
                ok: true,
                saved_html,
                saved_markdown: None,
            });
        }

        let markdown = self
            .converter
            .convert(&location.html_path)
            .await?
            .unwrap_or_default();
        debug!("Markdown conversion produced {} bytes", markdown.len());

        fs::write(&location.markdown_path, markdown).await?;
        info!("Saved markdown to {}", location.markdown_path.display());

        Ok(ImportResponse {
            ok: true,
            saved_html,
            saved_markdown: Some(location.markdown_path.display().to_string()),
        })
    }
}
