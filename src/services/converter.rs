use crate::error::{ImportError, Result};
use async_trait::async_trait;
use htmd::HtmlToMarkdown;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Turns a saved HTML file into markdown text.
///
/// `Ok(None)` means the converter produced nothing; callers persist an
/// empty markdown file in that case.
#[async_trait]
pub trait MarkdownConverter: Send + Sync {
    async fn convert(&self, html_path: &Path) -> Result<Option<String>>;
}

/// Converter backed by `htmd`.
pub struct HtmdConverter {
    inner: HtmlToMarkdown,
}

impl HtmdConverter {
    pub fn new() -> Self {
        let inner = HtmlToMarkdown::builder()
            .skip_tags(vec!["head", "script", "style", "noscript", "nav"])
            .build();
        Self { inner }
    }
}

impl Default for HtmdConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarkdownConverter for HtmdConverter {
    async fn convert(&self, html_path: &Path) -> Result<Option<String>> {
        let html = fs::read_to_string(html_path).await?;
        let markdown = self
            .inner
            .convert(&html)
            .map_err(|e| ImportError::Conversion {
                reason: format!("{}: {}", html_path.display(), e),
            })?;

        debug!(
            "Converted {} ({} bytes of markdown)",
            html_path.display(),
            markdown.len()
        );

        if markdown.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(markdown))
        }
    }
}
