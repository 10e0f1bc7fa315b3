use crate::error::Result;
use crate::types::{ImportRequest, ResolvedLocation};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;
use tracing::debug;
use url::Url;

const FALLBACK_RAW_PATH: &str = "/page";
const FALLBACK_SLUG: &str = "page";
const ROOT_STEM: &str = "index";

fn unsafe_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap())
}

/// Turn arbitrary text into a filesystem-safe token.
///
/// Runs of characters outside `[A-Za-z0-9_-]` collapse to a single `_`,
/// leading and trailing `_`/`-` are stripped, and an empty result becomes
/// `page`. Edge hyphens go too, so `-draft` is saved as `draft` and `---`
/// falls back to `page`.
pub fn safe_slug(value: &str) -> String {
    let replaced = unsafe_chars().replace_all(value, "_");
    let slug = replaced.trim_matches(['_', '-']);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Maps import requests to locations beneath a fixed export root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the target directory and sibling file paths for `req`,
    /// creating the directory if needed.
    pub async fn resolve(&self, req: &ImportRequest) -> Result<ResolvedLocation> {
        let location = self.locate(req);
        fs::create_dir_all(&location.target_dir).await?;
        debug!("Resolved import location: {}", location.target_dir.display());
        Ok(location)
    }

    /// Pure part of [`resolve`](Self::resolve): no filesystem access.
    pub fn locate(&self, req: &ImportRequest) -> ResolvedLocation {
        let mut target_dir = self.base_dir(&req.target_folder);

        let raw_path = Self::raw_path(req);
        let mut segments: Vec<&str> = raw_path.split('/').filter(|s| !s.is_empty()).collect();
        let stem = match segments.pop() {
            Some(last) => safe_slug(last),
            None => ROOT_STEM.to_string(),
        };

        for segment in segments {
            target_dir.push(safe_slug(segment));
        }

        ResolvedLocation {
            html_path: target_dir.join(format!("{}.html", stem)),
            markdown_path: target_dir.join(format!("{}.md", stem)),
            target_dir,
        }
    }

    fn base_dir(&self, target_folder: &str) -> PathBuf {
        let mut dir = self.root.clone();
        for part in target_folder.split('/') {
            if part.is_empty() || part == "." || part == ".." {
                continue;
            }
            dir.push(part);
        }
        dir
    }

    fn raw_path(req: &ImportRequest) -> String {
        if let Some(relative) = req.relative_path.as_deref().filter(|p| !p.is_empty()) {
            return relative.to_string();
        }
        if let Some(url) = req.url.as_deref().filter(|u| !u.is_empty()) {
            return url_path(url);
        }
        FALLBACK_RAW_PATH.to_string()
    }
}

/// Path component of `url`. Strings that are not absolute URLs are taken
/// as a path up to any query or fragment.
fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}
