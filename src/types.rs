use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Html,
}

/// Body of `POST /api/import-html`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub target_folder: String,
    #[serde(default)]
    pub relative_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub ok: bool,
    pub saved_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_markdown: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub target_dir: PathBuf,
    pub html_path: PathBuf,
    pub markdown_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// A directory or markdown file found while walking an export tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub depth: usize,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub export_root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub root: PathBuf,
    pub max_depth: Option<usize>,
    pub index_name: String,
}

/// Outcome of an index run.
#[derive(Debug, Clone)]
pub struct IndexReport {
    /// Canonicalized root the walk started from.
    pub root: PathBuf,
    pub entries: Vec<TreeEntry>,
    pub index_path: PathBuf,
}
