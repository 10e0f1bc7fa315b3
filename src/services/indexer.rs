use crate::error::{ImportError, Result};
use crate::types::{EntryKind, IndexConfig, IndexReport, TreeEntry};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

const DIR_MARKER: &str = "📁";
const FILE_MARKER: &str = "📄";

pub struct IndexBuilder;

impl IndexBuilder {
    /// Walk `config.root` and write the index file. Nothing is written when
    /// the root is missing.
    pub fn build(config: &IndexConfig) -> Result<IndexReport> {
        let root = Self::validate_root(&config.root)?;
        let entries = Self::walk_markdown(&root, config.max_depth)?;

        let index_path = root.join(&config.index_name);
        Self::write_index(&entries, &root, &index_path)?;

        Ok(IndexReport {
            root,
            entries,
            index_path,
        })
    }

    /// Canonicalize `root`, failing if it is missing or not a directory.
    pub fn validate_root(root: &Path) -> Result<PathBuf> {
        if !root.exists() {
            return Err(ImportError::RootNotFound {
                path: root.display().to_string(),
            });
        }
        if !root.is_dir() {
            return Err(ImportError::NotADirectory {
                path: root.display().to_string(),
            });
        }
        Ok(root.canonicalize()?)
    }

    /// Depth-first listing of directories and `.md` files below `root`.
    ///
    /// Depth 0 is the root's direct children. With `max_depth`, directories
    /// at that depth are listed but not descended into. Symlinks are
    /// followed, so a linked directory is listed and walked like a real one.
    pub fn walk_markdown(root: &Path, max_depth: Option<usize>) -> Result<Vec<TreeEntry>> {
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by(Self::compare_entries);
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth.saturating_add(1));
        }

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else if Self::is_markdown(entry.path()) {
                EntryKind::File
            } else {
                continue;
            };

            entries.push(TreeEntry {
                depth: entry.depth() - 1,
                path: entry.into_path(),
                kind,
            });
        }

        debug!("Collected {} tree entries under {}", entries.len(), root.display());
        Ok(entries)
    }

    /// Directories first, then case-insensitive by name.
    fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
        let a_is_file = !a.file_type().is_dir();
        let b_is_file = !b.file_type().is_dir();
        a_is_file.cmp(&b_is_file).then_with(|| {
            let a_name = a.file_name().to_string_lossy().to_lowercase();
            let b_name = b.file_name().to_string_lossy().to_lowercase();
            a_name.cmp(&b_name)
        })
    }

    fn is_markdown(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
    }

    pub fn format_tree(entries: &[TreeEntry], root: &Path) -> String {
        entries
            .iter()
            .map(|entry| {
                let rel = entry.path.strip_prefix(root).unwrap_or(&entry.path);
                let marker = if entry.is_dir() { DIR_MARKER } else { FILE_MARKER };
                format!("{}{} {}", "  ".repeat(entry.depth), marker, rel.display())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Markdown index linking every file entry, nested by parent directory.
    pub fn render_index(entries: &[TreeEntry], root: &Path) -> String {
        let mut lines = vec!["# Index".to_string(), String::new()];

        for entry in entries.iter().filter(|e| !e.is_dir()) {
            let rel = entry.path.strip_prefix(root).unwrap_or(&entry.path);
            let segments: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let depth = segments.len().saturating_sub(1);
            let stem = rel
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            lines.push(format!(
                "{}- [{}]({})",
                "  ".repeat(depth),
                stem,
                segments.join("/")
            ));
        }

        lines.join("\n")
    }

    /// Console report for an index run: the tree, then where the index went.
    pub fn render_report(report: &IndexReport) -> String {
        format!(
            "Tree:\n{}\n\nIndex written to: {}",
            Self::format_tree(&report.entries, &report.root),
            report.index_path.display()
        )
    }

    pub fn write_index(entries: &[TreeEntry], root: &Path, index_path: &Path) -> Result<()> {
        fs::write(index_path, Self::render_index(entries, root))?;
        info!("Index written to {}", index_path.display());
        Ok(())
    }
}
