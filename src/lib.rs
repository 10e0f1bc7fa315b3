//! # HTML Import Library
//!
//! Saves HTML pages posted by a browser extension beneath an export root,
//! converts them to markdown, and builds a linked index of the exported
//! markdown tree.
//!
//! ## Example Usage
//!
//! ```no_run
//! use html_import::{HtmdConverter, HtmlImporter, ImportRequest, PathResolver};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let importer = HtmlImporter::new(
//!         PathResolver::new("./exports"),
//!         Arc::new(HtmdConverter::new()),
//!     );
//!
//!     let response = importer
//!         .import(&ImportRequest {
//!             html: "<h1>Access sessions</h1>".to_string(),
//!             url: Some("https://example.com/apis/access-sessions".to_string()),
//!             target_folder: "docs/baikal-tech".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("Saved {}", response.saved_html);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod server;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{ImportError, Result};
pub use services::{
    safe_slug, HtmdConverter, HtmlImporter, IndexBuilder, MarkdownConverter, PathResolver,
};
pub use types::{
    EntryKind, ImportRequest, ImportResponse, IndexConfig, IndexReport, OutputFormat,
    ResolvedLocation, ServerConfig, TreeEntry,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
