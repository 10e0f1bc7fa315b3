pub mod converter;
pub mod importer;
pub mod indexer;
pub mod resolver;

pub use converter::{HtmdConverter, MarkdownConverter};
pub use importer::HtmlImporter;
pub use indexer::IndexBuilder;
pub use resolver::{safe_slug, PathResolver};
