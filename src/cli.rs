use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "html-import")]
#[command(about = "Save imported HTML pages as markdown and index the exported tree")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTML import HTTP server
    Serve(ServeArgs),

    /// Print a tree of exported markdown files and write an index
    Index(IndexArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Directory all imported files are written beneath
    #[arg(long, env = "EXPORT_BASE_DIR", default_value = "./exports")]
    pub export_dir: PathBuf,

    /// Address to bind to
    #[arg(long, env = "IMPORT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "IMPORT_PORT", default_value = "8000")]
    pub port: u16,
}

#[derive(Args)]
pub struct IndexArgs {
    /// Root directory the server wrote markdown files to
    #[arg(value_name = "ROOT")]
    pub root: String,

    /// Maximum depth to traverse (like tree -L). Default: unlimited
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Name of the generated index file
    #[arg(long, default_value = "index.md")]
    pub index_name: String,
}
