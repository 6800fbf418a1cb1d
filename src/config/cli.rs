use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Project root containing the `games/` directory
    #[arg(long, env = "GAME_GRID_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Hide the progress bar
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan `games/` and write the manifest plus generated thumbnails
    Build(BuildArgs),
    /// Render the game grid page from a manifest
    Render(RenderArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Delete generated thumbnails that no longer belong to any game
    #[arg(long)]
    pub prune_thumbnails: bool,

    /// Thumbnails whose path matches this pattern are regenerated
    #[arg(long, default_value = r"placeholder\.png$")]
    pub placeholder_pattern: String,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            prune_thumbnails: false,
            placeholder_pattern: r"placeholder\.png$".to_string(),
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Manifest path (relative to the root) or http(s) URL
    #[arg(long, default_value = "games-manifest.json")]
    pub manifest: String,

    /// Output HTML file, relative to the root
    #[arg(long, default_value = "index.html")]
    pub out: PathBuf,

    /// Pre-apply a search query to the rendered grid
    #[arg(long)]
    pub query: Option<String>,
}
