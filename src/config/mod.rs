use crate::config::cli::{Args, BuildArgs, Commands};
use clap::Parser;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::Level;

pub mod cli;

pub const GAMES_DIR: &str = "games";
pub const THUMBNAILS_DIR: &str = "assets/thumbnails";
pub const MANIFEST_FILE: &str = "games-manifest.json";
pub const META_FILE: &str = "meta.json";

/// Resolved locations of everything the builder reads and writes.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub games_dir: PathBuf,
    pub thumbnails_dir: PathBuf,
    pub manifest: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            games_dir: root.join(GAMES_DIR),
            thumbnails_dir: root.join(THUMBNAILS_DIR),
            manifest: root.join(MANIFEST_FILE),
            root,
        }
    }

    /// Joins onto the root even when `relative` starts with a separator,
    /// so `/assets/cover.png` stays inside the project.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        let inside: PathBuf = relative
            .as_ref()
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        self.root.join(inside)
    }
}

pub struct Config {
    pub args: Args,
    pub paths: ProjectPaths,
}

impl Config {
    pub fn new() -> Self {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Self {
        let paths = ProjectPaths::new(&args.root);
        Self { args, paths }
    }

    /// No subcommand means a plain build with default flags.
    pub fn command(&self) -> Commands {
        self.args
            .command
            .clone()
            .unwrap_or_else(|| Commands::Build(BuildArgs::default()))
    }

    pub fn log_level(&self) -> Level {
        self.args.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }
}
