use crate::config::THUMBNAILS_DIR;
use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{GameEntry, Manifest, MetaLoad};
use crate::error::{GameError, Result};
use crate::services::thumbnail::Thumbnail;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub games: usize,
    pub fallbacks: usize,
    pub generated_thumbnails: usize,
    pub pruned_thumbnails: Vec<String>,
    pub manifest_path: PathBuf,
}

/// Options for a single build run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub placeholder_pattern: Regex,
    pub prune_thumbnails: bool,
    pub show_progress: bool,
}

impl BuildOptions {
    pub fn new(
        placeholder_pattern: &str,
        prune_thumbnails: bool,
        show_progress: bool,
    ) -> Result<Self> {
        Ok(Self {
            placeholder_pattern: Regex::new(placeholder_pattern)?,
            prune_thumbnails,
            show_progress,
        })
    }
}

/// Scans the games directory and writes a freshly generated manifest.
pub struct CatalogService<S: Storage> {
    store: S,
    options: BuildOptions,
}

impl<S: Storage> CatalogService<S> {
    pub fn new(store: S, options: BuildOptions) -> Self {
        info!("Created new Catalog service");
        Self { store, options }
    }

    pub async fn build(&self) -> Result<BuildReport> {
        self.store.ensure_thumbnail_dir().await?;

        let ids = self.store.list_game_ids().await?;
        info!("Found {} game directories", ids.len());

        let pb = self.progress_bar(ids.len() as u64)?;
        let mut report = BuildReport::default();
        let mut games = Vec::with_capacity(ids.len());

        for id in ids {
            pb.set_message(id.clone());

            let load = self.store.load_meta(&id).await;
            if let MetaLoad::Fallback { reason } = &load {
                debug!("Using fallback metadata for {}: {}", id, reason);
                report.fallbacks += 1;
            }

            let (entry, generated) = self.resolve_entry(&id, load).await?;
            if generated {
                report.generated_thumbnails += 1;
            }
            games.push(entry);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let manifest = Manifest::new(games);
        report.games = manifest.len();
        report.manifest_path = self.store.save_manifest(&manifest).await?;
        info!(
            "Manifest written: {:?} ({} games)",
            report.manifest_path, report.games
        );

        if self.options.prune_thumbnails {
            report.pruned_thumbnails = self.prune_orphans(&manifest).await?;
        }

        Ok(report)
    }

    /// Builds the entry for one game; the flag says whether a thumbnail was generated.
    async fn resolve_entry(&self, id: &str, load: MetaLoad) -> Result<(GameEntry, bool)> {
        let meta = load.into_meta(id);
        let mut entry = GameEntry::from_meta(id, &meta);

        if !entry.thumbnail.is_empty() && !self.store.asset_exists(&entry.thumbnail).await {
            warn!(
                "Thumbnail {} for {} does not exist, regenerating",
                entry.thumbnail, id
            );
            entry.thumbnail.clear();
        }

        let needs_thumbnail = entry.thumbnail.is_empty()
            || meta.placeholder_thumbnail
            || self.options.placeholder_pattern.is_match(&entry.thumbnail);
        if !needs_thumbnail {
            return Ok((entry, false));
        }

        let svg = Thumbnail::for_game(id, &entry.title).to_svg();
        entry.thumbnail = self.store.save_thumbnail(id, &svg).await?;
        Ok((entry, true))
    }

    /// Deletes thumbnails that belong to no current game and that no entry
    /// points at.
    async fn prune_orphans(&self, manifest: &Manifest) -> Result<Vec<String>> {
        let mut pruned = Vec::new();
        for id in self.store.list_thumbnails().await? {
            let relative = format!("{}/{}.{}", THUMBNAILS_DIR, id, StorageKeys::THUMBNAIL_EXT);
            if manifest.contains_id(&id) || manifest.references_thumbnail(&relative) {
                continue;
            }
            self.store.remove_thumbnail(&id).await?;
            info!("Pruned orphaned thumbnail for {}", id);
            pruned.push(id);
        }
        Ok(pruned)
    }

    fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        if !self.options.show_progress {
            return Ok(ProgressBar::hidden());
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .map_err(|e| GameError::Other(e.to_string()))?,
        );
        Ok(pb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectPaths;
    use crate::infrastructure::FileSystemStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("games")).unwrap();
        dir
    }

    fn add_game(root: &Path, id: &str, meta: Option<&str>) {
        let game_dir = root.join("games").join(id);
        fs::create_dir_all(&game_dir).unwrap();
        if let Some(meta) = meta {
            fs::write(game_dir.join("meta.json"), meta).unwrap();
        }
    }

    fn service(root: &Path, prune: bool) -> CatalogService<FileSystemStore> {
        let store = FileSystemStore::new(ProjectPaths::new(root));
        let options = BuildOptions::new(r"placeholder\.png$", prune, false).unwrap();
        CatalogService::new(store, options)
    }

    fn read_manifest(root: &Path) -> Vec<GameEntry> {
        let content = fs::read_to_string(root.join("games-manifest.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn alpha_and_beta_scenario() {
        let dir = project();
        add_game(dir.path(), "alpha", None);
        add_game(
            dir.path(),
            "beta",
            Some(r#"{"title":"Beta Quest","status":"live"}"#),
        );

        let report = service(dir.path(), false).build().await.unwrap();
        assert_eq!(report.games, 2);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.generated_thumbnails, 2);

        let games = read_manifest(dir.path());
        assert_eq!(games.len(), 2);

        let alpha = &games[0];
        assert_eq!(alpha.id, "alpha");
        assert_eq!(alpha.title, "alpha");
        assert_eq!(alpha.genre, "Unknown");
        assert_eq!(alpha.description, "No meta.json present");
        assert_eq!(alpha.status, "placeholder");
        assert_eq!(alpha.thumbnail, "assets/thumbnails/alpha.svg");

        let beta = &games[1];
        assert_eq!(beta.title, "Beta Quest");
        assert_eq!(beta.status, "live");
        assert_eq!(beta.genre, "Misc");
        assert_eq!(beta.description, "");
        assert_eq!(beta.thumbnail, "assets/thumbnails/beta.svg");

        let svg = fs::read_to_string(dir.path().join("assets/thumbnails/beta.svg")).unwrap();
        assert!(svg.contains(">BQ</text>"));
    }

    #[tokio::test]
    async fn manifest_is_in_natural_order() {
        let dir = project();
        for id in ["g2", "g10", "g1"] {
            add_game(dir.path(), id, Some(r#"{"status":"live"}"#));
        }
        fs::write(dir.path().join("games/notes.txt"), "not a game").unwrap();

        service(dir.path(), false).build().await.unwrap();

        let ids: Vec<_> = read_manifest(dir.path()).into_iter().map(|g| g.id).collect();
        assert_eq!(ids, ["g1", "g2", "g10"]);
    }

    #[tokio::test]
    async fn existing_thumbnail_is_kept() {
        let dir = project();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/cover.png"), "png").unwrap();
        add_game(
            dir.path(),
            "kept",
            Some(r#"{"title":"Kept","thumbnail":"assets/cover.png"}"#),
        );

        let report = service(dir.path(), false).build().await.unwrap();

        assert_eq!(report.generated_thumbnails, 0);
        assert_eq!(read_manifest(dir.path())[0].thumbnail, "assets/cover.png");
        assert!(!dir.path().join("assets/thumbnails/kept.svg").exists());
    }

    #[tokio::test]
    async fn broken_thumbnail_is_replaced() {
        let dir = project();
        add_game(
            dir.path(),
            "broken",
            Some(r#"{"title":"Broken Link","thumbnail":"assets/missing.png"}"#),
        );

        service(dir.path(), false).build().await.unwrap();

        let entry = &read_manifest(dir.path())[0];
        assert_eq!(entry.thumbnail, "assets/thumbnails/broken.svg");
        assert!(dir.path().join(&entry.thumbnail).is_file());
    }

    #[tokio::test]
    async fn placeholder_thumbnails_are_regenerated() {
        let dir = project();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/placeholder.png"), "png").unwrap();
        fs::write(dir.path().join("assets/stand-in.png"), "png").unwrap();
        add_game(
            dir.path(),
            "by-name",
            Some(r#"{"thumbnail":"assets/placeholder.png"}"#),
        );
        add_game(
            dir.path(),
            "by-flag",
            Some(r#"{"thumbnail":"assets/stand-in.png","placeholder_thumbnail":true}"#),
        );

        service(dir.path(), false).build().await.unwrap();

        let games = read_manifest(dir.path());
        assert_eq!(games[0].id, "by-flag");
        assert_eq!(games[0].thumbnail, "assets/thumbnails/by-flag.svg");
        assert_eq!(games[1].thumbnail, "assets/thumbnails/by-name.svg");
    }

    #[tokio::test]
    async fn orphans_are_pruned_only_on_request() {
        let dir = project();
        add_game(dir.path(), "live", None);
        fs::create_dir_all(dir.path().join("assets/thumbnails")).unwrap();
        fs::write(dir.path().join("assets/thumbnails/gone.svg"), "<svg/>").unwrap();

        let report = service(dir.path(), false).build().await.unwrap();
        assert!(report.pruned_thumbnails.is_empty());
        assert!(dir.path().join("assets/thumbnails/gone.svg").exists());

        let report = service(dir.path(), true).build().await.unwrap();
        assert_eq!(report.pruned_thumbnails, ["gone"]);
        assert!(!dir.path().join("assets/thumbnails/gone.svg").exists());
        assert!(dir.path().join("assets/thumbnails/live.svg").exists());
    }

    #[tokio::test]
    async fn pruning_keeps_thumbnails_the_manifest_points_at() {
        let dir = project();
        fs::create_dir_all(dir.path().join("assets/thumbnails")).unwrap();
        fs::write(dir.path().join("assets/thumbnails/cover.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("assets/thumbnails/banner.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("assets/thumbnails/gone.svg"), "<svg/>").unwrap();
        add_game(
            dir.path(),
            "hero",
            Some(r#"{"thumbnail":"assets/thumbnails/cover.svg"}"#),
        );
        add_game(
            dir.path(),
            "villain",
            Some(r#"{"thumbnail":"/assets/thumbnails/banner.svg"}"#),
        );

        let report = service(dir.path(), true).build().await.unwrap();

        assert_eq!(report.pruned_thumbnails, ["gone"]);
        let games = read_manifest(dir.path());
        assert_eq!(games[0].thumbnail, "assets/thumbnails/cover.svg");
        assert!(dir.path().join("assets/thumbnails/cover.svg").exists());
        assert!(dir.path().join("assets/thumbnails/banner.svg").exists());
        assert!(!dir.path().join("assets/thumbnails/gone.svg").exists());
    }

    #[tokio::test]
    async fn rooted_thumbnail_resolves_against_project() {
        let dir = project();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/cover.png"), "png").unwrap();
        add_game(
            dir.path(),
            "hero",
            Some(r#"{"title":"Hero","thumbnail":"/assets/cover.png"}"#),
        );

        let report = service(dir.path(), false).build().await.unwrap();

        assert_eq!(report.generated_thumbnails, 0);
        assert_eq!(read_manifest(dir.path())[0].thumbnail, "/assets/cover.png");
        assert!(!dir.path().join("assets/thumbnails/hero.svg").exists());
    }

    #[tokio::test]
    async fn missing_games_dir_aborts_without_manifest() {
        let dir = tempfile::tempdir().unwrap();

        let result = service(dir.path(), false).build().await;

        assert!(matches!(result, Err(GameError::Io(_))));
        assert!(!dir.path().join("games-manifest.json").exists());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(matches!(
            BuildOptions::new("(", false, false),
            Err(GameError::Pattern(_))
        ));
    }
}
