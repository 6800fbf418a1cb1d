use crate::config::{ProjectPaths, META_FILE, THUMBNAILS_DIR};
use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{GameMeta, Manifest, MetaLoad};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FileSystemStore {
    paths: ProjectPaths,
}

impl FileSystemStore {
    pub fn new(paths: ProjectPaths) -> Self {
        Self { paths }
    }

    fn thumbnail_path(&self, id: &str) -> PathBuf {
        self.paths
            .thumbnails_dir
            .join(format!("{}.{}", id, StorageKeys::THUMBNAIL_EXT))
    }

    async fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".");
        tmp.push(StorageKeys::MANIFEST_TMP_SUFFIX);
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

impl Storage for FileSystemStore {
    async fn ensure_thumbnail_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.paths.thumbnails_dir).await?;
        Ok(())
    }

    async fn list_game_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.paths.games_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(id) => ids.push(id),
                Err(name) => warn!("Skipping non UTF-8 game directory {:?}", name),
            }
        }

        Ok(ids)
    }

    async fn load_meta(&self, id: &str) -> MetaLoad {
        let path = self.paths.games_dir.join(id).join(META_FILE);

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                return MetaLoad::Fallback {
                    reason: format!("cannot read {:?}: {}", path, e),
                }
            }
        };

        match serde_json::from_str::<GameMeta>(&content) {
            Ok(meta) => MetaLoad::Found(meta),
            Err(e) => MetaLoad::Fallback {
                reason: format!("cannot parse {:?}: {}", path, e),
            },
        }
    }

    async fn asset_exists(&self, relative: &str) -> bool {
        fs::try_exists(self.paths.resolve(relative))
            .await
            .unwrap_or(false)
    }

    async fn save_thumbnail(&self, id: &str, svg: &str) -> Result<String> {
        let path = self.thumbnail_path(id);
        fs::write(&path, svg).await?;
        debug!("Wrote thumbnail {:?}", path);

        Ok(format!("{}/{}.{}", THUMBNAILS_DIR, id, StorageKeys::THUMBNAIL_EXT))
    }

    async fn list_thumbnails(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = match fs::read_dir(&self.paths.thumbnails_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ids),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_svg = path
                .extension()
                .is_some_and(|ext| ext == StorageKeys::THUMBNAIL_EXT);
            if !is_svg || !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    async fn remove_thumbnail(&self, id: &str) -> Result<()> {
        fs::remove_file(self.thumbnail_path(id)).await?;
        Ok(())
    }

    async fn save_manifest(&self, manifest: &Manifest) -> Result<PathBuf> {
        let content = manifest.to_json()?;
        self.write_atomic(&self.paths.manifest, &content).await?;
        Ok(self.paths.manifest.clone())
    }
}
