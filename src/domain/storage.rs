use super::{Manifest, MetaLoad};
use crate::error::Result;
use std::path::PathBuf;

/// Everything the manifest builder needs from the project tree.
#[allow(async_fn_in_trait)]
pub trait Storage {
    async fn ensure_thumbnail_dir(&self) -> Result<()>;
    async fn list_game_ids(&self) -> Result<Vec<String>>;
    async fn load_meta(&self, id: &str) -> MetaLoad;
    async fn asset_exists(&self, relative: &str) -> bool;
    async fn save_thumbnail(&self, id: &str, svg: &str) -> Result<String>;
    async fn list_thumbnails(&self) -> Result<Vec<String>>;
    async fn remove_thumbnail(&self, id: &str) -> Result<()>;
    async fn save_manifest(&self, manifest: &Manifest) -> Result<PathBuf>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const THUMBNAIL_EXT: &'static str = "svg";
    pub const MANIFEST_TMP_SUFFIX: &'static str = "tmp";
}
