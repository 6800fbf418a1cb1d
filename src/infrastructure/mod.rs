mod clients;
mod storage;

pub use clients::manifest::{ManifestClient, ManifestSource};
pub use storage::fs_store::FileSystemStore;
