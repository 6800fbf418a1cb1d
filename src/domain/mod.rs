mod game;
mod manifest;
pub mod storage;

pub use game::{GameEntry, GameMeta, MetaLoad, PLACEHOLDER_STATUS};
pub use manifest::Manifest;
