use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_STATUS: &str = "placeholder";
pub const DEFAULT_GENRE: &str = "Misc";
pub const FALLBACK_GENRE: &str = "Unknown";
pub const FALLBACK_DESCRIPTION: &str = "No meta.json present";

/// One record of `games-manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl GameEntry {
    /// Applies the manifest defaults to whatever `meta.json` provided.
    /// Empty strings count as missing.
    pub fn from_meta(id: &str, meta: &GameMeta) -> Self {
        Self {
            id: id.to_string(),
            title: non_empty(&meta.title).unwrap_or(id).to_string(),
            genre: non_empty(&meta.genre).unwrap_or(DEFAULT_GENRE).to_string(),
            description: non_empty(&meta.description).unwrap_or_default().to_string(),
            status: non_empty(&meta.status)
                .unwrap_or(PLACEHOLDER_STATUS)
                .to_string(),
            thumbnail: non_empty(&meta.thumbnail).unwrap_or_default().to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.status == PLACEHOLDER_STATUS
    }

    /// Conventional location of the playable game, relative to the site root.
    pub fn game_url(&self) -> String {
        format!("games/{}/index.html", self.id)
    }

    /// Text the search box matches against.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.genre, self.description).to_lowercase()
    }
}

/// Contents of `games/<id>/meta.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Marks `thumbnail` as a stand-in image that should be regenerated.
    #[serde(default)]
    pub placeholder_thumbnail: bool,
}

impl GameMeta {
    pub fn fallback(id: &str) -> Self {
        Self {
            title: Some(id.to_string()),
            genre: Some(FALLBACK_GENRE.to_string()),
            description: Some(FALLBACK_DESCRIPTION.to_string()),
            status: Some(PLACEHOLDER_STATUS.to_string()),
            thumbnail: None,
            placeholder_thumbnail: false,
        }
    }
}

/// Outcome of reading a game's metadata file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaLoad {
    Found(GameMeta),
    Fallback { reason: String },
}

impl MetaLoad {
    pub fn is_fallback(&self) -> bool {
        matches!(self, MetaLoad::Fallback { .. })
    }

    pub fn into_meta(self, id: &str) -> GameMeta {
        match self {
            MetaLoad::Found(meta) => meta,
            MetaLoad::Fallback { .. } => GameMeta::fallback(id),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
