use crate::domain::game::GameEntry;
use crate::utils::natural_cmp;
use serde::{Deserialize, Serialize};

/// The whole catalog as written to `games-manifest.json`: a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub games: Vec<GameEntry>,
}

impl Manifest {
    pub fn new(mut games: Vec<GameEntry>) -> Self {
        games.sort_by(|a, b| natural_cmp(&a.id, &b.id));
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.games.iter().any(|g| g.id == id)
    }

    /// Whether some entry points at `relative`; a leading separator is ignored.
    pub fn references_thumbnail(&self, relative: &str) -> bool {
        let wanted = relative.trim_start_matches(['/', '\\']);
        self.games
            .iter()
            .any(|g| g.thumbnail.trim_start_matches(['/', '\\']) == wanted)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
