use crate::domain::{GameEntry, Manifest};
use crate::error::Result;
use crate::infrastructure::{ManifestClient, ManifestSource};
use crate::services::search::{self, SearchEvent};
use crate::utils::escape_markup;
use std::collections::HashSet;
use std::fmt::Write;
use tracing::{debug, error, info};

pub const GRID_ID: &str = "gamesGrid";
pub const SEARCH_INPUT_ID: &str = "search";
pub const CLEAR_BUTTON_ID: &str = "clearSearch";
/// How far outside the viewport a card may be and still activate its frame.
pub const ROOT_MARGIN: &str = "150px";
pub const EMPTY_NOTE: &str = "Game not added yet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// `data-src` only, waiting for the card to come into view.
    Deferred,
    /// `src` assigned, skeleton still showing.
    Loading,
    Loaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub game: GameEntry,
    pub hidden: bool,
    /// `None` for placeholder games, which never get a frame.
    pub frame: Option<FrameState>,
}

impl Card {
    fn new(game: GameEntry) -> Self {
        let frame = (!game.is_placeholder()).then_some(FrameState::Deferred);
        Self {
            game,
            hidden: false,
            frame,
        }
    }

    pub fn shows_skeleton(&self) -> bool {
        !matches!(self.frame, Some(FrameState::Loaded))
    }
}

/// A visibility change reported for one card.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub id: &'a str,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridContent {
    Cards(Vec<Card>),
    Error(String),
}

/// Everything the grid page shows, owned in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub content: GridContent,
    pub query: String,
    observed: HashSet<String>,
}

impl AppState {
    pub fn from_manifest(manifest: Manifest) -> Self {
        let cards: Vec<Card> = manifest.games.into_iter().map(Card::new).collect();
        let observed = cards
            .iter()
            .filter(|c| c.frame.is_some())
            .map(|c| c.game.id.clone())
            .collect();

        Self {
            content: GridContent::Cards(cards),
            query: String::new(),
            observed,
        }
    }

    pub fn load_failed(message: impl Into<String>) -> Self {
        Self {
            content: GridContent::Error(message.into()),
            query: String::new(),
            observed: HashSet::new(),
        }
    }

    /// Loading never fails outright: errors become an inline message in the grid.
    pub async fn load(client: &ManifestClient, source: &ManifestSource) -> Self {
        match client.load(source).await {
            Ok(manifest) => {
                info!("Loaded manifest with {} games", manifest.len());
                Self::from_manifest(manifest)
            }
            Err(e) => {
                error!("Manifest load error: {}", e);
                Self::load_failed(e.to_string())
            }
        }
    }

    pub fn cards(&self) -> &[Card] {
        match &self.content {
            GridContent::Cards(cards) => cards,
            GridContent::Error(_) => &[],
        }
    }

    fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        match &mut self.content {
            GridContent::Cards(cards) => cards.iter_mut().find(|c| c.game.id == id),
            GridContent::Error(_) => None,
        }
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    /// Assigns frame sources for cards that came into view and stops
    /// observing them. Returns the sources that were assigned.
    pub fn on_intersect(&mut self, entries: &[Intersection<'_>]) -> Vec<String> {
        let mut assigned = Vec::new();

        for entry in entries {
            if !entry.is_intersecting || !self.observed.remove(entry.id) {
                continue;
            }
            if let Some(card) = self.card_mut(entry.id) {
                if card.frame == Some(FrameState::Deferred) {
                    card.frame = Some(FrameState::Loading);
                    debug!("Activating frame for {}", card.game.id);
                    assigned.push(card.game.game_url());
                }
            }
        }

        assigned
    }

    /// The frame finished loading, so the skeleton goes away.
    pub fn on_frame_load(&mut self, id: &str) {
        if let Some(card) = self.card_mut(id) {
            if card.frame == Some(FrameState::Loading) {
                card.frame = Some(FrameState::Loaded);
            }
        }
    }

    /// Hides cards whose title, genre and description do not contain the query.
    pub fn filter(&mut self, query: &str) {
        let needle = query.trim().to_lowercase();
        self.query = query.to_string();

        if let GridContent::Cards(cards) = &mut self.content {
            for card in cards.iter_mut() {
                card.hidden = !needle.is_empty() && !card.game.haystack().contains(&needle);
            }
        }
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.cards()
            .iter()
            .filter(|c| !c.hidden)
            .map(|c| c.game.id.as_str())
            .collect()
    }

    pub fn render_grid(&self) -> String {
        match &self.content {
            GridContent::Error(message) => format!(
                r##"<p class="manifest-error" style="color:#ef4444">Manifest load error: {}</p>"##,
                escape_markup(message)
            ),
            GridContent::Cards(cards) => cards.iter().map(render_card).collect(),
        }
    }

    pub fn render_page(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Game Grid</title>
</head>
<body>
<div class="search-bar">
<input id="{search}" type="search" placeholder="Search games (Ctrl+K)" value="{query}" autocomplete="off">
<button id="{clear}" type="button">Clear</button>
</div>
<main id="{grid}" data-root-margin="{margin}">{cards}</main>
</body>
</html>
"#,
            search = SEARCH_INPUT_ID,
            clear = CLEAR_BUTTON_ID,
            query = escape_markup(&self.query),
            grid = GRID_ID,
            margin = ROOT_MARGIN,
            cards = self.render_grid(),
        )
    }
}

fn render_card(card: &Card) -> String {
    let game = &card.game;
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<article class="game-card" data-id="{id}" data-status="{status}"{hidden}>"#,
        id = escape_markup(&game.id),
        status = escape_markup(&game.status),
        hidden = if card.hidden { " hidden" } else { "" },
    );
    let _ = write!(
        html,
        r#"<header><h2>{title}</h2><div class="meta-line"><span class="badge-status">{status}</span><span class="badge-genre">{genre}</span></div><p class="desc">{desc}</p></header>"#,
        title = escape_markup(&game.title),
        status = escape_markup(&game.status),
        genre = escape_markup(&game.genre),
        desc = escape_markup(&game.description),
    );

    if !game.thumbnail.is_empty() {
        let _ = write!(
            html,
            r#"<div class="thumb"><img src="{src}" alt="{title} thumbnail" loading="lazy"></div>"#,
            src = escape_markup(&game.thumbnail),
            title = escape_markup(&game.title),
        );
    }

    html.push_str(r#"<div class="preview-wrap">"#);
    if card.shows_skeleton() {
        html.push_str(r#"<div class="skeleton"></div>"#);
    }
    match card.frame {
        None => {
            let _ = write!(html, r#"<div class="empty-note">{}</div>"#, EMPTY_NOTE);
        }
        Some(state) => {
            let url = escape_markup(&game.game_url());
            let src = match state {
                FrameState::Deferred => String::new(),
                FrameState::Loading | FrameState::Loaded => format!(r#" src="{}""#, url),
            };
            let _ = write!(
                html,
                r#"<iframe title="{title}" loading="lazy" sandbox="allow-scripts" data-src="{url}"{src}></iframe>"#,
                title = escape_markup(&game.title),
            );
        }
    }
    html.push_str("</div></article>");

    html
}

pub async fn render_to_file(
    client: &ManifestClient,
    source: &ManifestSource,
    query: Option<&str>,
    out: &std::path::Path,
) -> Result<AppState> {
    let mut state = AppState::load(client, source).await;
    if let Some(query) = query {
        search::apply(&mut state, SearchEvent::Input(query.to_string()));
    }

    tokio::fs::write(out, state.render_page()).await?;
    info!(
        "Rendered {} of {} cards to {:?}",
        state.visible_ids().len(),
        state.cards().len(),
        out
    );
    Ok(state)
}
