use crate::services::grid::AppState;

/// User input coming from the search controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Input(String),
    Clear,
    KeyDown { key: String, ctrl: bool, meta: bool },
}

/// What the host page has to do after an event was applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchEffect {
    pub focus_input: bool,
    pub prevent_default: bool,
}

/// Ctrl+K or Cmd+K.
pub fn is_focus_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key.eq_ignore_ascii_case("k")
}

pub fn apply(state: &mut AppState, event: SearchEvent) -> SearchEffect {
    match event {
        SearchEvent::Input(value) => {
            state.filter(&value);
            SearchEffect::default()
        }
        SearchEvent::Clear => {
            state.filter("");
            SearchEffect {
                focus_input: true,
                prevent_default: false,
            }
        }
        SearchEvent::KeyDown { key, ctrl, meta } if is_focus_shortcut(&key, ctrl, meta) => {
            SearchEffect {
                focus_input: true,
                prevent_default: true,
            }
        }
        SearchEvent::KeyDown { .. } => SearchEffect::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GameEntry, GameMeta, Manifest};

    fn state() -> AppState {
        let games = [("one", "Space Quest"), ("two", "Road Rush"), ("three", "Quest Log")]
            .into_iter()
            .map(|(id, title)| {
                let meta = GameMeta {
                    title: Some(title.to_string()),
                    ..GameMeta::default()
                };
                GameEntry::from_meta(id, &meta)
            })
            .collect();
        AppState::from_manifest(Manifest::new(games))
    }

    #[test]
    fn typing_filters_and_clear_restores() {
        let mut state = state();

        let effect = apply(&mut state, SearchEvent::Input("QUEST".into()));
        assert_eq!(effect, SearchEffect::default());
        assert_eq!(state.visible_ids(), ["one", "three"]);

        let effect = apply(&mut state, SearchEvent::Clear);
        assert!(effect.focus_input);
        assert_eq!(state.query, "");
        assert_eq!(state.visible_ids().len(), 3);
    }

    #[test]
    fn shortcut_focuses_search() {
        let mut state = state();
        let effect = apply(
            &mut state,
            SearchEvent::KeyDown {
                key: "K".into(),
                ctrl: false,
                meta: true,
            },
        );
        assert!(effect.focus_input && effect.prevent_default);

        let plain = apply(
            &mut state,
            SearchEvent::KeyDown {
                key: "k".into(),
                ctrl: false,
                meta: false,
            },
        );
        assert_eq!(plain, SearchEffect::default());
    }
}
