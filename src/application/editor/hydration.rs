//! One-shot hydration guard for edit sessions.

use serde::Serialize;

/// `Empty -> Loading -> Hydrated -> Editing`. Only `Loading` accepts a fetched record,
/// and user input moves any state except `Loading` to `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationState {
    #[default]
    Empty,
    Loading,
    Hydrated,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    Applied,
    /// The record arrived while the session was in the given state and was dropped.
    Ignored(HydrationState),
    /// The record carries a different id than the article being edited.
    WrongArticle,
}

impl HydrationState {
    pub fn begin_loading(self) -> Option<Self> {
        matches!(self, HydrationState::Empty).then_some(HydrationState::Loading)
    }

    pub fn accepts_record(self) -> bool {
        matches!(self, HydrationState::Loading)
    }

    pub fn after_input(self) -> Self {
        match self {
            HydrationState::Loading => HydrationState::Loading,
            _ => HydrationState::Editing,
        }
    }
}
