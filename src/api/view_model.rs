use serde::{Deserialize, Serialize};

use crate::core::LegendEntry;
use crate::stats::SummaryCell;

/// Display state of one dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CardState {
    /// Statistics not fetched yet.
    #[default]
    Loading,
    Ready,
    /// Valid data, but nothing to show for the current selection.
    Empty,
    /// The statistics fetch failed; the user has to reload.
    Error,
}

impl CardState {
    #[must_use]
    pub const fn from_has_data(has_data: bool) -> Self {
        if has_data { Self::Ready } else { Self::Empty }
    }

    /// State class the host toggles on the card element.
    #[must_use]
    pub const fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Empty => Some("is-empty"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardStates {
    pub session_volume: CardState,
    pub session_rate: CardState,
    pub summary: CardState,
    pub tag_comparison: CardState,
}

impl CardStates {
    #[must_use]
    pub const fn all(state: CardState) -> Self {
        Self {
            session_volume: state,
            session_rate: state,
            summary: state,
            tag_comparison: state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options and selection of one dropdown.
///
/// An empty selector is disabled and shows a single placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectorState {
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub disabled: bool,
    pub placeholder: Option<String>,
}

impl SelectorState {
    #[must_use]
    pub fn empty(placeholder: impl Into<String>) -> Self {
        Self {
            options: Vec::new(),
            selected: None,
            disabled: true,
            placeholder: Some(placeholder.into()),
        }
    }

    #[must_use]
    pub fn populated(options: Vec<SelectOption>, selected: Option<String>) -> Self {
        Self {
            options,
            selected,
            disabled: false,
            placeholder: None,
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTab {
    pub key: String,
    pub active: bool,
}

/// Everything the host page binds to besides chart pixels.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardView {
    pub session_tabs: Vec<SessionTab>,
    pub summary_years: SelectorState,
    pub summary: Vec<SummaryCell>,
    pub tag_select: SelectorState,
    pub comparison_sessions: SelectorState,
    pub comparison_years: SelectorState,
    pub metric_select: SelectorState,
    pub comparison_title: String,
    pub comparison_legend: Vec<LegendEntry>,
    pub cards: CardStates,
}

impl DashboardView {
    #[must_use]
    pub fn with_cards(state: CardState) -> Self {
        Self {
            cards: CardStates::all(state),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active_session(&self) -> Option<&str> {
        self.session_tabs
            .iter()
            .find(|tab| tab.active)
            .map(|tab| tab.key.as_str())
    }
}
