//! # Display Mode Store
//!
//! A user-controlled dark/light flag next to the operating system's
//! preference. The two never feed each other: `SYSTEM_CHANGED` only records
//! what the system reports, and whether to follow it is up to the consumer.

use lumen_core::{Reducer, Store, StoreEvent};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Events accepted by the display mode store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayModeEvent {
    /// Flip the user's choice.
    Toggle,
    /// Set the user's choice.
    SetDark(bool),
    /// Record the system preference. Never changes the user's choice.
    SystemChanged(bool),
}

impl StoreEvent for DisplayModeEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Toggle => "TOGGLE",
            Self::SetDark(_) => "SET_DARK",
            Self::SystemChanged(_) => "SYSTEM_CHANGED",
        }
    }
}

/// Data held by the display mode store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModeContext {
    /// The user's choice.
    pub is_dark: bool,
    /// What the operating system last reported.
    pub system_preference: bool,
}

/// Optional seed values for a new store. Unset fields start as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayModeSeed {
    /// Persisted user choice, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dark: Option<bool>,
    /// System preference read at startup, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_preference: Option<bool>,
}

impl From<DisplayModeSeed> for DisplayModeContext {
    fn from(seed: DisplayModeSeed) -> Self {
        Self {
            is_dark: seed.is_dark.unwrap_or(false),
            system_preference: seed.system_preference.unwrap_or(false),
        }
    }
}

/// Transition function for [`DisplayModeEvent`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayModeReducer;

impl Reducer for DisplayModeReducer {
    type Context = DisplayModeContext;
    type Event = DisplayModeEvent;
    const NAME: &'static str = "display_mode";

    fn reduce(&self, context: &DisplayModeContext, event: DisplayModeEvent) -> DisplayModeContext {
        match event {
            DisplayModeEvent::Toggle => DisplayModeContext {
                is_dark: !context.is_dark,
                ..*context
            },
            DisplayModeEvent::SetDark(is_dark) => DisplayModeContext {
                is_dark,
                ..*context
            },
            DisplayModeEvent::SystemChanged(system_preference) => {
                tracing::debug!(system_preference, "system display preference changed");
                DisplayModeContext {
                    system_preference,
                    ..*context
                }
            }
        }
    }
}

/// Store of the dark/light preference.
pub struct DisplayModeStore {
    inner: Store<DisplayModeReducer>,
}

impl DisplayModeStore {
    /// Store starting from `seed`.
    pub fn new(seed: DisplayModeSeed) -> Self {
        Self {
            inner: Store::new(DisplayModeReducer, seed.into()),
        }
    }

    /// Flip the user's choice.
    pub fn toggle(&self) -> Arc<DisplayModeContext> {
        self.inner.dispatch(DisplayModeEvent::Toggle)
    }

    /// Set the user's choice.
    pub fn set_dark(&self, is_dark: bool) -> Arc<DisplayModeContext> {
        self.inner.dispatch(DisplayModeEvent::SetDark(is_dark))
    }

    /// Record a system preference change.
    pub fn system_changed(&self, prefers_dark: bool) -> Arc<DisplayModeContext> {
        self.inner.dispatch(DisplayModeEvent::SystemChanged(prefers_dark))
    }
}

impl Default for DisplayModeStore {
    fn default() -> Self {
        Self::new(DisplayModeSeed::default())
    }
}

impl Deref for DisplayModeStore {
    type Target = Store<DisplayModeReducer>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Read-only views over a [`DisplayModeContext`]. `None` reads as light mode.
pub mod selectors {
    use super::DisplayModeContext;

    /// The user's choice.
    pub fn is_dark(snapshot: Option<&DisplayModeContext>) -> bool {
        snapshot.map_or(false, |ctx| ctx.is_dark)
    }

    /// The last reported system preference.
    pub fn system_preference(snapshot: Option<&DisplayModeContext>) -> bool {
        snapshot.map_or(false, |ctx| ctx.system_preference)
    }

    /// Whether the user's choice currently agrees with the system.
    pub fn matches_system(snapshot: Option<&DisplayModeContext>) -> bool {
        is_dark(snapshot) == system_preference(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_defaults_to_light() {
        let store = DisplayModeStore::default();
        assert_eq!(*store.snapshot(), DisplayModeContext::default());

        let seeded = DisplayModeStore::new(DisplayModeSeed {
            is_dark: Some(true),
            system_preference: None,
        });
        assert!(seeded.snapshot().is_dark);
        assert!(!seeded.snapshot().system_preference);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let store = DisplayModeStore::default();
        assert!(store.toggle().is_dark);
        assert!(!store.toggle().is_dark);
    }

    #[test]
    fn test_set_dark_is_idempotent() {
        let store = DisplayModeStore::default();
        let once = store.set_dark(true);
        let twice = store.set_dark(true);
        assert_eq!(once, twice);
        assert!(twice.is_dark);
    }

    #[test]
    fn test_system_changed_leaves_is_dark() {
        let store = DisplayModeStore::default();
        let snapshot = store.system_changed(true);
        assert_eq!(
            *snapshot,
            DisplayModeContext {
                is_dark: false,
                system_preference: true
            }
        );
    }

    #[test]
    fn test_selectors() {
        assert!(!selectors::is_dark(None));
        assert!(!selectors::system_preference(None));
        assert!(selectors::matches_system(None));

        let ctx = DisplayModeContext {
            is_dark: true,
            system_preference: false,
        };
        assert!(selectors::is_dark(Some(&ctx)));
        assert!(!selectors::matches_system(Some(&ctx)));
    }

    #[test]
    fn test_event_wire_format() {
        let event: DisplayModeEvent =
            serde_json::from_str(r#"{"type":"SET_DARK","value":true}"#).unwrap();
        assert_eq!(event, DisplayModeEvent::SetDark(true));

        let json = serde_json::to_string(&DisplayModeEvent::Toggle).unwrap();
        assert_eq!(json, r#"{"type":"TOGGLE"}"#);
    }
}
