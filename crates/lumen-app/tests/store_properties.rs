#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! # Store Properties
//!
//! Generative checks of the invariants every frontend relies on: id
//! uniqueness, idempotent removal, start/stop round trips, and the
//! separation between user and system display preferences.

use lumen_app::display_mode::{DisplayModeContext, DisplayModeEvent};
use lumen_app::error_store::{selectors, ErrorCategory, ErrorEvent, ErrorId, ErrorPayload};
use lumen_app::loading::{selectors as loading_selectors, LoadingEvent};
use lumen_app::{DisplayModeStore, ErrorStore, LoadingStore};
use lumen_testkit::{ManualClock, SequentialIds};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn deterministic_error_store() -> ErrorStore {
    ErrorStore::builder()
        .clock(Arc::new(ManualClock::at(1_700_000_000_000)))
        .ids(Arc::new(SequentialIds::new()))
        .build()
}

fn category() -> impl Strategy<Value = ErrorCategory> {
    prop::sample::select(ErrorCategory::ALL.to_vec())
}

/// Either add an error, or remove the n-th id issued so far (possibly one
/// already removed, possibly one never issued).
#[derive(Debug, Clone)]
enum ErrorStep {
    Add(ErrorCategory, String),
    Remove(u8),
}

fn error_step() -> impl Strategy<Value = ErrorStep> {
    prop_oneof![
        (category(), "[a-z ]{1,12}").prop_map(|(c, m)| ErrorStep::Add(c, m)),
        any::<u8>().prop_map(ErrorStep::Remove),
    ]
}

fn loading_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["fetch", "upload", "save", "sync"]).prop_map(str::to_string)
}

fn loading_event() -> impl Strategy<Value = LoadingEvent> {
    prop_oneof![
        prop::option::of("[A-Za-z]{0,6}").prop_map(LoadingEvent::StartGlobalLoading),
        Just(LoadingEvent::StopGlobalLoading),
        (loading_key(), prop::option::of("[A-Za-z]{0,6}"))
            .prop_map(|(key, message)| LoadingEvent::StartOperation { key, message }),
        loading_key().prop_map(LoadingEvent::StopOperation),
        Just(LoadingEvent::ClearAllOperations),
    ]
}

fn display_event() -> impl Strategy<Value = DisplayModeEvent> {
    prop_oneof![
        Just(DisplayModeEvent::Toggle),
        any::<bool>().prop_map(DisplayModeEvent::SetDark),
        any::<bool>().prop_map(DisplayModeEvent::SystemChanged),
    ]
}

proptest! {
    #[test]
    fn error_count_tracks_adds_minus_removals(steps in prop::collection::vec(error_step(), 0..48)) {
        let store = deterministic_error_store();
        let mut issued: Vec<ErrorId> = Vec::new();
        let mut live: HashSet<ErrorId> = HashSet::new();

        for step in steps {
            match step {
                ErrorStep::Add(category, message) => {
                    let id = store.add_error(ErrorPayload::new(category, message));
                    issued.push(id.clone());
                    live.insert(id);
                }
                ErrorStep::Remove(n) => {
                    let id = issued
                        .get(usize::from(n) % (issued.len() + 1))
                        .cloned()
                        .unwrap_or_else(|| ErrorId::new("error_never_issued"));
                    live.remove(&id);
                    store.remove_error(&id);
                }
            }
        }

        let snapshot = store.snapshot();
        let errors = selectors::errors(Some(&*snapshot));
        prop_assert_eq!(errors.len(), live.len());

        let unique: HashSet<_> = errors.iter().map(|e| e.id.clone()).collect();
        prop_assert_eq!(unique.len(), errors.len());

        let timestamps: Vec<_> = errors.iter().map(|e| e.timestamp).collect();
        prop_assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn remove_error_is_idempotent(adds in 1usize..8, pick in any::<usize>()) {
        let store = deterministic_error_store();
        let ids: Vec<_> = (0..adds)
            .map(|i| store.add_error(ErrorPayload::new(ErrorCategory::General, format!("e{i}"))))
            .collect();
        let target = &ids[pick % ids.len()];

        let once = store.remove_error(target);
        let twice = store.remove_error(target);
        prop_assert_eq!(&*once, &*twice);
    }

    #[test]
    fn clear_errors_always_empties(steps in prop::collection::vec(error_step(), 0..24), online in any::<bool>()) {
        let store = deterministic_error_store();
        store.set_online_status(online);
        for step in steps {
            if let ErrorStep::Add(category, message) = step {
                store.add_error(ErrorPayload::new(category, message));
            }
        }
        let snapshot = store.dispatch(ErrorEvent::ClearErrors);
        prop_assert!(selectors::errors(Some(&*snapshot)).is_empty());
        prop_assert_eq!(selectors::is_online(Some(&*snapshot)), online);
    }

    #[test]
    fn start_then_stop_round_trips(
        history in prop::collection::vec(loading_event(), 0..16),
        message in prop::option::of("[A-Za-z]{1,6}"),
    ) {
        let store = LoadingStore::default();
        store.dispatch_all(history);
        let key = "round-trip";
        let before = store.snapshot();

        store.start_operation(key, message);
        let after = store.stop_operation(key);

        prop_assert_eq!(&after.operations, &before.operations);
        prop_assert_eq!(&after.messages, &before.messages);
        let order_before: Vec<_> = before.messages.keys().collect();
        let order_after: Vec<_> = after.messages.keys().collect();
        prop_assert_eq!(order_before, order_after);
    }

    #[test]
    fn is_loading_matches_definition(events in prop::collection::vec(loading_event(), 0..32)) {
        let store = LoadingStore::default();
        let snapshot = store.dispatch_all(events);
        let expected = snapshot.global_loading || !snapshot.operations.is_empty();
        prop_assert_eq!(loading_selectors::is_loading(Some(&*snapshot), None), expected);
        prop_assert_eq!(store.is_loading(None), expected);
    }

    #[test]
    fn system_changed_never_touches_is_dark(
        events in prop::collection::vec(display_event(), 0..16),
        system in any::<bool>(),
    ) {
        let store = DisplayModeStore::default();
        let before = store.dispatch_all(events);
        let after = store.dispatch(DisplayModeEvent::SystemChanged(system));
        prop_assert_eq!(
            *after,
            DisplayModeContext { is_dark: before.is_dark, system_preference: system }
        );
    }

    #[test]
    fn toggle_twice_is_identity(events in prop::collection::vec(display_event(), 0..16)) {
        let store = DisplayModeStore::default();
        let before = store.dispatch_all(events);
        store.toggle();
        let after = store.toggle();
        prop_assert_eq!(*after, *before);
    }
}

#[test]
fn fresh_store_network_error_scenario() {
    let store = ErrorStore::new(true);
    let snapshot = store.dispatch(ErrorEvent::AddError(ErrorPayload::new(
        ErrorCategory::Network,
        "offline",
    )));

    assert_eq!(snapshot.errors.len(), 1);
    let record = &snapshot.errors[0];
    assert_eq!(record.category, ErrorCategory::Network);
    assert_eq!(record.message, "offline");
    assert_eq!(record.recoverable, Some(true));
    assert!(record.id.as_str().starts_with("error_"));
    assert!(record.timestamp > 0);
}

#[test]
fn fetch_operation_scenario() {
    let store = LoadingStore::default();
    store.start_operation("fetch", None);

    assert!(store.is_loading(None));
    assert!(store.is_loading(Some("fetch")));
    assert!(!store.is_loading(Some("other")));
    assert_eq!(store.loading_message(None), "Loading...");
}
