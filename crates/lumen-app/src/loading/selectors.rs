//! Read-only views over a [`LoadingContext`].

use super::store::{LoadingContext, GLOBAL_MESSAGE_KEY};

/// Whether anything is loading.
///
/// With a key: whether that operation's flag is set. Without one: whether
/// global loading is on or any operation is present.
pub fn is_loading(snapshot: Option<&LoadingContext>, key: Option<&str>) -> bool {
    let Some(ctx) = snapshot else {
        return false;
    };
    match key {
        Some(key) => ctx.operations.get(key).copied().unwrap_or(false),
        None => ctx.global_loading || !ctx.operations.is_empty(),
    }
}

/// Message to show for the current loading state.
///
/// With a key: that operation's message, or `""`. Without one: the global
/// message while globally loading, otherwise the message of the first
/// operation in insertion order, otherwise `""`. A missing or blank message
/// for an active slot reads as `default`.
pub fn loading_message<'a>(
    snapshot: Option<&'a LoadingContext>,
    key: Option<&str>,
    default: &'a str,
) -> &'a str {
    let Some(ctx) = snapshot else {
        return "";
    };

    if let Some(key) = key {
        return ctx.messages.get(key).map_or("", String::as_str);
    }

    let slot = if ctx.global_loading {
        GLOBAL_MESSAGE_KEY
    } else {
        match ctx.operations.keys().next() {
            Some(first) => first.as_str(),
            None => return "",
        }
    };

    match ctx.messages.get(slot) {
        Some(message) if !message.is_empty() => message.as_str(),
        _ => default,
    }
}

/// Global busy flag; `false` when there is no snapshot.
pub fn global_loading(snapshot: Option<&LoadingContext>) -> bool {
    snapshot.map_or(false, |ctx| ctx.global_loading)
}

/// Keys of active operations in insertion order.
pub fn active_operations(snapshot: Option<&LoadingContext>) -> Vec<&str> {
    snapshot.map_or_else(Vec::new, |ctx| {
        ctx.operations
            .iter()
            .filter(|(_, active)| **active)
            .map(|(key, _)| key.as_str())
            .collect()
    })
}

/// Number of active keyed operations.
pub fn active_operation_count(snapshot: Option<&LoadingContext>) -> usize {
    snapshot.map_or(0, |ctx| ctx.operations.values().filter(|a| **a).count())
}

/// `(key, message)` pairs in insertion order, including the global slot.
pub fn messages(snapshot: Option<&LoadingContext>) -> Vec<(&str, &str)> {
    snapshot.map_or_else(Vec::new, |ctx| {
        ctx.messages
            .iter()
            .map(|(key, message)| (key.as_str(), message.as_str()))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(global: bool, ops: &[(&str, &str)]) -> LoadingContext {
        let mut ctx = LoadingContext {
            global_loading: global,
            ..LoadingContext::default()
        };
        for (key, message) in ops {
            ctx.operations.insert((*key).to_string(), true);
            ctx.messages.insert((*key).to_string(), (*message).to_string());
        }
        ctx
    }

    #[test]
    fn test_defaults_without_snapshot() {
        assert!(!is_loading(None, None));
        assert!(!is_loading(None, Some("fetch")));
        assert_eq!(loading_message(None, None, "Loading..."), "");
        assert!(!global_loading(None));
        assert!(active_operations(None).is_empty());
        assert_eq!(active_operation_count(None), 0);
        assert!(messages(None).is_empty());
    }

    #[test]
    fn test_is_loading_keyed_and_unkeyed() {
        let idle = ctx(false, &[]);
        assert!(!is_loading(Some(&idle), None));

        let fetching = ctx(false, &[("fetch", "Fetching")]);
        assert!(is_loading(Some(&fetching), None));
        assert!(is_loading(Some(&fetching), Some("fetch")));
        assert!(!is_loading(Some(&fetching), Some("other")));

        let global = ctx(true, &[]);
        assert!(is_loading(Some(&global), None));
        assert!(!is_loading(Some(&global), Some("fetch")));
    }

    #[test]
    fn test_message_for_key() {
        let c = ctx(false, &[("fetch", "Fetching")]);
        assert_eq!(loading_message(Some(&c), Some("fetch"), "D"), "Fetching");
        assert_eq!(loading_message(Some(&c), Some("other"), "D"), "");
    }

    #[test]
    fn test_global_message_wins_over_operations() {
        let mut c = ctx(true, &[("fetch", "Fetching")]);
        c.messages.insert(GLOBAL_MESSAGE_KEY.to_string(), "Saving".to_string());
        assert_eq!(loading_message(Some(&c), None, "D"), "Saving");
    }

    #[test]
    fn test_global_without_message_falls_back_to_default() {
        let c = ctx(true, &[]);
        assert_eq!(loading_message(Some(&c), None, "D"), "D");
    }

    #[test]
    fn test_first_operation_in_insertion_order() {
        let c = ctx(false, &[("zeta", "Z"), ("alpha", "A")]);
        assert_eq!(loading_message(Some(&c), None, "D"), "Z");
        assert_eq!(active_operations(Some(&c)), vec!["zeta", "alpha"]);
        assert_eq!(active_operation_count(Some(&c)), 2);
    }

    #[test]
    fn test_idle_message_is_empty_even_with_stale_global_text() {
        let mut c = ctx(false, &[]);
        c.messages.insert(GLOBAL_MESSAGE_KEY.to_string(), String::new());
        assert_eq!(loading_message(Some(&c), None, "D"), "");
        assert_eq!(messages(Some(&c)), vec![(GLOBAL_MESSAGE_KEY, "")]);
    }
}
