//! Read-only views over an [`ErrorContext`].
//!
//! Every selector accepts `None` for a store that has not produced a
//! snapshot yet and answers with a safe default instead of failing.

use super::record::{ErrorCategory, ErrorId, ErrorRecord};
use super::store::ErrorContext;

/// Listed errors in insertion order; empty when there is no snapshot.
pub fn errors(snapshot: Option<&ErrorContext>) -> &[ErrorRecord] {
    snapshot
        .map(|ctx| ctx.errors.as_slice())
        .unwrap_or_default()
}

/// The global error, if any.
pub fn global_error(snapshot: Option<&ErrorContext>) -> Option<&ErrorRecord> {
    snapshot.and_then(|ctx| ctx.global_error.as_ref())
}

/// Connectivity flag; assumes online when there is no snapshot.
pub fn is_online(snapshot: Option<&ErrorContext>) -> bool {
    snapshot.map_or(true, |ctx| ctx.is_online)
}

/// Whether any error is listed. The global error does not count.
pub fn has_errors(snapshot: Option<&ErrorContext>) -> bool {
    !errors(snapshot).is_empty()
}

/// The listed error with `id`, if present.
pub fn find_error<'a>(snapshot: Option<&'a ErrorContext>, id: &ErrorId) -> Option<&'a ErrorRecord> {
    errors(snapshot).iter().find(|record| &record.id == id)
}

/// Listed errors of one category, in insertion order.
pub fn errors_by_category(
    snapshot: Option<&ErrorContext>,
    category: ErrorCategory,
) -> impl Iterator<Item = &ErrorRecord> {
    errors(snapshot)
        .iter()
        .filter(move |record| record.category == category)
}
