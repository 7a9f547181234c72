//! Error store: events, context, and the transition function.

use super::policy::RecoverabilityPolicy;
use super::record::{ErrorId, ErrorPayload, ErrorRecord};
use lumen_core::{
    IdGenerator, MonotonicClock, PhysicalClock, RandomIds, Reducer, Store, StoreEvent,
    SystemClock,
};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Events accepted by the error store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorEvent {
    /// Append a new record with a generated id and timestamp.
    AddError(ErrorPayload),
    /// Drop the record with this id. No-op when absent.
    RemoveError(ErrorId),
    /// Drop every record. Leaves the global error and online flag alone.
    ClearErrors,
    /// Replace the global error slot.
    SetGlobalError(Option<ErrorRecord>),
    /// Replace the online flag.
    SetOnlineStatus(bool),
}

impl StoreEvent for ErrorEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::AddError(_) => "ADD_ERROR",
            Self::RemoveError(_) => "REMOVE_ERROR",
            Self::ClearErrors => "CLEAR_ERRORS",
            Self::SetGlobalError(_) => "SET_GLOBAL_ERROR",
            Self::SetOnlineStatus(_) => "SET_ONLINE_STATUS",
        }
    }
}

/// Data held by the error store.
///
/// `global_error` is tracked independently of `errors`: setting it does not
/// add it to the list and clearing the list does not clear it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorContext {
    /// Records in insertion order, ids unique.
    pub errors: Vec<ErrorRecord>,
    /// Page-level error, tracked apart from `errors`.
    pub global_error: Option<ErrorRecord>,
    /// Last known connectivity.
    pub is_online: bool,
}

impl ErrorContext {
    /// Empty context with the given connectivity.
    pub fn new(is_online: bool) -> Self {
        Self {
            errors: Vec::new(),
            global_error: None,
            is_online,
        }
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Transition function for [`ErrorEvent`]s.
///
/// Holds the clock and id source used to stamp new records. The clock is
/// wrapped so timestamps never decrease within one store.
pub struct ErrorReducer {
    clock: MonotonicClock<Arc<dyn PhysicalClock>>,
    ids: Arc<dyn IdGenerator>,
    policy: RecoverabilityPolicy,
}

impl ErrorReducer {
    /// Reducer using the given effects and classification policy.
    pub fn new(
        clock: Arc<dyn PhysicalClock>,
        ids: Arc<dyn IdGenerator>,
        policy: RecoverabilityPolicy,
    ) -> Self {
        Self {
            clock: MonotonicClock::new(clock),
            ids,
            policy,
        }
    }

    /// The classification applied to payloads without an explicit
    /// `recoverable`.
    pub fn policy(&self) -> &RecoverabilityPolicy {
        &self.policy
    }

    fn stamp(&self, payload: ErrorPayload) -> ErrorRecord {
        let id = ErrorId::from(self.ids.next_uuid());
        let timestamp = self.clock.now_ms();
        self.policy.classify(payload).into_record(id, timestamp)
    }
}

impl Reducer for ErrorReducer {
    type Context = ErrorContext;
    type Event = ErrorEvent;
    const NAME: &'static str = "errors";

    fn reduce(&self, context: &ErrorContext, event: ErrorEvent) -> ErrorContext {
        match event {
            ErrorEvent::AddError(payload) => {
                let record = self.stamp(payload);
                tracing::debug!(
                    id = %record.id,
                    category = %record.category,
                    "error added"
                );
                let mut errors = Vec::with_capacity(context.errors.len() + 1);
                errors.extend(context.errors.iter().cloned());
                errors.push(record);
                ErrorContext {
                    errors,
                    ..context.clone()
                }
            }
            ErrorEvent::RemoveError(id) => {
                if !context.errors.iter().any(|e| e.id == id) {
                    tracing::debug!(%id, "remove for unknown error id ignored");
                    return context.clone();
                }
                ErrorContext {
                    errors: context
                        .errors
                        .iter()
                        .filter(|e| e.id != id)
                        .cloned()
                        .collect(),
                    ..context.clone()
                }
            }
            ErrorEvent::ClearErrors => ErrorContext {
                errors: Vec::new(),
                ..context.clone()
            },
            ErrorEvent::SetGlobalError(global_error) => ErrorContext {
                global_error,
                ..context.clone()
            },
            ErrorEvent::SetOnlineStatus(is_online) => {
                if is_online != context.is_online {
                    tracing::debug!(is_online, "connectivity changed");
                }
                ErrorContext {
                    is_online,
                    ..context.clone()
                }
            }
        }
    }
}

/// Store of user-facing error conditions.
///
/// Derefs to the underlying [`Store`] for `dispatch`, `snapshot`,
/// `subscribe` and `select`.
pub struct ErrorStore {
    inner: Store<ErrorReducer>,
}

impl ErrorStore {
    /// Store with system effects, the default policy, and the given initial
    /// connectivity.
    pub fn new(is_online: bool) -> Self {
        Self::builder().online(is_online).build()
    }

    /// Configure effects, policy, and seed values.
    pub fn builder() -> ErrorStoreBuilder {
        ErrorStoreBuilder::default()
    }

    /// Add an error and return the id it was given.
    pub fn add_error(&self, payload: ErrorPayload) -> ErrorId {
        let snapshot = self.inner.dispatch(ErrorEvent::AddError(payload));
        // Dispatch is serialized, so the record just added is last.
        snapshot
            .errors
            .last()
            .map(|record| record.id.clone())
            .unwrap_or_else(|| ErrorId::new(""))
    }

    /// Remove one error by id.
    pub fn remove_error(&self, id: &ErrorId) -> Arc<ErrorContext> {
        self.inner.dispatch(ErrorEvent::RemoveError(id.clone()))
    }

    /// Remove every listed error.
    pub fn clear_errors(&self) -> Arc<ErrorContext> {
        self.inner.dispatch(ErrorEvent::ClearErrors)
    }

    /// Replace the global error slot.
    pub fn set_global_error(&self, record: Option<ErrorRecord>) -> Arc<ErrorContext> {
        self.inner.dispatch(ErrorEvent::SetGlobalError(record))
    }

    /// Record a connectivity change.
    pub fn set_online_status(&self, is_online: bool) -> Arc<ErrorContext> {
        self.inner.dispatch(ErrorEvent::SetOnlineStatus(is_online))
    }
}

impl Default for ErrorStore {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Deref for ErrorStore {
    type Target = Store<ErrorReducer>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Builder for [`ErrorStore`].
pub struct ErrorStoreBuilder {
    is_online: bool,
    clock: Option<Arc<dyn PhysicalClock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    policy: RecoverabilityPolicy,
}

impl Default for ErrorStoreBuilder {
    fn default() -> Self {
        Self {
            is_online: true,
            clock: None,
            ids: None,
            policy: RecoverabilityPolicy::default(),
        }
    }
}

impl ErrorStoreBuilder {
    /// Initial connectivity, as read from the environment by the caller.
    #[must_use]
    pub fn online(mut self, is_online: bool) -> Self {
        self.is_online = is_online;
        self
    }

    /// Clock used for record timestamps.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn PhysicalClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Source of record ids.
    #[must_use]
    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Recoverability classification for payloads that leave it unset.
    #[must_use]
    pub fn policy(mut self, policy: RecoverabilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the store.
    pub fn build(self) -> ErrorStore {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let ids = self.ids.unwrap_or_else(|| Arc::new(RandomIds::new()));
        let reducer = ErrorReducer::new(clock, ids, self.policy);
        ErrorStore {
            inner: Store::new(reducer, ErrorContext::new(self.is_online)),
        }
    }
}
