//! Loading store: events, context, and the transition function.

use indexmap::IndexMap;
use lumen_core::{Reducer, Store, StoreEvent};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

/// Message key reserved for global (non-keyed) loading.
pub const GLOBAL_MESSAGE_KEY: &str = "global";

/// Text used when a start event carries no message.
pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

/// Events accepted by the loading store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingEvent {
    /// Raise the global busy flag, optionally with a message.
    StartGlobalLoading(Option<String>),
    /// Lower the global busy flag and blank its message.
    StopGlobalLoading,
    /// Mark one keyed operation as in flight.
    StartOperation {
        /// Caller-chosen operation name.
        key: String,
        /// Text to show; the default text when absent or empty.
        #[serde(default)]
        message: Option<String>,
    },
    /// Forget one keyed operation and its message. No-op when absent.
    StopOperation(String),
    /// Forget every keyed operation. Leaves the global flag alone.
    ClearAllOperations,
}

impl StoreEvent for LoadingEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::StartGlobalLoading(_) => "START_GLOBAL_LOADING",
            Self::StopGlobalLoading => "STOP_GLOBAL_LOADING",
            Self::StartOperation { .. } => "START_OPERATION",
            Self::StopOperation(_) => "STOP_OPERATION",
            Self::ClearAllOperations => "CLEAR_ALL_OPERATIONS",
        }
    }
}

/// Data held by the loading store.
///
/// Both maps keep insertion order. Re-starting a key keeps its original
/// position; stopping a key removes it without reordering the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingContext {
    /// Global busy flag, independent of keyed operations.
    pub global_loading: bool,
    /// In-flight operations. A present key with `true` is active.
    pub operations: IndexMap<String, bool>,
    /// Messages by operation key, plus [`GLOBAL_MESSAGE_KEY`].
    pub messages: IndexMap<String, String>,
}

/// Transition function for [`LoadingEvent`]s.
#[derive(Debug, Clone)]
pub struct LoadingReducer {
    default_message: String,
}

impl LoadingReducer {
    /// Reducer that fills missing messages with `default_message`.
    pub fn new(default_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
        }
    }

    /// Text used for start events without a message.
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    fn message_or_default(&self, message: Option<String>) -> String {
        match message {
            Some(text) if !text.is_empty() => text,
            _ => self.default_message.clone(),
        }
    }
}

impl Default for LoadingReducer {
    fn default() -> Self {
        Self::new(DEFAULT_LOADING_MESSAGE)
    }
}

impl Reducer for LoadingReducer {
    type Context = LoadingContext;
    type Event = LoadingEvent;
    const NAME: &'static str = "loading";

    fn reduce(&self, context: &LoadingContext, event: LoadingEvent) -> LoadingContext {
        let mut next = context.clone();
        match event {
            LoadingEvent::StartGlobalLoading(message) => {
                next.global_loading = true;
                next.messages.insert(
                    GLOBAL_MESSAGE_KEY.to_string(),
                    self.message_or_default(message),
                );
            }
            LoadingEvent::StopGlobalLoading => {
                next.global_loading = false;
                next.messages
                    .insert(GLOBAL_MESSAGE_KEY.to_string(), String::new());
            }
            LoadingEvent::StartOperation { key, message } => {
                if key == GLOBAL_MESSAGE_KEY {
                    tracing::warn!(
                        key = %key,
                        "operation key shares the global loading message slot"
                    );
                }
                tracing::debug!(key = %key, "operation started");
                next.operations.insert(key.clone(), true);
                next.messages.insert(key, self.message_or_default(message));
            }
            LoadingEvent::StopOperation(key) => {
                let had_flag = next.operations.shift_remove(&key).is_some();
                let had_message = next.messages.shift_remove(&key).is_some();
                if had_flag || had_message {
                    tracing::debug!(key = %key, "operation stopped");
                }
            }
            LoadingEvent::ClearAllOperations => {
                next.operations.clear();
                next.messages.clear();
            }
        }
        next
    }
}

/// Store of global and per-operation busy state.
///
/// An operation stays active until its `STOP_OPERATION` arrives; the store
/// has no timeout of its own.
pub struct LoadingStore {
    inner: Store<LoadingReducer>,
}

impl LoadingStore {
    /// Idle store that fills missing messages with `default_message`.
    pub fn new(default_message: impl Into<String>) -> Self {
        Self {
            inner: Store::new(
                LoadingReducer::new(default_message),
                LoadingContext::default(),
            ),
        }
    }

    /// Turn global loading on.
    pub fn start_global(&self, message: Option<String>) -> Arc<LoadingContext> {
        self.inner.dispatch(LoadingEvent::StartGlobalLoading(message))
    }

    /// Turn global loading off.
    pub fn stop_global(&self) -> Arc<LoadingContext> {
        self.inner.dispatch(LoadingEvent::StopGlobalLoading)
    }

    /// Mark `key` as in flight.
    pub fn start_operation(
        &self,
        key: impl Into<String>,
        message: Option<String>,
    ) -> Arc<LoadingContext> {
        self.inner.dispatch(LoadingEvent::StartOperation {
            key: key.into(),
            message,
        })
    }

    /// Forget `key`.
    pub fn stop_operation(&self, key: impl Into<String>) -> Arc<LoadingContext> {
        self.inner.dispatch(LoadingEvent::StopOperation(key.into()))
    }

    /// Forget every keyed operation.
    pub fn clear_all_operations(&self) -> Arc<LoadingContext> {
        self.inner.dispatch(LoadingEvent::ClearAllOperations)
    }

    /// [`super::selectors::is_loading`] over the current snapshot.
    pub fn is_loading(&self, key: Option<&str>) -> bool {
        self.inner
            .read(|ctx| super::selectors::is_loading(Some(ctx), key))
    }

    /// [`super::selectors::loading_message`] over the current snapshot,
    /// using this store's default text.
    pub fn loading_message(&self, key: Option<&str>) -> String {
        let default = self.inner.reducer().default_message();
        self.inner.read(|ctx| {
            super::selectors::loading_message(Some(ctx), key, default).to_string()
        })
    }
}

impl Default for LoadingStore {
    fn default() -> Self {
        Self::new(DEFAULT_LOADING_MESSAGE)
    }
}

impl Deref for LoadingStore {
    type Target = Store<LoadingReducer>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
