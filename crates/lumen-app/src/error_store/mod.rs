//! # Error Store
//!
//! Accumulates structured error records, one global error slot, and the
//! online/offline flag.
//!
//! ```text
//! ADD_ERROR ─┐
//! REMOVE_ERROR ─┤
//! CLEAR_ERRORS ─┼─▶ ErrorReducer ─▶ ErrorContext { errors, global_error, is_online }
//! SET_GLOBAL_ERROR ─┤
//! SET_ONLINE_STATUS ─┘
//! ```
//!
//! The store has a single state. Ids and timestamps come from injected
//! effects; `recoverable` falls back to a configurable
//! [`RecoverabilityPolicy`].

mod policy;
mod record;
pub mod selectors;
mod store;

pub use policy::{
    auth_error, cart_error, checkout_error, general_error, network_error, validation_error,
    RecoverabilityPolicy,
};
pub use record::{
    ActionHandler, ErrorAction, ErrorCategory, ErrorId, ErrorPayload, ErrorRecord,
    UnknownCategory,
};
pub use store::{ErrorContext, ErrorEvent, ErrorReducer, ErrorStore, ErrorStoreBuilder};
