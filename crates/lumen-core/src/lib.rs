//! # Lumen Core
//!
//! Foundation layer for Lumen's UI concern stores. Contains no domain types:
//!
//! - [`reactive`]: versioned cells and poll-based subscriptions
//! - [`store`]: the [`Reducer`] trait and the serialized [`Store`] dispatcher
//! - [`effects`]: injected clock and id generation
//!
//! Domain stores (errors, loading, display mode) live in `lumen-app`.

pub mod effects;
pub mod reactive;
pub mod store;

pub use effects::{IdGenerator, MonotonicClock, PhysicalClock, RandomIds, SystemClock};
pub use reactive::{Dynamic, DynamicLink, Subscription};
pub use store::{Reducer, Store, StoreEvent};
