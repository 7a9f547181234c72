//! # Reactive Primitives
//!
//! Versioned cells that stores publish their snapshots through.
//!
//! ## Core Types
//!
//! - [`Dynamic<T>`]: A reactive value that can be observed for changes.
//!   Every `set()` bumps a version counter.
//!
//! - [`Subscription<T>`]: A polling-based subscription to a `Dynamic<T>`.
//!   Tracks the last version it observed, so rapid updates coalesce.
//!
//! - [`DynamicLink`]: Sync propagation from a source cell into a derived
//!   cell produced by [`Dynamic::map`].
//!
//! ## Design Principles
//!
//! 1. **Runtime-agnostic**: only lock + atomic primitives, no executor.
//! 2. **Poll-based subscriptions**: consumers pull changes when they render.
//! 3. **Composable**: derived cells via `map()` and `DynamicLink::propagate`.
//!
//! ## Usage
//!
//! ```rust
//! use lumen_core::reactive::Dynamic;
//!
//! let counter = Dynamic::new(0);
//! let mut sub = counter.subscribe();
//!
//! counter.set(1);
//! assert_eq!(sub.poll(), Some(1));
//! assert_eq!(sub.poll(), None);
//! ```

mod dynamic;

pub use dynamic::{Dynamic, DynamicLink, Subscription};
