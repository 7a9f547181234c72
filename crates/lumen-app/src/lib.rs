//! # Lumen App
//!
//! Headless stores for cross-cutting UI concerns:
//!
//! - [`error_store`]: user-facing error records, a global error slot, and
//!   connectivity
//! - [`loading`]: global and per-operation busy state with messages
//! - [`display_mode`]: dark/light preference next to the system preference
//!
//! Each store is an independent [`lumen_core::Store`]: events go in through
//! `dispatch`, immutable snapshots come out through `snapshot`/`subscribe`,
//! and each module's `selectors` derive values from a snapshot. Rendering is
//! left to the frontend.
//!
//! ```rust
//! use lumen_app::error_store::{network_error, selectors};
//! use lumen_app::ErrorStore;
//!
//! let store = ErrorStore::new(true);
//! store.add_error(network_error("offline"));
//!
//! let snapshot = store.snapshot();
//! assert_eq!(selectors::errors(Some(&*snapshot)).len(), 1);
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod display_mode;
pub mod error_store;
pub mod loading;
mod stores;

pub use config::{AppConfig, ConfigError, ErrorsConfig, LoadingConfig};
pub use display_mode::{
    DisplayModeContext, DisplayModeEvent, DisplayModeSeed, DisplayModeStore,
};
pub use error_store::{
    ErrorCategory, ErrorContext, ErrorEvent, ErrorId, ErrorPayload, ErrorRecord, ErrorStore,
    RecoverabilityPolicy,
};
pub use loading::{LoadingContext, LoadingEvent, LoadingStore};
pub use stores::UiStores;
