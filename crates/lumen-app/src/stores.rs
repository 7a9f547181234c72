//! The three stores a frontend usually wants, built from one config.
//!
//! `UiStores` only constructs and holds the stores. It never forwards events
//! between them; each is dispatched to and read independently.

use crate::config::AppConfig;
use crate::display_mode::DisplayModeStore;
use crate::error_store::ErrorStore;
use crate::loading::LoadingStore;
use lumen_core::{IdGenerator, PhysicalClock, RandomIds, SystemClock};
use std::sync::Arc;

/// Error, loading and display mode stores sharing one configuration.
pub struct UiStores {
    /// Error records and connectivity.
    pub errors: ErrorStore,
    /// Busy state.
    pub loading: LoadingStore,
    /// Dark/light preference.
    pub display: DisplayModeStore,
}

impl UiStores {
    /// Build with the system clock and random ids.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_effects(
            config,
            Arc::new(SystemClock::new()),
            Arc::new(RandomIds::new()),
        )
    }

    /// Build with explicit effect handlers.
    pub fn with_effects(
        config: &AppConfig,
        clock: Arc<dyn PhysicalClock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            errors: ErrorStore::builder()
                .online(config.errors.initially_online)
                .policy(config.errors.recoverable)
                .clock(clock)
                .ids(ids)
                .build(),
            loading: LoadingStore::new(config.loading.default_message.clone()),
            display: DisplayModeStore::new(config.display),
        }
    }
}

impl Default for UiStores {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_store::{ErrorCategory, ErrorPayload};
    use lumen_testkit::{ManualClock, SequentialIds};

    #[test]
    fn test_config_seeds_every_store() {
        let config = AppConfig::from_toml_str(
            r#"
            [loading]
            default_message = "Wait"
            [errors]
            initially_online = false
            [errors.recoverable]
            network = false
            [display]
            system_preference = true
            "#,
        )
        .unwrap();

        let stores = UiStores::with_effects(
            &config,
            Arc::new(ManualClock::at(42)),
            Arc::new(SequentialIds::new()),
        );

        assert_eq!(*stores.errors.reducer().policy(), config.errors.recoverable);
        assert!(!stores.errors.snapshot().is_online);
        assert!(stores.display.snapshot().system_preference);
        assert_eq!(stores.loading.start_global(None).messages["global"], "Wait");

        stores
            .errors
            .add_error(ErrorPayload::new(ErrorCategory::Network, "x"));
        let snapshot = stores.errors.snapshot();
        let record = &snapshot.errors[0];
        assert_eq!(record.recoverable, Some(false));
        assert_eq!(record.timestamp, 42);
    }

    #[test]
    fn test_stores_do_not_affect_each_other() {
        let stores = UiStores::default();
        stores.loading.start_operation("fetch", None);
        stores.display.toggle();

        assert_eq!(stores.errors.version(), 0);
        assert_eq!(stores.loading.version(), 1);
        assert_eq!(stores.display.version(), 1);
    }
}
