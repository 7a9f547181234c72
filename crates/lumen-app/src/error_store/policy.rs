//! Recoverability classification.
//!
//! Whether an error of a given category may be dismissed without ending the
//! surrounding flow is a UX decision, so it is data here rather than code.
//! The default classification treats network, validation and cart errors as
//! recoverable and checkout, general and auth errors as not.

use super::record::{ErrorCategory, ErrorPayload};
use serde::{Deserialize, Serialize};

/// Per-category default for [`ErrorPayload::recoverable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoverabilityPolicy {
    /// Default for [`ErrorCategory::Network`].
    pub network: bool,
    /// Default for [`ErrorCategory::Validation`].
    pub validation: bool,
    /// Default for [`ErrorCategory::Cart`].
    pub cart: bool,
    /// Default for [`ErrorCategory::Checkout`].
    pub checkout: bool,
    /// Default for [`ErrorCategory::General`].
    pub general: bool,
    /// Default for [`ErrorCategory::Auth`].
    pub auth: bool,
}

impl Default for RecoverabilityPolicy {
    fn default() -> Self {
        Self {
            network: true,
            validation: true,
            cart: true,
            checkout: false,
            general: false,
            auth: false,
        }
    }
}

impl RecoverabilityPolicy {
    /// Default recoverability for `category`.
    #[must_use]
    pub fn is_recoverable(&self, category: ErrorCategory) -> bool {
        match category {
            ErrorCategory::Network => self.network,
            ErrorCategory::Validation => self.validation,
            ErrorCategory::Cart => self.cart,
            ErrorCategory::Checkout => self.checkout,
            ErrorCategory::General => self.general,
            ErrorCategory::Auth => self.auth,
        }
    }

    /// Change the default for one category.
    #[must_use]
    pub fn with(mut self, category: ErrorCategory, recoverable: bool) -> Self {
        let slot = match category {
            ErrorCategory::Network => &mut self.network,
            ErrorCategory::Validation => &mut self.validation,
            ErrorCategory::Cart => &mut self.cart,
            ErrorCategory::Checkout => &mut self.checkout,
            ErrorCategory::General => &mut self.general,
            ErrorCategory::Auth => &mut self.auth,
        };
        *slot = recoverable;
        self
    }

    /// Fill in `recoverable` when the payload left it unset.
    pub fn classify(&self, mut payload: ErrorPayload) -> ErrorPayload {
        if payload.recoverable.is_none() {
            payload.recoverable = Some(self.is_recoverable(payload.category));
        }
        payload
    }

    /// Payload tagged with `category` and this policy's default.
    pub fn payload(&self, category: ErrorCategory, message: impl Into<String>) -> ErrorPayload {
        ErrorPayload::new(category, message).with_recoverable(self.is_recoverable(category))
    }
}

// Convenience constructors under the default policy.

/// Network error, recoverable by default.
pub fn network_error(message: impl Into<String>) -> ErrorPayload {
    RecoverabilityPolicy::default().payload(ErrorCategory::Network, message)
}

/// Validation error, recoverable by default.
pub fn validation_error(message: impl Into<String>) -> ErrorPayload {
    RecoverabilityPolicy::default().payload(ErrorCategory::Validation, message)
}

/// Cart error, recoverable by default.
pub fn cart_error(message: impl Into<String>) -> ErrorPayload {
    RecoverabilityPolicy::default().payload(ErrorCategory::Cart, message)
}

/// Checkout error, not recoverable by default.
pub fn checkout_error(message: impl Into<String>) -> ErrorPayload {
    RecoverabilityPolicy::default().payload(ErrorCategory::Checkout, message)
}

/// General error, not recoverable by default.
pub fn general_error(message: impl Into<String>) -> ErrorPayload {
    RecoverabilityPolicy::default().payload(ErrorCategory::General, message)
}

/// Authentication error, not recoverable by default.
pub fn auth_error(message: impl Into<String>) -> ErrorPayload {
    RecoverabilityPolicy::default().payload(ErrorCategory::Auth, message)
}
