//! Error records tracked by the error store.
//!
//! These are domain data shown to the user, not failures of the store itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Categories
// ============================================================================

/// Closed set of error categories a frontend knows how to present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Connectivity problems (often transient)
    Network,
    /// User input rejected (correctable by the user)
    Validation,
    /// Cart manipulation failed
    Cart,
    /// Checkout flow failed
    Checkout,
    /// Catch-all
    General,
    /// Authentication or session problems
    Auth,
}

impl ErrorCategory {
    /// Every category, in declaration order.
    pub const ALL: [ErrorCategory; 6] = [
        Self::Network,
        Self::Validation,
        Self::Cart,
        Self::Checkout,
        Self::General,
        Self::Auth,
    ];

    /// Wire name of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Validation => "validation",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::General => "general",
            Self::Auth => "auth",
        }
    }

    /// Short human label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Validation => "Validation",
            Self::Cart => "Cart",
            Self::Checkout => "Checkout",
            Self::General => "Error",
            Self::Auth => "Sign-in",
        }
    }

    /// Whether errors in this category may clear up on retry without any
    /// user action.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error category: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for ErrorCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque identifier of an [`ErrorRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorId(String);

impl ErrorId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for ErrorId {
    fn from(uuid: Uuid) -> Self {
        Self(format!("error_{}", uuid.simple()))
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Remedial actions
// ============================================================================

/// Shared callback run when the user picks an error's remedial action.
///
/// Compares by identity: two handlers are equal only if they are clones of
/// the same callback. Not serialized; a deserialized action carries a no-op.
#[derive(Clone)]
pub struct ActionHandler(Arc<dyn Fn() + Send + Sync>);

impl ActionHandler {
    /// Wrap a callback.
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Run the callback.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl Default for ActionHandler {
    fn default() -> Self {
        Self::new(|| {})
    }
}

impl PartialEq for ActionHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ActionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionHandler(..)")
    }
}

/// A single remedial action offered alongside an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorAction {
    /// Button text.
    pub label: String,
    /// Callback run when the action is picked.
    #[serde(skip)]
    pub handler: ActionHandler,
}

impl ErrorAction {
    /// Create an action with a label and callback.
    pub fn new(label: impl Into<String>, handler: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            handler: ActionHandler::new(handler),
        }
    }

    /// Run the action's callback.
    pub fn run(&self) {
        self.handler.invoke();
    }
}

// ============================================================================
// Records
// ============================================================================

/// Everything about an error except the fields the store generates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Category, serialized as `type`.
    #[serde(rename = "type", alias = "category")]
    pub category: ErrorCategory,
    /// Text shown to the user.
    pub message: String,
    /// Supplementary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Left unset, the store's recoverability policy decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoverable: Option<bool>,
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Remedial action offered with the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ErrorAction>,
}

impl ErrorPayload {
    /// A payload with only category and message set.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            details: None,
            recoverable: None,
            code: None,
            action: None,
        }
    }

    /// Attach supplementary text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach a machine-readable code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a remedial action.
    #[must_use]
    pub fn with_action(mut self, action: ErrorAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Override the recoverability policy for this error.
    #[must_use]
    pub fn with_recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = Some(recoverable);
        self
    }

    /// Complete the payload into a record.
    pub fn into_record(self, id: ErrorId, timestamp: u64) -> ErrorRecord {
        ErrorRecord {
            id,
            category: self.category,
            message: self.message,
            details: self.details,
            timestamp,
            recoverable: self.recoverable,
            code: self.code,
            action: self.action,
        }
    }
}

/// A structured error condition shown to the user.
///
/// Records are immutable once created; the store replaces or drops them but
/// never edits one in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Unique within the store that created it.
    pub id: ErrorId,
    /// Category, serialized as `type`.
    #[serde(rename = "type", alias = "category")]
    pub category: ErrorCategory,
    /// Text shown to the user.
    pub message: String,
    /// Supplementary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Whether the user can dismiss the error and carry on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoverable: Option<bool>,
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Remedial action offered with the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ErrorAction>,
}

impl ErrorRecord {
    /// Whether the record may be dismissed without ending the surrounding
    /// flow. Unset counts as not recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.recoverable.unwrap_or(false)
    }
}
