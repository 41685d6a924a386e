#![forbid(unsafe_code)]

//! Toast content and dismissal policy.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crouton_core::ToastId;
use web_time::Duration;

/// Controls automatic dismissal of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum AutoDismiss {
    /// Remains visible until manually dismissed.
    Never,
    /// Automatically dismisses after the given active (non-paused) duration.
    After(Duration),
}

impl AutoDismiss {
    /// Millisecond constructor for owner-facing inputs.
    ///
    /// Values `<= 0` are a valid "expire immediately" signal, not an error.
    #[must_use]
    pub fn after_millis(ms: i64) -> Self {
        Self::After(Duration::from_millis(ms.max(0) as u64))
    }
}

/// Severity level; determines the default dismissal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Warning that doesn't block operation.
    Warning,
    /// Error requiring attention; stays until dismissed.
    Error,
}

impl Severity {
    /// The default dismissal policy for this severity.
    #[must_use]
    pub fn default_dismiss(self) -> AutoDismiss {
        match self {
            Severity::Info | Severity::Success => AutoDismiss::After(Duration::from_secs(3)),
            Severity::Warning => AutoDismiss::After(Duration::from_secs(5)),
            Severity::Error => AutoDismiss::Never,
        }
    }
}

/// A toast notification's content and dismissal policy.
///
/// Built fluently; an explicit dismissal setting overrides the severity
/// default:
///
/// ```
/// use crouton_runtime::toast::{Severity, Toast};
///
/// let toast = Toast::new("File saved")
///     .severity(Severity::Success)
///     .dismiss_after_millis(1_500);
/// ```
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique identifier, echoed back in the removal callback.
    pub id: ToastId,
    /// Optional short title.
    pub title: Option<String>,
    /// Body text.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Explicit dismissal override; falls back to the severity default.
    dismiss: Option<AutoDismiss>,
}

impl Toast {
    /// Create a toast with a freshly allocated id.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_id(ToastId::alloc(), message)
    }

    /// Create a toast with a caller-chosen id.
    pub fn with_id(id: ToastId, message: impl Into<String>) -> Self {
        Self {
            id,
            title: None,
            message: message.into(),
            severity: Severity::default(),
            dismiss: None,
        }
    }

    /// An info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Info)
    }

    /// A success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Success)
    }

    /// A warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Warning)
    }

    /// An error toast (sticky by default).
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).severity(Severity::Error)
    }

    /// Set a short title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Override auto-dismissal with an explicit duration.
    #[must_use]
    pub fn dismiss_after(mut self, duration: Duration) -> Self {
        self.dismiss = Some(AutoDismiss::After(duration));
        self
    }

    /// Override auto-dismissal with a millisecond duration (`<= 0` expires
    /// immediately).
    #[must_use]
    pub fn dismiss_after_millis(mut self, ms: i64) -> Self {
        self.dismiss = Some(AutoDismiss::after_millis(ms));
        self
    }

    /// Keep the toast until manually dismissed, regardless of severity.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.dismiss = Some(AutoDismiss::Never);
        self
    }

    /// The effective dismissal policy (explicit override, else severity
    /// default).
    #[must_use]
    pub fn dismiss_policy(&self) -> AutoDismiss {
        self.dismiss
            .unwrap_or_else(|| self.severity.default_dismiss())
    }

    /// Content hash over message and title, used for dedup windows.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.message.hash(&mut hasher);
        if let Some(title) = &self.title {
            title.hash(&mut hasher);
        }
        hasher.finish()
    }
}
