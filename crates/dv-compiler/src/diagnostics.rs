use std::fmt;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The graph is unusable where this applies.
    Error,
    /// The graph was repaired on a best-effort basis.
    Warning,
}

/// A diagnostic message about the input document.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious the anomaly is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// What the message is about ("rect 4", "note 2").
    pub label: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            label: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a subject label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.label {
            Some(label) => write!(f, "{prefix}: {label}: {}", self.message),
            None => write!(f, "{prefix}: {}", self.message),
        }
    }
}
