use std::path::PathBuf;

use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure for a single entity (device, topology).
/// Carries every violation found, not just the first one.
#[derive(Debug, Error)]
#[error("validation failed for {entity}: {}", join_violations(.violations))]
pub struct ValidationError {
    pub entity: String,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(entity: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            entity: entity.into(),
            violations,
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure raised by a template engine behind the `TemplateEngine` seam
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("template '{0}' not found")]
    NotFound(String),
    #[error("{0}")]
    Failed(String),
}

/// Pipeline error taxonomy. Every device-scoped variant names the device.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("schema artifact for device '{device}' is unusable: {source}")]
    Schema {
        device: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("template '{name}' not found under '{root}'")]
    TemplateNotFound { name: String, root: String },

    #[error("render failed for device '{device}': {reason}")]
    Render { device: String, reason: String },
}
