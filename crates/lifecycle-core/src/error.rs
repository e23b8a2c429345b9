//! Error types for the manager factory.

use thiserror::Error;

use crate::kind::ManagerKind;

/// Manager factory error type.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// The requested kind is not part of the closed kind set.
    #[error("Unknown manager type: {0}")]
    UnknownManagerKind(String),

    /// A prerequisite manager has not been wired yet.
    #[error("{} requires logging and config services", .kind.label())]
    MissingDependency {
        /// Kind being constructed
        kind: ManagerKind,
        /// Prerequisites absent at construction time
        missing: Vec<ManagerKind>,
    },

    /// The kind-specific constructor failed.
    #[error("Failed to construct {kind} manager: {source}")]
    ConstructionFailure {
        kind: ManagerKind,
        #[source]
        source: anyhow::Error,
    },

    /// A manager's dispose operation failed. The registry entry is retained.
    #[error("Failed to dispose {kind} manager: {source}")]
    DisposalFailure {
        kind: ManagerKind,
        #[source]
        source: anyhow::Error,
    },

    /// One or more disposals failed during bulk teardown.
    #[error("Failed to dispose managers: {}", format_kinds(.failures))]
    AggregateDisposal {
        /// Failed kinds with their causes, in teardown order
        failures: Vec<(ManagerKind, anyhow::Error)>,
    },

    /// A registered instance is not of the concrete type the caller expects.
    #[error("Manager {kind} has an unexpected concrete type")]
    TypeMismatch { kind: ManagerKind },
}

impl FactoryError {
    /// Kinds named by this error.
    #[must_use]
    pub fn failed_kinds(&self) -> Vec<ManagerKind> {
        match self {
            Self::UnknownManagerKind(_) => Vec::new(),
            Self::MissingDependency { kind, .. }
            | Self::ConstructionFailure { kind, .. }
            | Self::DisposalFailure { kind, .. }
            | Self::TypeMismatch { kind } => vec![*kind],
            Self::AggregateDisposal { failures } => failures.iter().map(|(k, _)| *k).collect(),
        }
    }

    /// Short label for metrics.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownManagerKind(_) => "unknown_kind",
            Self::MissingDependency { .. } => "missing_dependency",
            Self::ConstructionFailure { .. } => "construction",
            Self::DisposalFailure { .. } | Self::AggregateDisposal { .. } => "disposal",
            Self::TypeMismatch { .. } => "type_mismatch",
        }
    }
}

fn format_kinds(failures: &[(ManagerKind, anyhow::Error)]) -> String {
    failures
        .iter()
        .map(|(kind, _)| kind.name())
        .collect::<Vec<_>>()
        .join(", ")
}
