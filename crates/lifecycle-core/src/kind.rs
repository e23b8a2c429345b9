//! # Manager Kinds
//!
//! The closed set of manager kinds the factory knows how to build.
//!
//! ```text
//! Level 0: logging, config, error-boundary, process, webview, command-palette
//! Level 1: analytics, ai-assistant   (require logging + config)
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::FactoryError;

/// Manager kind identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ManagerKind {
    /// Output channel and log history.
    Logging,
    /// Settings store.
    Config,
    /// Error capture around guarded work.
    ErrorBoundary,
    /// Child process supervision.
    Process,
    /// Web panels.
    WebView,
    /// Named command handlers.
    CommandPalette,
    /// Usage counters (requires logging + config).
    Analytics,
    /// Assistant request queue (requires logging + config).
    AiAssistant,
}

impl ManagerKind {
    /// Number of manager kinds.
    pub const COUNT: usize = 8;

    /// Bring-up order for the standard manager set.
    ///
    /// Every kind appears after all of its dependencies.
    pub const STANDARD_ORDER: [ManagerKind; Self::COUNT] = [
        Self::Logging,
        Self::Config,
        Self::ErrorBoundary,
        Self::Process,
        Self::WebView,
        Self::CommandPalette,
        Self::Analytics,
        Self::AiAssistant,
    ];

    /// Get the manager kind name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Logging => "logging",
            Self::Config => "config",
            Self::ErrorBoundary => "error-boundary",
            Self::Process => "process",
            Self::WebView => "webview",
            Self::CommandPalette => "command-palette",
            Self::Analytics => "analytics",
            Self::AiAssistant => "ai-assistant",
        }
    }

    /// Human-readable label used in dependency errors.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Logging => "Logging manager",
            Self::Config => "Config service",
            Self::ErrorBoundary => "Error boundary",
            Self::Process => "Process manager",
            Self::WebView => "WebView manager",
            Self::CommandPalette => "Command palette manager",
            Self::Analytics => "Analytics manager",
            Self::AiAssistant => "AI Assistant manager",
        }
    }

    /// Get manager dependencies.
    /// Returns kinds that MUST already be wired before this one is built.
    #[must_use]
    pub fn dependencies(&self) -> &'static [ManagerKind] {
        match self {
            Self::Analytics | Self::AiAssistant => &[Self::Logging, Self::Config],
            Self::Logging
            | Self::Config
            | Self::ErrorBoundary
            | Self::Process
            | Self::WebView
            | Self::CommandPalette => &[],
        }
    }

    /// Position in [`Self::STANDARD_ORDER`].
    ///
    /// Variants are declared in bring-up order.
    #[must_use]
    pub const fn bring_up_rank(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ManagerKind {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::STANDARD_ORDER
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FactoryError::UnknownManagerKind(s.to_string()))
    }
}
