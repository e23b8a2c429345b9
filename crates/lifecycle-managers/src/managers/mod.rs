//! # Standard Managers
//!
//! One collaborator per [`lifecycle_core::ManagerKind`]. Each owns the
//! resources its `dispose` releases.
//!
//! | Kind | Type | Requires |
//! |------|------|----------|
//! | `logging` | [`LoggingManager`] | - |
//! | `config` | [`ConfigService`] | - |
//! | `error-boundary` | [`ErrorBoundary`] | - |
//! | `process` | [`ProcessManager`] | - |
//! | `webview` | [`WebViewManager`] | - |
//! | `command-palette` | [`CommandPaletteManager`] | - |
//! | `analytics` | [`AnalyticsService`] | logging, config |
//! | `ai-assistant` | [`AiAssistantService`] | logging, config (analytics optional) |

pub mod ai_assistant;
pub mod analytics;
pub mod command_palette;
pub mod config;
pub mod error_boundary;
pub mod logging;
pub mod process;
pub mod webview;

pub use ai_assistant::{AiAssistantService, AssistantRequest};
pub use analytics::AnalyticsService;
pub use command_palette::{CommandHandler, CommandPaletteManager};
pub use config::ConfigService;
pub use error_boundary::{CapturedError, ErrorBoundary};
pub use logging::{LogLevel, LogRecord, LoggingManager};
pub use process::ProcessManager;
pub use webview::{PanelInfo, WebViewManager};
