//! # Lifecycle Core
//!
//! Dependency-ordered manager registry for a long-running host process.
//!
//! The factory constructs a closed set of managers, refuses to build a
//! dependent manager before its prerequisites are wired, and tears managers
//! down through a uniform disposal contract.
//!
//! ## Dependency Levels
//!
//! ```text
//! Level 0: logging, config, error-boundary, process, webview, command-palette
//! Level 1: analytics, ai-assistant          (need logging + config)
//! ```
//!
//! ## Wiring
//!
//! ```text
//!  create_manager(logging) ──publish──► FactoryConfig.logging_manager ─┐
//!  create_manager(config)  ──publish──► FactoryConfig.config_service  ─┤
//!                                                                       ▼
//!                          create_manager(analytics) reads both slots
//! ```
//!
//! `create_manager_with` takes the dependency set explicitly; `create_manager`
//! is the convenience form that reads the published slots.

pub mod config;
pub mod error;
pub mod factory;
pub mod kind;
pub mod manager;

pub use config::FactoryConfig;
pub use error::FactoryError;
pub use factory::{FactoryOptions, ManagerFactory};
pub use kind::ManagerKind;
pub use manager::{
    downcast_manager, AsAnyArc, HostContext, Manager, ManagerDependencies, ManagerProvider,
};
