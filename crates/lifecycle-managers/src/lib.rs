//! # Lifecycle Managers
//!
//! The standard collaborators built by the manager factory, the
//! exhaustive kind-to-constructor table, and the ordered bring-up that
//! returns typed handles to all of them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lifecycle_managers::{create_standard_managers, WorkspaceContext};
//!
//! let context = WorkspaceContext::new("demo", "/var/lib/demo").into_host_context();
//! let managers = create_standard_managers(context).await?;
//! managers.logging_manager.info("ready");
//! managers.shutdown().await?;
//! ```

pub mod bringup;
pub mod context;
pub mod error;
pub mod managers;
pub mod provider;

pub use bringup::{create_standard_managers, StandardManagers};
pub use context::WorkspaceContext;
pub use error::ManagerError;
pub use managers::*;
pub use provider::StandardProvider;
