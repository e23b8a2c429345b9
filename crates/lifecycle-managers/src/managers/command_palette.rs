//! # Command Palette Manager
//!
//! Registry of named commands the host can invoke with JSON arguments.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use lifecycle_core::{Manager, ManagerKind};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::ManagerError;

/// Command callback.
pub type CommandHandler = Arc<dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync>;

/// Command registry.
#[derive(Default)]
pub struct CommandPaletteManager {
    commands: RwLock<BTreeMap<String, CommandHandler>>,
}

impl CommandPaletteManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, name: &str, handler: F) -> Result<(), ManagerError>
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let mut commands = self.commands.write();
        if commands.contains_key(name) {
            return Err(ManagerError::CommandExists(name.to_string()));
        }
        commands.insert(name.to_string(), Arc::new(handler));
        debug!(manager = "command-palette", command = name, "Command registered");
        Ok(())
    }

    pub fn unregister(&self, name: &str) -> bool {
        self.commands.write().remove(name).is_some()
    }

    /// Run command `name`. The handler is called without holding the registry lock.
    pub fn execute(&self, name: &str, args: Value) -> anyhow::Result<Value> {
        let handler = self
            .commands
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::UnknownCommand(name.to_string()))?;
        handler(args)
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<String> {
        self.commands.read().keys().cloned().collect()
    }
}

#[async_trait]
impl Manager for CommandPaletteManager {
    fn kind(&self) -> ManagerKind {
        ManagerKind::CommandPalette
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        self.commands.write().clear();
        Ok(())
    }
}
