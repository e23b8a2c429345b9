//! # Process Manager
//!
//! Owns named child processes. Every child is spawned with
//! `kill_on_drop`, and disposal kills and reaps whatever is still running.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use lifecycle_core::{Manager, ManagerKind};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::ManagerError;

/// Child process supervisor.
pub struct ProcessManager {
    working_dir: PathBuf,
    children: Mutex<HashMap<String, Child>>,
}

impl ProcessManager {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            children: Mutex::new(HashMap::new()),
        }
    }

    /// Spawn `program` under `name`. Returns the OS pid when available.
    pub async fn spawn(
        &self,
        name: &str,
        program: &str,
        args: &[&str],
    ) -> Result<Option<u32>, ManagerError> {
        let mut children = self.children.lock().await;
        reap_exited(&mut children);
        if children.contains_key(name) {
            return Err(ManagerError::ProcessExists(name.to_string()));
        }

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if self.working_dir.is_dir() {
            command.current_dir(&self.working_dir);
        }

        let child = command.spawn().map_err(|source| ManagerError::Spawn {
            name: name.to_string(),
            source,
        })?;
        let pid = child.id();
        info!(manager = "process", name, pid = ?pid, "Process spawned");
        children.insert(name.to_string(), child);
        Ok(pid)
    }

    /// Names of children that are still running.
    pub async fn running(&self) -> Vec<String> {
        let mut children = self.children.lock().await;
        reap_exited(&mut children);
        let mut names: Vec<_> = children.keys().cloned().collect();
        names.sort();
        names
    }

    /// Kill one child and wait for it to exit.
    pub async fn kill(&self, name: &str) -> Result<(), ManagerError> {
        let mut child = self
            .children
            .lock()
            .await
            .remove(name)
            .ok_or_else(|| ManagerError::UnknownProcess(name.to_string()))?;
        if let Err(e) = child.kill().await {
            warn!(manager = "process", name, error = %e, "Kill failed");
        }
        Ok(())
    }
}

/// Drop children that already exited on their own.
fn reap_exited(children: &mut HashMap<String, Child>) {
    children.retain(|name, child| match child.try_wait() {
        Ok(Some(status)) => {
            debug!(manager = "process", name = %name, %status, "Process exited");
            false
        }
        Ok(None) => true,
        Err(_) => false,
    });
}

#[async_trait]
impl Manager for ProcessManager {
    fn kind(&self) -> ManagerKind {
        ManagerKind::Process
    }

    async fn dispose(&self) -> anyhow::Result<()> {
        let children: Vec<_> = self.children.lock().await.drain().collect();
        let mut failed = Vec::new();

        for (name, mut child) in children {
            if let Err(e) = child.kill().await {
                // Already-exited children report InvalidInput; nothing to release.
                if e.kind() != std::io::ErrorKind::InvalidInput {
                    warn!(manager = "process", name = %name, error = %e, "Kill failed during dispose");
                    failed.push(name);
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("failed to kill processes: {}", failed.join(", "))
        }
    }
}
