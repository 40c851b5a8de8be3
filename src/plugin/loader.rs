//! Plugin discovery and loading
//!
//! Plugins are discovered from one or more [`PluginRoot`]s, in the order each
//! root enumerates its sources. A group that fails to load is logged and
//! skipped; the rest still register.

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use anyhow::{anyhow, Result};

use super::builtin::MenuCommand;
use super::source::{Export, PluginEnv, PluginRoot, PluginSource};
use crate::command::{panic_message, Registry};

/// Name the synthetic menu command is registered under
pub const MENU_COMMAND: &str = "menu";

/// Groups never loaded by discovery
///
/// The menu needs the finished registry, so it is appended afterwards
/// instead of being discovered.
pub const RESERVED_GROUPS: &[&str] = &[MENU_COMMAND];

/// Outcome of a discovery pass
#[derive(Debug)]
pub struct Discovery {
    /// Every registered command, menu last
    pub registry: Rc<Registry>,

    /// Groups whose loading failed
    pub failed: Vec<String>,

    /// Sources passed over: plain entries, reserved and disabled groups
    pub skipped: Vec<String>,
}

/// Plugin discoverer
#[derive(Debug, Default)]
pub struct PluginLoader {
    /// Plugin roots, searched in order
    roots: Vec<PluginRoot>,

    /// Group names excluded by configuration
    disabled: Vec<String>,
}

impl PluginLoader {
    /// Creates a new plugin loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plugin root to search
    pub fn add_root(&mut self, root: PluginRoot) {
        self.roots.push(root);
    }

    /// Excludes a group from discovery
    pub fn disable(&mut self, name: impl Into<String>) {
        self.disabled.push(name.into());
    }

    /// Loads every eligible group and builds the command registry
    pub fn discover(&self, env: &PluginEnv<'_>) -> Discovery {
        let mut registry = Registry::new();
        let mut failed = Vec::new();
        let mut skipped = Vec::new();

        for root in &self.roots {
            tracing::debug!("Scanning plugin root: {}", root.name());

            for source in root.sources() {
                let descriptor = source.descriptor();
                let name = descriptor.location_name;
                tracing::info!("Found plugin: {}", name);

                if !descriptor.is_group || RESERVED_GROUPS.contains(&name.as_str()) {
                    tracing::debug!("Skipping plugin source: {}", name);
                    skipped.push(name);
                    continue;
                }

                if self.disabled.iter().any(|d| d == &name) {
                    tracing::info!("Plugin {} disabled by configuration", name);
                    skipped.push(name);
                    continue;
                }

                match Self::load_group(source.as_ref(), env) {
                    Ok(exports) => {
                        // Several exports share the group name: last one wins
                        for export in exports {
                            tracing::info!("Registered command: {} ({})", name, export.name);
                            registry.register(name.clone(), export.command);
                        }
                    }
                    Err(err) => {
                        tracing::error!("Error loading plugin {}: {:#}", name, err);
                        failed.push(name);
                    }
                }
            }
        }

        Discovery {
            registry: bind_menu(registry),
            failed,
            skipped,
        }
    }

    /// Runs a group's export hook, turning a panic into a load error
    fn load_group(source: &dyn PluginSource, env: &PluginEnv<'_>) -> Result<Vec<Export>> {
        panic::catch_unwind(AssertUnwindSafe(|| source.exports(env))).unwrap_or_else(|payload| {
            Err(anyhow!(
                "plugin panicked while loading: {}",
                panic_message(payload.as_ref())
            ))
        })
    }
}

/// Appends the menu command, bound to the registry it is part of
pub fn bind_menu(registry: Registry) -> Rc<Registry> {
    Rc::new_cyclic(move |this| {
        let mut registry = registry;
        registry.register(MENU_COMMAND, Rc::new(MenuCommand::new(this.clone())));
        registry
    })
}
