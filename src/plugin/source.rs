//! Plugin source types
//!
//! A plugin group declares the commands it provides through an explicit
//! export hook. Nothing is discovered by reflection: a group is registered
//! from exactly the [`Export`]s its hook returns.

use std::fmt;
use std::rc::Rc;

use crate::command::Command;
use crate::storage::Config;

/// Where a plugin comes from and whether it can be loaded as a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    /// Group name; also the name its command is registered under
    pub location_name: String,

    /// Only groups are loaded; plain entries are skipped during discovery
    pub is_group: bool,
}

impl SourceDescriptor {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            location_name: name.into(),
            is_group: true,
        }
    }

    pub fn entry(name: impl Into<String>) -> Self {
        Self {
            location_name: name.into(),
            is_group: false,
        }
    }
}

/// A command exported by a plugin group
#[derive(Clone)]
pub struct Export {
    /// Exported type name, used for logging and for ordering sub-menus
    pub name: String,

    pub command: Rc<dyn Command>,
}

impl Export {
    pub fn new(name: impl Into<String>, command: impl Command + 'static) -> Self {
        Self {
            name: name.into(),
            command: Rc::new(command),
        }
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Export").field("name", &self.name).finish()
    }
}

/// What a plugin may use while building its commands
#[derive(Debug, Clone, Copy)]
pub struct PluginEnv<'a> {
    pub config: &'a Config,
}

impl<'a> PluginEnv<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// A loadable plugin location
pub trait PluginSource {
    fn descriptor(&self) -> SourceDescriptor;

    /// Builds every command this plugin provides.
    ///
    /// An error marks the whole group as failed; discovery logs it and moves
    /// on to the next group.
    fn exports(&self, env: &PluginEnv<'_>) -> anyhow::Result<Vec<Export>>;
}

/// Signature of a compiled-in group's export hook
pub type ExportHook = fn(&PluginEnv<'_>) -> anyhow::Result<Vec<Export>>;

/// A compiled-in plugin group backed by a plain function
#[derive(Clone, Copy)]
pub struct StaticGroup {
    name: &'static str,
    hook: ExportHook,
}

impl StaticGroup {
    pub const fn new(name: &'static str, hook: ExportHook) -> Self {
        Self { name, hook }
    }
}

impl PluginSource for StaticGroup {
    fn descriptor(&self) -> SourceDescriptor {
        SourceDescriptor::group(self.name)
    }

    fn exports(&self, env: &PluginEnv<'_>) -> anyhow::Result<Vec<Export>> {
        (self.hook)(env)
    }
}

/// An ordered set of plugin sources, enumerated in declaration order
pub struct PluginRoot {
    name: String,
    sources: Vec<Box<dyn PluginSource>>,
}

impl PluginRoot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
        }
    }

    /// Appends a source (builder form)
    pub fn with_source(mut self, source: impl PluginSource + 'static) -> Self {
        self.push(source);
        self
    }

    pub fn push(&mut self, source: impl PluginSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sources(&self) -> &[Box<dyn PluginSource>] {
        &self.sources
    }
}

impl fmt::Debug for PluginRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self
            .sources
            .iter()
            .map(|s| s.descriptor().location_name)
            .collect();
        f.debug_struct("PluginRoot")
            .field("name", &self.name)
            .field("sources", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Echo;

    fn two_exports(_env: &PluginEnv<'_>) -> anyhow::Result<Vec<Export>> {
        Ok(vec![Export::new("First", Echo("1")), Export::new("Second", Echo("2"))])
    }

    #[test]
    fn static_group_descriptor() {
        let group = StaticGroup::new("greet", two_exports);
        assert_eq!(group.descriptor(), SourceDescriptor::group("greet"));
        assert!(group.descriptor().is_group);
        assert!(!SourceDescriptor::entry("notes").is_group);
    }

    #[test]
    fn static_group_runs_hook() {
        let config = Config::default();
        let exports = StaticGroup::new("greet", two_exports)
            .exports(&PluginEnv::new(&config))
            .unwrap();

        let names: Vec<_> = exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn root_keeps_declaration_order() {
        let root = PluginRoot::new("plugins")
            .with_source(StaticGroup::new("zeta", two_exports))
            .with_source(StaticGroup::new("alpha", two_exports));

        let names: Vec<_> = root
            .sources()
            .iter()
            .map(|s| s.descriptor().location_name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(root.name(), "plugins");
    }
}
