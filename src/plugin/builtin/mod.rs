//! Built-in plugin groups
//!
//! Each group is a module exposing an `exports` hook. [`catalog`] lists them
//! in menu order.

mod calculator;
mod exit;
mod goodbye;
mod greet;
mod history;
mod menu;
mod openai;
mod tabular;

pub use menu::MenuCommand;

use super::source::{PluginRoot, StaticGroup};

/// Name of the built-in plugin root
pub const ROOT_NAME: &str = "plugshell.plugins";

/// The built-in plugin root, in menu order
pub fn catalog() -> PluginRoot {
    PluginRoot::new(ROOT_NAME)
        .with_source(StaticGroup::new("calculator", calculator::exports))
        .with_source(StaticGroup::new("csv", tabular::exports))
        .with_source(StaticGroup::new("exit", exit::exports))
        .with_source(StaticGroup::new("goodbye", goodbye::exports))
        .with_source(StaticGroup::new("greet", greet::exports))
        .with_source(StaticGroup::new("history", history::exports))
        .with_source(StaticGroup::new("menu", menu::exports))
        .with_source(StaticGroup::new("openai", openai::exports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{PluginEnv, PluginLoader};
    use crate::storage::Config;

    #[test]
    fn catalog_registers_every_group_in_order() {
        let config = Config::default();
        let mut loader = PluginLoader::new();
        loader.add_root(catalog());

        let discovery = loader.discover(&PluginEnv::new(&config));
        let names: Vec<_> = discovery.registry.names().collect();

        assert_eq!(
            names,
            vec!["calculator", "csv", "exit", "goodbye", "greet", "history", "openai", "menu"]
        );
        assert!(discovery.failed.is_empty());
    }
}
