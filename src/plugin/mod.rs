//! # Plugin System
//!
//! Discovers commands from plugin roots and builds the command registry.
//!
//! ## Overview
//!
//! A plugin root enumerates sources. Each source describes itself with a
//! [`SourceDescriptor`]; only groups are loaded. A group contributes commands
//! through an explicit export hook ([`PluginSource::exports`]), and every
//! export is registered under the group's name.
//!
//! ## Discovery
//!
//! ```text
//! PluginLoader::discover
//!  ├── for each root, for each source
//!  │    ├── skip entries, reserved and disabled groups
//!  │    ├── exports(env)       (errors and panics isolated per group)
//!  │    └── register(group, export)
//!  └── bind_menu               (menu command appended last)
//! ```
//!
//! ## Built-in Groups
//!
//! | Group | Command |
//! |-------|---------|
//! | `calculator` | Add, Divide, Multiply and Subtract sub-menu |
//! | `csv` | Sorted CSV report |
//! | `exit` | Stops the application |
//! | `goodbye` | Prints a farewell |
//! | `greet` | Prints a greeting |
//! | `history` | Clear, Delete, Load and Save sub-menu |
//! | `openai` | Canned chat sub-menu |
//! | `menu` | Full menu over the registry (reserved) |
//!
//! ## Key Types
//!
//! - [`PluginLoader`] - Discovers groups and builds the registry
//! - [`PluginSource`] - A discoverable unit with an export hook
//! - [`CompositeMenu`] - Numbered sub-menu over a group of operations

mod builtin;
mod composite;
mod loader;
mod source;

pub use builtin::{catalog, MenuCommand, ROOT_NAME};
pub use composite::{CompositeMenu, BACK};
pub use loader::{bind_menu, Discovery, PluginLoader, MENU_COMMAND, RESERVED_GROUPS};
pub use source::{
    Export, ExportHook, PluginEnv, PluginRoot, PluginSource, SourceDescriptor, StaticGroup,
};
