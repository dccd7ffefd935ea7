// BF2 Map Mod Installer - installs Battlefield 2 mods and maps listed in Config.yaml
//
// This is the library crate containing the core logic and data structures.
// The binary crate (main.rs) provides the command-line entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{CONFIG_FILENAME, ConfigError, ConfigManager};
pub use models::{Configuration, InstallItem, ItemKind, LookupSpec, RegistryScope};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
