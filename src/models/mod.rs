//! Data models for the installer.
//!
//! - [`Configuration`]: the item list loaded from `Config.yaml`
//! - [`InstallItem`] / [`ItemKind`]: one mod or map and what kind it is
//! - [`LookupSpec`]: one probe for the game's installation directory
//!
//! All models derive `Serialize`/`Deserialize` so they round-trip through YAML.

pub mod config;
pub mod probe;

pub use config::{Configuration, InstallItem, ItemKind};
pub use probe::{LookupMechanism, LookupSpec, RegistryScope};
