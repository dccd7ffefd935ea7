//! Services module - the install/uninstall logic behind the command-line shell.
//!
//! The services have no dependency on how results are presented, so they can be driven
//! from the CLI, a GUI, or tests alike.
//!
//! # Components
//!
//! - [`install_path`]: detects the Battlefield 2 installation directory by trying an ordered
//!   list of registry probes through a [`SoftwareLocator`]; the first hit wins.
//! - [`installer`]: [`ItemInstaller`] maps each configured item to its place under
//!   `<install>/mods` and copies or removes it. The first failure aborts the batch.
//!
//! # Usage Example
//!
//! ```ignore
//! use bf2_map_mod_installer::services::{
//!     ItemInstaller, RegistryLocator, default_probes, resolve_install_dir,
//! };
//!
//! let install_dir = resolve_install_dir(&RegistryLocator, &default_probes())?;
//! let installer = ItemInstaller::for_executable(&install_dir)?;
//! installer.install_all(&config.install_items)?;
//! ```

pub mod install_path;
pub mod installer;

pub use install_path::{
    LocatorError, RegistryLocator, ResolveError, SoftwareLocator, default_probes,
    resolve_install_dir,
};
pub use installer::{InstallError, ItemInstaller, ItemPaths, install_all, uninstall_all};
