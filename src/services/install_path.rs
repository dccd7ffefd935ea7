//! Installation path detection for Battlefield 2.
//!
//! Different installers register the game directory under different registry locations
//! (the retail installer writes to the 32-bit view of `HKEY_LOCAL_MACHINE`, some launchers
//! only write to `HKEY_CURRENT_USER`). [`resolve_install_dir`] walks an ordered list of
//! [`LookupSpec`] probes and returns the first value any of them yields.
//!
//! The lookup itself goes through the [`SoftwareLocator`] trait so the ordering policy can
//! be exercised without a registry.
//!
//! # Examples
//!
//! ```ignore
//! use bf2_map_mod_installer::services::{default_probes, resolve_install_dir, RegistryLocator};
//!
//! let install_dir = resolve_install_dir(&RegistryLocator, &default_probes())?;
//! ```

use crate::models::{LookupMechanism, LookupSpec, RegistryScope};
use camino::Utf8PathBuf;
use thiserror::Error;

const BF2_KEY_PATH: &str = r"SOFTWARE\Electronic Arts\EA Games\Battlefield 2";
const BF2_WOW64_KEY_PATH: &str = r"SOFTWARE\WOW6432Node\Electronic Arts\EA Games\Battlefield 2";
const BF2_VALUE_NAME: &str = "InstallDir";

/// Why a single probe did not yield a path
#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Registry key not found: {0}")]
    KeyNotFound(String),

    #[error("Registry value not found: {0}")]
    ValueNotFound(String),

    #[error("Lookup mechanism {0:?} is not available on this platform")]
    Unsupported(LookupMechanism),

    #[error("Lookup failed: {0}")]
    Io(#[from] std::io::Error),
}

/// No probe yielded an installation directory
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Installation directory not detected ({probes} location(s) checked)")]
    NotDetected { probes: usize },
}

/// Reads a single path value for a probe.
#[cfg_attr(test, mockall::automock)]
pub trait SoftwareLocator {
    fn lookup(&self, probe: &LookupSpec) -> Result<String, LocatorError>;
}

/// Built-in probes for the Battlefield 2 install directory, in priority order.
pub fn default_probes() -> Vec<LookupSpec> {
    vec![
        LookupSpec::registry(RegistryScope::LocalMachine, BF2_WOW64_KEY_PATH, BF2_VALUE_NAME),
        LookupSpec::registry(RegistryScope::LocalMachine, BF2_KEY_PATH, BF2_VALUE_NAME),
        LookupSpec::registry(RegistryScope::CurrentUser, BF2_KEY_PATH, BF2_VALUE_NAME),
    ]
}

/// Resolve the installation directory from the first successful probe.
///
/// Probes are tried strictly in order and the first non-blank value wins; later probes
/// are never consulted. The returned path is not checked for existence.
///
/// # Errors
///
/// [`ResolveError::NotDetected`] when every probe fails
pub fn resolve_install_dir<L>(
    locator: &L,
    probes: &[LookupSpec],
) -> Result<Utf8PathBuf, ResolveError>
where
    L: SoftwareLocator + ?Sized,
{
    for probe in probes {
        match locator.lookup(probe) {
            Ok(value) if !value.trim().is_empty() => {
                tracing::info!("Detected installation directory {} via {}", value, probe);
                return Ok(Utf8PathBuf::from(value));
            }
            Ok(_) => {
                tracing::debug!("Probe {} returned an empty value", probe);
            }
            Err(e) => {
                tracing::debug!("Probe {} failed: {}", probe, e);
            }
        }
    }

    tracing::warn!(
        "Could not detect installation directory from {} probe(s)",
        probes.len()
    );
    Err(ResolveError::NotDetected {
        probes: probes.len(),
    })
}

/// [`SoftwareLocator`] backed by the Windows registry.
///
/// On other platforms every lookup fails with [`LocatorError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryLocator;

impl SoftwareLocator for RegistryLocator {
    #[cfg(windows)]
    fn lookup(&self, probe: &LookupSpec) -> Result<String, LocatorError> {
        use std::io::ErrorKind;
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

        let root = match probe.scope {
            RegistryScope::LocalMachine => RegKey::predef(HKEY_LOCAL_MACHINE),
            RegistryScope::CurrentUser => RegKey::predef(HKEY_CURRENT_USER),
        };

        let key = root.open_subkey(&probe.key_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => LocatorError::KeyNotFound(probe.key_path.clone()),
            _ => LocatorError::Io(e),
        })?;

        key.get_value::<String, _>(&probe.value_name)
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => LocatorError::ValueNotFound(probe.value_name.clone()),
                _ => LocatorError::Io(e),
            })
    }

    #[cfg(not(windows))]
    fn lookup(&self, probe: &LookupSpec) -> Result<String, LocatorError> {
        Err(LocatorError::Unsupported(probe.mechanism))
    }
}
