use serde::{Deserialize, Serialize};
use std::fmt;

/// Mechanism a probe uses to look up the installation directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMechanism {
    #[default]
    Registry,
}

/// Registry root a probe reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryScope {
    /// `HKEY_LOCAL_MACHINE`
    LocalMachine,
    /// `HKEY_CURRENT_USER`
    CurrentUser,
}

impl fmt::Display for RegistryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryScope::LocalMachine => f.write_str("HKEY_LOCAL_MACHINE"),
            RegistryScope::CurrentUser => f.write_str("HKEY_CURRENT_USER"),
        }
    }
}

/// One probe for the installation directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSpec {
    #[serde(default)]
    pub mechanism: LookupMechanism,
    pub scope: RegistryScope,
    pub key_path: String,
    pub value_name: String,
}

impl LookupSpec {
    pub fn registry(
        scope: RegistryScope,
        key_path: impl Into<String>,
        value_name: impl Into<String>,
    ) -> Self {
        Self {
            mechanism: LookupMechanism::Registry,
            scope,
            key_path: key_path.into(),
            value_name: value_name.into(),
        }
    }
}

impl fmt::Display for LookupSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{} [{}]", self.scope, self.key_path, self.value_name)
    }
}
