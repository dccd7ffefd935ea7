use crate::models::probe::LookupSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content an [`InstallItem`] carries.
///
/// Unknown `type` values are kept as [`ItemKind::Other`] instead of failing the whole
/// config load. The installer rejects them when the batch reaches that item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    Mod,
    Map,
    Other(String),
}

impl ItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Mod => "mod",
            ItemKind::Map => "map",
            ItemKind::Other(value) => value,
        }
    }
}

impl From<String> for ItemKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "mod" => ItemKind::Mod,
            "map" => ItemKind::Map,
            _ => ItemKind::Other(value),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mod or map listed in `Config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Path of the content, relative to the executable's directory
    #[serde(rename = "src_path")]
    pub source_path: String,

    /// Owning mod of a map (maps are installed into `mods/<for_mod>/levels`)
    #[serde(rename = "for_mod", default, skip_serializing_if = "String::is_empty")]
    pub for_mod: String,
}

impl InstallItem {
    pub fn new_mod(source_path: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Mod,
            source_path: source_path.into(),
            for_mod: String::new(),
        }
    }

    pub fn new_map(source_path: impl Into<String>, for_mod: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Map,
            source_path: source_path.into(),
            for_mod: for_mod.into(),
        }
    }
}

/// Contents of `Config.yaml`
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "items")]
    pub install_items: Vec<InstallItem>,

    /// Overrides the built-in install path probes when present
    #[serde(
        rename = "install_path_probes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub install_path_probes: Option<Vec<LookupSpec>>,
}

impl Configuration {
    pub fn new(install_items: Vec<InstallItem>) -> Self {
        Self {
            install_items,
            install_path_probes: None,
        }
    }

    /// Items of the given kind, in config order
    pub fn items_of_kind(&self, kind: &ItemKind) -> Vec<&InstallItem> {
        self.install_items
            .iter()
            .filter(|item| &item.kind == kind)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.install_items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.install_items.len()
    }

    /// Human-readable item counts for status output
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "Config contains no items".to_string();
        }

        format!(
            "Configuration contains {} mod(s), {} map(s)",
            self.items_of_kind(&ItemKind::Mod).len(),
            self.items_of_kind(&ItemKind::Map).len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_item_kind_parsing() {
        assert_eq!(ItemKind::from("mod".to_string()), ItemKind::Mod);
        assert_eq!(ItemKind::from("map".to_string()), ItemKind::Map);
        assert_eq!(
            ItemKind::from("skin".to_string()),
            ItemKind::Other("skin".to_string())
        );
        // Kinds are case sensitive
        assert_eq!(
            ItemKind::from("Mod".to_string()),
            ItemKind::Other("Mod".to_string())
        );
    }

    #[test]
    fn test_item_kind_display() {
        assert_eq!(ItemKind::Mod.to_string(), "mod");
        assert_eq!(ItemKind::Other("skin".to_string()).to_string(), "skin");
    }

    #[test]
    fn test_deserialize_items() {
        let yaml = r#"
items:
  - type: mod
    src_path: SomeMod
  - type: map
    src_path: maps/SomeMap
    for_mod: bf2
  - type: sound
    src_path: Sounds
"#;
        let config: Configuration = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.len(), 3);
        assert_eq!(config.install_items[0], InstallItem::new_mod("SomeMod"));
        assert_eq!(
            config.install_items[1],
            InstallItem::new_map("maps/SomeMap", "bf2")
        );
        assert_eq!(
            config.install_items[2].kind,
            ItemKind::Other("sound".to_string())
        );
        assert!(config.install_path_probes.is_none());
    }

    #[test]
    fn test_mod_serializes_without_for_mod() {
        let config = Configuration::new(vec![InstallItem::new_mod("SomeMod")]);
        let yaml = serde_yaml_ng::to_string(&config).unwrap();

        assert!(yaml.contains("type: mod"));
        assert!(yaml.contains("src_path: SomeMod"));
        assert!(!yaml.contains("for_mod"));
        assert!(!yaml.contains("install_path_probes"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(Configuration::default().summary(), "Config contains no items");

        let config = Configuration::new(vec![
            InstallItem::new_mod("A"),
            InstallItem::new_map("B", "bf2"),
            InstallItem::new_map("C", "bf2"),
        ]);
        assert_eq!(
            config.summary(),
            "Configuration contains 1 mod(s), 2 map(s)"
        );
    }

    fn arb_item() -> impl Strategy<Value = InstallItem> {
        (0..3u8, "[A-Za-z0-9_]{1,12}", "[a-z]{1,8}").prop_map(|(kind, name, other)| match kind {
            0 => InstallItem::new_mod(name),
            1 => InstallItem::new_map(name, "bf2"),
            _ => InstallItem {
                kind: ItemKind::Other(format!("x{other}")),
                source_path: name,
                for_mod: String::new(),
            },
        })
    }

    proptest! {
        #[test]
        fn prop_kind_filters_partition_loaded_items(items in prop::collection::vec(arb_item(), 0..32)) {
            let yaml = serde_yaml_ng::to_string(&Configuration::new(items.clone())).unwrap();
            let config: Configuration = serde_yaml_ng::from_str(&yaml).unwrap();
            prop_assert_eq!(&config.install_items, &items);

            let mods = config.items_of_kind(&ItemKind::Mod);
            let maps = config.items_of_kind(&ItemKind::Map);
            let others = config
                .install_items
                .iter()
                .filter(|item| matches!(item.kind, ItemKind::Other(_)))
                .count();

            prop_assert_eq!(mods.len() + maps.len() + others, config.len());
            prop_assert!(mods.iter().all(|item| item.kind == ItemKind::Mod));
            prop_assert!(maps.iter().all(|item| item.kind == ItemKind::Map));

            // Each filter is an order-preserving subsequence of the loaded items
            let expected_mods: Vec<&InstallItem> = items
                .iter()
                .filter(|item| item.kind == ItemKind::Mod)
                .collect();
            let expected_maps: Vec<&InstallItem> = items
                .iter()
                .filter(|item| item.kind == ItemKind::Map)
                .collect();
            prop_assert_eq!(mods, expected_mods);
            prop_assert_eq!(maps, expected_maps);
        }
    }
}
