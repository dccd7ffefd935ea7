//! Integration tests for ConfigManager and Config.yaml handling
//!
//! These tests verify:
//! - Loading the item list and its kind filters
//! - Missing and malformed files are reported, never replaced by defaults
//! - Unknown item types survive loading
//! - Custom install path probes

use bf2_map_mod_installer::{
    ConfigError, ConfigManager, Configuration, InstallItem, ItemKind, RegistryScope,
};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

fn write_config(dir: &Utf8PathBuf, contents: &str) -> ConfigManager {
    fs::write(dir.join("Config.yaml"), contents).unwrap();
    ConfigManager::new(dir)
}

#[test]
fn test_load_config_with_mods_and_maps() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = write_config(
        &config_dir,
        r#"
items:
  - type: mod
    src_path: SomeMod
  - type: map
    src_path: maps/SomeMap
    for_mod: bf2
  - type: mod
    src_path: OtherMod
"#,
    );

    let config = manager.load().unwrap();

    assert_eq!(config.len(), 3);
    let mods = config.items_of_kind(&ItemKind::Mod);
    let maps = config.items_of_kind(&ItemKind::Map);
    assert_eq!(mods.len(), 2);
    assert_eq!(maps.len(), 1);
    assert_eq!(mods[0].source_path, "SomeMod");
    assert_eq!(mods[1].source_path, "OtherMod");
    assert_eq!(maps[0].for_mod, "bf2");
    assert_eq!(config.summary(), "Configuration contains 2 mod(s), 1 map(s)");
}

#[test]
fn test_save_then_load() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = ConfigManager::new(&config_dir);

    let config = Configuration::new(vec![
        InstallItem::new_mod("SomeMod"),
        InstallItem::new_map("SomeMap", "bf2"),
    ]);
    manager.save(&config).unwrap();

    assert!(config_dir.join("Config.yaml").exists());
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn test_missing_config_is_not_found() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = ConfigManager::new(&config_dir);

    match manager.load() {
        Err(ConfigError::NotFound { path }) => assert_eq!(path, config_dir.join("Config.yaml")),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let (_temp_dir, config_dir) = create_test_config_dir();

    for contents in [
        "this-is-not-valid-yaml",
        "items: [",
        "items:\n  - type: mod\n    src_path: [1, 2]\n",
        "items:\n  - type: mod\n",
        "items: 42\n",
    ] {
        let manager = write_config(&config_dir, contents);
        let result = manager.load();
        assert!(
            matches!(result, Err(ConfigError::Parse { .. })),
            "Expected Parse error for {:?}, got {:?}",
            contents,
            result
        );
    }
}

#[test]
fn test_unknown_item_type_is_loaded() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = write_config(
        &config_dir,
        "items:\n  - type: skin\n    src_path: Skins\n  - type: mod\n    src_path: SomeMod\n",
    );

    let config = manager.load().unwrap();

    assert_eq!(config.len(), 2);
    assert_eq!(
        config.install_items[0].kind,
        ItemKind::Other("skin".to_string())
    );
    // Unknown kinds are in neither filter
    assert_eq!(config.items_of_kind(&ItemKind::Mod).len(), 1);
    assert_eq!(config.items_of_kind(&ItemKind::Map).len(), 0);
}

#[test]
fn test_empty_item_list() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = write_config(&config_dir, "items: []\n");

    let config = manager.load().unwrap();
    assert!(config.is_empty());
    assert_eq!(config.summary(), "Config contains no items");
}

#[test]
fn test_custom_install_path_probes() {
    let (_temp_dir, config_dir) = create_test_config_dir();
    let manager = write_config(
        &config_dir,
        r#"
items:
  - type: mod
    src_path: SomeMod
install_path_probes:
  - scope: current_user
    key_path: SOFTWARE\Launcher\Battlefield 2
    value_name: GamePath
  - scope: local_machine
    mechanism: registry
    key_path: SOFTWARE\WOW6432Node\Electronic Arts\EA Games\Battlefield 2
    value_name: InstallDir
"#,
    );

    let config = manager.load().unwrap();
    let probes = config.install_path_probes.unwrap();

    assert_eq!(probes.len(), 2);
    assert_eq!(probes[0].scope, RegistryScope::CurrentUser);
    assert_eq!(probes[0].key_path, r"SOFTWARE\Launcher\Battlefield 2");
    assert_eq!(probes[0].value_name, "GamePath");
    assert_eq!(probes[1].scope, RegistryScope::LocalMachine);
}
