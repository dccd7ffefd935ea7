//! BF2 Map Mod Installer - command-line entry point.
//!
//! # Execution Flow
//!
//! 1. Parse arguments
//! 2. Initialize logging → `logs/bf2-map-mod-installer.<date>` next to the executable
//! 3. Load `Config.yaml` from the executable's directory
//! 4. Determine the Battlefield 2 directory (`--install-dir`, else registry probes)
//! 5. Print status, or run the install/uninstall batch
//!
//! Any failure is reported once, here; the library components only propagate errors.

mod cli;

use anyhow::{Context, Result, bail};
use bf2_map_mod_installer::services::{
    ItemInstaller, RegistryLocator, ResolveError, default_probes, resolve_install_dir,
};
use bf2_map_mod_installer::{APP_NAME, ConfigManager, Configuration, VERSION, paths};
use camino::Utf8PathBuf;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exe_dir = paths::executable_dir().context("Failed to locate executable directory")?;
    let _guard = bf2_map_mod_installer::logging::setup_logging_with_console(
        &exe_dir.join("logs"),
        APP_NAME,
        cli.debug,
        cli.debug,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let result = run(&cli, ConfigManager::new(&exe_dir));
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}

fn run(cli: &Cli, config_manager: ConfigManager) -> Result<()> {
    let config = config_manager.load().context("Failed to load config")?;

    let command = cli.command.unwrap_or(Command::Status);
    let install_dir = detect_install_dir(cli, &config);

    match command {
        Command::Status => {
            println!("{}", config.summary());
            match install_dir {
                Ok(dir) => println!("Battlefield 2 installation: {}", dir),
                Err(e) => println!("Battlefield 2 installation: {} (use --install-dir)", e),
            }
            Ok(())
        }
        Command::Install | Command::Uninstall => {
            if config.is_empty() {
                bail!("{}, nothing to do", config.summary());
            }

            let install_dir = install_dir.context(
                "Failed to determine path to Battlefield 2 installation, use --install-dir",
            )?;
            let installer = ItemInstaller::new(config_manager.config_dir(), &install_dir);

            if command == Command::Install {
                installer
                    .install_all(&config.install_items)
                    .context("Installation failed")?;
                println!("Installation succeeded");
            } else {
                installer
                    .uninstall_all(&config.install_items)
                    .context("Uninstallation failed")?;
                println!("Uninstallation succeeded");
            }
            Ok(())
        }
    }
}

fn detect_install_dir(cli: &Cli, config: &Configuration) -> Result<Utf8PathBuf, ResolveError> {
    if let Some(dir) = &cli.install_dir {
        tracing::info!("Using installation directory from command line: {}", dir);
        return Ok(dir.clone());
    }

    let probes = config
        .install_path_probes
        .clone()
        .unwrap_or_else(default_probes);
    resolve_install_dir(&RegistryLocator, &probes)
}
