use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// BF2 map mod installer - copies the mods and maps listed in Config.yaml into Battlefield 2
#[derive(Parser, Debug)]
#[command(name = "bf2-map-mod-installer")]
#[command(version)]
pub struct Cli {
    /// Battlefield 2 installation directory.
    ///
    /// Skips registry detection. Use this when the game was installed by a launcher that
    /// does not register its install path.
    #[arg(long, global = true, value_name = "PATH")]
    pub install_dir: Option<Utf8PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show configured items and the detected installation directory (default)
    Status,
    /// Copy all configured items into the installation
    Install,
    /// Remove all configured items from the installation
    Uninstall,
}
