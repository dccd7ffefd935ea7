use crate::models::{InstallItem, ItemKind};
use crate::paths::{ExecutableDirError, executable_dir};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use walkdir::WalkDir;

const MODS_DIR: &str = "mods";
const LEVELS_DIR: &str = "levels";

/// Errors that stop an install or uninstall batch
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Unsupported item type: {0}")]
    UnsupportedItemType(String),

    #[error("Invalid item {src_path:?}: {reason}")]
    InvalidItem {
        src_path: String,
        reason: &'static str,
    },

    #[error("Source not found: {0}")]
    SourceNotFound(Utf8PathBuf),

    #[error("Destination {destination} overlaps source {source_path}")]
    SourceOverlap {
        source_path: Utf8PathBuf,
        destination: Utf8PathBuf,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),

    #[error("Failed to locate item sources")]
    ExecutableDir(#[from] ExecutableDirError),
}

impl InstallError {
    fn io(path: &Utf8Path, source: io::Error) -> Self {
        InstallError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where an item is copied from and to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPaths {
    pub source: Utf8PathBuf,
    pub destination: Utf8PathBuf,
}

/// Copies items into, and removes them from, a game installation.
///
/// Items are processed strictly in order and the first error aborts the batch. Items
/// handled before the failure stay as they are; there is no rollback.
///
/// Not safe to run concurrently against the same installation; callers are expected to
/// block further actions until a batch returns.
#[derive(Debug, Clone)]
pub struct ItemInstaller {
    source_root: Utf8PathBuf,
    install_root: Utf8PathBuf,
}

impl ItemInstaller {
    /// # Arguments
    /// * `source_root` - Directory item `src_path`s are relative to
    /// * `install_root` - Game installation directory (need not exist yet)
    pub fn new<S: AsRef<Utf8Path>, I: AsRef<Utf8Path>>(source_root: S, install_root: I) -> Self {
        Self {
            source_root: source_root.as_ref().to_path_buf(),
            install_root: install_root.as_ref().to_path_buf(),
        }
    }

    /// Installer taking its sources from the running executable's directory.
    pub fn for_executable<I: AsRef<Utf8Path>>(install_root: I) -> Result<Self, InstallError> {
        Ok(Self::new(executable_dir()?, install_root))
    }

    pub fn source_root(&self) -> &Utf8Path {
        &self.source_root
    }

    pub fn install_root(&self) -> &Utf8Path {
        &self.install_root
    }

    /// Compute source and destination of an item.
    ///
    /// - mod: `<install_root>/mods/<basename(src_path)>`
    /// - map: `<install_root>/mods/<for_mod>/levels/<basename(src_path)>`
    pub fn plan(&self, item: &InstallItem) -> Result<ItemPaths, InstallError> {
        let relative_source = Utf8Path::new(&item.source_path);
        let name = match relative_source.file_name() {
            Some(name) if !item.source_path.trim().is_empty() => name,
            _ => {
                return Err(InstallError::InvalidItem {
                    src_path: item.source_path.clone(),
                    reason: "src_path must end in a file or directory name",
                });
            }
        };

        let destination = match &item.kind {
            ItemKind::Mod => self.install_root.join(MODS_DIR).join(name),
            ItemKind::Map => {
                if !is_single_component(&item.for_mod) {
                    return Err(InstallError::InvalidItem {
                        src_path: item.source_path.clone(),
                        reason: "for_mod must name a single mod directory",
                    });
                }
                self.install_root
                    .join(MODS_DIR)
                    .join(&item.for_mod)
                    .join(LEVELS_DIR)
                    .join(name)
            }
            ItemKind::Other(kind) => return Err(InstallError::UnsupportedItemType(kind.clone())),
        };

        Ok(ItemPaths {
            source: self.source_root.join(relative_source),
            destination,
        })
    }

    /// Copy every item into the installation.
    ///
    /// Existing files at the destination are overwritten, so re-installing refreshes
    /// the content.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; remaining items are not processed.
    pub fn install_all(&self, items: &[InstallItem]) -> Result<(), InstallError> {
        tracing::info!(
            "Installing {} item(s) into {}",
            items.len(),
            self.install_root
        );

        for item in items {
            let paths = self.plan(item)?;
            check_no_overlap(&paths)?;
            let copied = copy_recursive(&paths.source, &paths.destination)?;
            tracing::info!(
                "Installed {} {} -> {} ({} file(s))",
                item.kind,
                paths.source,
                paths.destination,
                copied
            );
        }

        Ok(())
    }

    /// Remove every item from the installation.
    ///
    /// Items that are not installed are skipped, so this is safe to call repeatedly or
    /// against an installation directory that does not exist.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; remaining items are not processed.
    pub fn uninstall_all(&self, items: &[InstallItem]) -> Result<(), InstallError> {
        tracing::info!(
            "Uninstalling {} item(s) from {}",
            items.len(),
            self.install_root
        );

        for item in items {
            let paths = self.plan(item)?;
            check_no_overlap(&paths)?;
            if remove_path(&paths.destination)? {
                tracing::info!("Removed {} {}", item.kind, paths.destination);
            } else {
                tracing::debug!("{} not installed, nothing to remove", paths.destination);
            }
        }

        Ok(())
    }
}

/// Install items whose sources live next to the running executable.
pub fn install_all(install_root: &Utf8Path, items: &[InstallItem]) -> Result<(), InstallError> {
    ItemInstaller::for_executable(install_root)?.install_all(items)
}

/// Uninstall items previously installed with [`install_all`].
pub fn uninstall_all(install_root: &Utf8Path, items: &[InstallItem]) -> Result<(), InstallError> {
    ItemInstaller::for_executable(install_root)?.uninstall_all(items)
}

fn is_single_component(name: &str) -> bool {
    let mut components = Utf8Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Utf8Component::Normal(_)), None)
    )
}

/// Refuse items whose destination is, contains, or lies inside their source.
///
/// Copying onto the source truncates it, and removing such a destination deletes the
/// source. A source that does not exist cannot overlap anything.
fn check_no_overlap(paths: &ItemPaths) -> Result<(), InstallError> {
    let source = match fs::canonicalize(&paths.source) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(InstallError::io(&paths.source, e)),
    };
    let destination = canonicalize_existing_prefix(&paths.destination)?;

    if destination.starts_with(&source) || source.starts_with(&destination) {
        return Err(InstallError::SourceOverlap {
            source_path: paths.source.clone(),
            destination: paths.destination.clone(),
        });
    }

    Ok(())
}

/// Canonicalize the longest existing ancestor of `path` and re-append the rest.
fn canonicalize_existing_prefix(path: &Utf8Path) -> Result<PathBuf, InstallError> {
    let absolute = std::path::absolute(path).map_err(|e| InstallError::io(path, e))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(mut resolved) => {
                for name in missing.iter().rev() {
                    resolved.push(name);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match (existing.file_name(), existing.parent()) {
                    (Some(name), Some(parent)) => {
                        missing.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => return Ok(absolute.clone()),
                }
            }
            Err(e) => return Err(InstallError::io(path, e)),
        }
    }
}

/// Copy a file or directory tree, creating missing parent directories.
///
/// Returns the number of files copied.
fn copy_recursive(source: &Utf8Path, destination: &Utf8Path) -> Result<usize, InstallError> {
    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(InstallError::SourceNotFound(source.to_path_buf()));
        }
        Err(e) => return Err(InstallError::io(source, e)),
    };

    if metadata.is_file() {
        copy_file(source, destination)?;
        return Ok(1);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .and_then(Utf8Path::from_path)
                .unwrap_or(source)
                .to_path_buf();
            InstallError::Io {
                path,
                source: e.into(),
            }
        })?;

        let entry_path = Utf8Path::from_path(entry.path())
            .ok_or_else(|| InstallError::NonUtf8Path(entry.path().to_path_buf()))?;
        let relative = entry_path
            .strip_prefix(source)
            .map_err(|_| InstallError::NonUtf8Path(entry.path().to_path_buf()))?;
        let target = if relative.as_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(relative)
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| InstallError::io(&target, e))?;
        } else {
            copy_file(entry_path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(source: &Utf8Path, destination: &Utf8Path) -> Result<(), InstallError> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| InstallError::io(parent, e))?;
    }
    fs::copy(source, destination).map_err(|e| InstallError::io(destination, e))?;
    tracing::debug!("Copied {} -> {}", source, destination);
    Ok(())
}

/// Remove a file or directory tree. Returns `false` if nothing was there.
fn remove_path(path: &Utf8Path) -> Result<bool, InstallError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(InstallError::io(path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(InstallError::io(path, e)),
    }
}
