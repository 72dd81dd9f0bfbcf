//! Translation catalogs and bitmap folders contributed by the IDE and its extensions.
use std::path::{Path, PathBuf};

use tracing::debug;

/// Sub-folder holding message catalogs.
pub const LOCALE_DIR: &str = "locale";
/// Sub-folder holding bitmaps.
pub const IMAGES_DIR: &str = "images";

/// Directories searched for message catalogs, in registration order.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalogs {
    dirs: Vec<PathBuf>,
}

impl TranslationCatalogs {
    /// Register `dir` if it exists. Returns whether it was added.
    pub fn add_catalog(&mut self, dir: &Path) -> bool {
        register_dir(&mut self.dirs, dir, "catalog")
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Folders searched for bitmaps, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BitmapLibrary {
    folders: Vec<PathBuf>,
}

impl BitmapLibrary {
    /// Register `dir` if it exists. Returns whether it was added.
    pub fn add_folder(&mut self, dir: &Path) -> bool {
        register_dir(&mut self.folders, dir, "bitmap folder")
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// First `<folder>/<name>.png` found across registered folders.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.folders
            .iter()
            .map(|folder| folder.join(format!("{name}.png")))
            .find(|candidate| candidate.is_file())
    }
}

/// Register the application's own `locale` and `images` folders.
pub fn install_local_resources(
    app_dir: &Path,
    catalogs: &mut TranslationCatalogs,
    bitmaps: &mut BitmapLibrary,
) {
    catalogs.add_catalog(&app_dir.join(LOCALE_DIR));
    bitmaps.add_folder(&app_dir.join(IMAGES_DIR));
}

fn register_dir(list: &mut Vec<PathBuf>, dir: &Path, kind: &'static str) -> bool {
    if !dir.is_dir() {
        debug!(
            target: "beremiz::resources",
            path = %dir.display(),
            kind,
            "Skipping missing directory"
        );
        return false;
    }
    if list.iter().any(|known| known == dir) {
        return false;
    }
    list.push(dir.to_path_buf());
    true
}
