//! Extensions: manifests plus resources, registered through explicit entry points.
//!
//! An extension is loaded from the manifest given with `-e`. Its folder joins the
//! extension search path, its `locale` and `images` sub-folders are registered,
//! and if the manifest names an `entry`, the [`Extension`] registered under that
//! id in the [`ExtensionRegistry`] gets to register whatever else it contributes.
use std::path::{Path, PathBuf};

use crate::{
    launcher::resources::{BitmapLibrary, TranslationCatalogs},
    lib::errors::ExtensionError,
};

pub mod manifest;
pub mod registry;

pub use manifest::ExtensionManifest;
pub use registry::ExtensionRegistry;

/// Capability contract implemented by every extension entry point.
pub trait Extension: Send {
    fn register(&self, host: &mut ExtensionHost<'_>) -> Result<(), ExtensionError>;
}

/// What an entry point may touch while registering.
pub struct ExtensionHost<'a> {
    folder: &'a Path,
    manifest: &'a ExtensionManifest,
    catalogs: &'a mut TranslationCatalogs,
    bitmaps: &'a mut BitmapLibrary,
}

impl<'a> ExtensionHost<'a> {
    pub(crate) fn new(
        folder: &'a Path,
        manifest: &'a ExtensionManifest,
        catalogs: &'a mut TranslationCatalogs,
        bitmaps: &'a mut BitmapLibrary,
    ) -> Self {
        Self {
            folder,
            manifest,
            catalogs,
            bitmaps,
        }
    }

    /// Folder holding the extension manifest.
    pub fn folder(&self) -> &Path {
        self.folder
    }

    pub fn manifest(&self) -> &ExtensionManifest {
        self.manifest
    }

    pub fn setting(&self, key: &str) -> Option<&toml::Value> {
        self.manifest.settings.get(key)
    }

    /// Register an extra catalog folder, relative to the extension folder.
    pub fn add_catalog(&mut self, dir: &Path) -> bool {
        let dir = self.folder.join(dir);
        self.catalogs.add_catalog(&dir)
    }

    /// Register an extra bitmap folder, relative to the extension folder.
    pub fn add_bitmap_folder(&mut self, dir: &Path) -> bool {
        let dir = self.folder.join(dir);
        self.bitmaps.add_folder(&dir)
    }
}

/// Folders of loaded extensions, in load order.
#[derive(Debug, Clone, Default)]
pub struct ExtensionSearchPath(Vec<PathBuf>);

impl ExtensionSearchPath {
    pub fn push(&mut self, dir: &Path) {
        if !self.0.iter().any(|known| known == dir) {
            self.0.push(dir.to_path_buf());
        }
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.0.iter().any(|known| known == dir)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.0
    }
}

/// Record of one loaded extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedExtension {
    pub name: String,
    pub manifest_path: PathBuf,
    pub folder: PathBuf,
    pub entry: Option<String>,
}
