use std::{collections::BTreeMap, fmt, path::Path};

use tracing::info;

use super::{Extension, ExtensionHost, ExtensionManifest, ExtensionSearchPath, LoadedExtension};
use crate::{
    launcher::resources::{BitmapLibrary, TranslationCatalogs, IMAGES_DIR, LOCALE_DIR},
    lib::errors::ExtensionError,
};

/// Entry points known to this build, keyed by the id manifests refer to.
#[derive(Default)]
pub struct ExtensionRegistry {
    entry_points: BTreeMap<String, Box<dyn Extension>>,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("entry_points", &self.entry_points.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `extension` under `id`, returning the one it replaced.
    pub fn register_entry_point(
        &mut self,
        id: impl Into<String>,
        extension: impl Extension + 'static,
    ) -> Option<Box<dyn Extension>> {
        self.entry_points.insert(id.into(), Box::new(extension))
    }

    pub fn with_entry_point(
        mut self,
        id: impl Into<String>,
        extension: impl Extension + 'static,
    ) -> Self {
        self.register_entry_point(id, extension);
        self
    }

    pub fn entry_points(&self) -> impl Iterator<Item = &str> {
        self.entry_points.keys().map(String::as_str)
    }

    /// Load the extension whose manifest is at `path`.
    pub fn load(
        &self,
        path: &Path,
        search_path: &mut ExtensionSearchPath,
        catalogs: &mut TranslationCatalogs,
        bitmaps: &mut BitmapLibrary,
    ) -> Result<LoadedExtension, ExtensionError> {
        let manifest_path = path.canonicalize().map_err(|source| ExtensionError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;
        let folder = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| manifest_path.clone());

        search_path.push(&folder);
        catalogs.add_catalog(&folder.join(LOCALE_DIR));
        bitmaps.add_folder(&folder.join(IMAGES_DIR));

        let manifest = ExtensionManifest::load(&manifest_path)?;

        if let Some(entry) = &manifest.entry {
            let extension =
                self.entry_points
                    .get(entry)
                    .ok_or_else(|| ExtensionError::UnknownEntryPoint {
                        extension: manifest.name.clone(),
                        entry: entry.clone(),
                    })?;
            let mut host = ExtensionHost::new(&folder, &manifest, catalogs, bitmaps);
            extension.register(&mut host)?;
        }

        info!(
            target: "beremiz::extensions",
            name = %manifest.name,
            entry = manifest.entry.as_deref().unwrap_or(""),
            folder = %folder.display(),
            "Loaded extension"
        );

        Ok(LoadedExtension {
            name: manifest.name,
            manifest_path,
            folder,
            entry: manifest.entry,
        })
    }
}
