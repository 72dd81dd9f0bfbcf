//! GUI toolkit binding: the seams the launcher drives during startup.
//!
//! The launcher only talks to [`Toolkit`], [`SplashScreen`] and [`IdeFrameFactory`].
//! [`shell`] binds them to eframe; tests substitute recording doubles.
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use egui::ViewportId;

use crate::lib::errors::GuiError;

pub mod shell;
pub mod workspace;

pub use shell::{run_shell, EguiSplash, EguiToolkit};
pub use workspace::{WorkspaceFrame, WorkspaceFrameFactory};

/// Platform family, which decides how the splash gets painted before blocking work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Paints on demand: show then force a paint.
    Windows,
    /// Needs the event queue pumped for a while.
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

/// Decoded splash bitmap.
#[derive(Clone)]
pub struct SplashImage {
    pub source: PathBuf,
    /// Width and height in pixels.
    pub size: [usize; 2],
    /// Unmultiplied RGBA, row major.
    pub rgba: Vec<u8>,
}

impl SplashImage {
    pub fn load(path: &Path) -> Result<Self, GuiError> {
        let rgba = image::open(path)
            .map_err(|source| GuiError::SplashImage {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Ok(Self {
            source: path.to_path_buf(),
            size,
            rgba: rgba.into_raw(),
        })
    }
}

impl fmt::Debug for SplashImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplashImage")
            .field("source", &self.source)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Transient startup window.
pub trait SplashScreen {
    fn show(&mut self);
    /// Paint immediately without waiting for the event loop.
    fn force_paint(&mut self);
    fn set_text(&mut self, text: &str);
    fn close(&mut self);
}

/// The IDE main window.
pub trait IdeFrame: Send {
    fn title(&self) -> String;
    fn show(&mut self);
    fn is_shown(&self) -> bool;
    /// Draw one frame.
    fn ui(&mut self, ctx: &egui::Context);
}

/// Builds the IDE main window.
pub trait IdeFrameFactory: Send {
    fn create(
        &self,
        parent: Option<ViewportId>,
        project_path: Option<&Path>,
        build_path: Option<&Path>,
    ) -> Result<Box<dyn IdeFrame>, GuiError>;
}

/// Application object of the GUI toolkit.
pub trait Toolkit {
    type Splash: SplashScreen;

    fn platform(&self) -> Platform;
    fn set_app_name(&mut self, name: &str);
    fn show_splash(&mut self, image: SplashImage) -> Result<Self::Splash, GuiError>;
    /// Let pending GUI events run.
    fn yield_events(&mut self);
    /// Take ownership of the main window and show it.
    fn show_frame(&mut self, frame: Box<dyn IdeFrame>) -> Result<(), GuiError>;
    /// Block until the application exits.
    fn main_loop(&mut self) -> Result<(), GuiError>;
}
