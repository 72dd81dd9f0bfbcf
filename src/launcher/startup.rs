//! Launcher: the fixed startup sequence from splash screen to main loop.
//!
//! Steps run on the calling thread in order. Each one logs a structured event
//! under the `beremiz::startup` target.
use std::{path::Path, process::ExitCode, thread};

use anyhow::Error;
use tracing::{debug, info};

use crate::{
    cli::LaunchRequest,
    extensions::{ExtensionRegistry, ExtensionSearchPath, LoadedExtension},
    gui::{IdeFrameFactory, Platform, SplashImage, SplashScreen, Toolkit, WorkspaceFrameFactory},
    launcher::{
        config::LauncherConfig,
        resources::{install_local_resources, BitmapLibrary, TranslationCatalogs},
        update::{fetching_message, UpdateChecker},
    },
    lib::{
        crash,
        errors::{CrashLogError, LaunchError},
        version::APP_VERSION,
    },
};

/// Installs the process-wide exception hook given a log directory and a version.
pub type ExceptHookInstaller = Box<dyn Fn(&Path, &str) -> Result<(), CrashLogError> + Send>;

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:#}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Drives startup from an already parsed command line to the event loop.
pub struct Launcher<T: Toolkit> {
    request: LaunchRequest,
    config: LauncherConfig,
    toolkit: T,
    frames: Box<dyn IdeFrameFactory>,
    extensions: ExtensionRegistry,
    except_hook: ExceptHookInstaller,
    splash: Option<T::Splash>,
    catalogs: TranslationCatalogs,
    bitmaps: BitmapLibrary,
    search_path: ExtensionSearchPath,
    loaded: Vec<LoadedExtension>,
    // Kept alive so an update fetch that outlived its wait can still finish.
    updates: Option<UpdateChecker>,
}

impl<T: Toolkit> Launcher<T> {
    pub fn new(request: LaunchRequest, config: LauncherConfig, toolkit: T) -> Self {
        Self {
            request,
            config,
            toolkit,
            frames: Box::new(WorkspaceFrameFactory),
            extensions: ExtensionRegistry::new(),
            except_hook: Box::new(crash::install_except_hook),
            splash: None,
            catalogs: TranslationCatalogs::default(),
            bitmaps: BitmapLibrary::default(),
            search_path: ExtensionSearchPath::default(),
            loaded: Vec::new(),
            updates: None,
        }
    }

    pub fn with_frame_factory(mut self, frames: impl IdeFrameFactory + 'static) -> Self {
        self.frames = Box::new(frames);
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_except_hook(
        mut self,
        installer: impl Fn(&Path, &str) -> Result<(), CrashLogError> + Send + 'static,
    ) -> Self {
        self.except_hook = Box::new(installer);
        self
    }

    pub fn catalogs(&self) -> &TranslationCatalogs {
        &self.catalogs
    }

    pub fn bitmaps(&self) -> &BitmapLibrary {
        &self.bitmaps
    }

    pub fn search_path(&self) -> &ExtensionSearchPath {
        &self.search_path
    }

    pub fn loaded_extensions(&self) -> &[LoadedExtension] {
        &self.loaded
    }

    /// Full startup: everything up to the main window, then the event loop.
    pub fn run(mut self) -> Result<(), LaunchError> {
        self.bootstrap()?;
        info!(target: "beremiz::startup", "Entering main loop");
        self.toolkit.main_loop()?;
        info!(target: "beremiz::startup", "Main loop finished");
        Ok(())
    }

    /// Every startup step short of the event loop.
    pub fn bootstrap(&mut self) -> Result<(), LaunchError> {
        self.create_application();
        self.show_splash_screen()?;
        self.background_initialization()
    }

    fn create_application(&mut self) {
        info!(
            target: "beremiz::startup",
            app_name = %self.config.launcher.app_name,
            debug = self.config.debug,
            "Creating application"
        );
        self.toolkit.set_app_name(&self.config.launcher.app_name);
    }

    fn show_splash_screen(&mut self) -> Result<(), LaunchError> {
        let image = SplashImage::load(&self.config.splash.image)?;
        let mut splash = self.toolkit.show_splash(image)?;

        match self.toolkit.platform() {
            Platform::Windows => {
                splash.show();
                splash.force_paint();
            }
            Platform::Other => {
                for _ in 0..self.config.splash.pump_iterations {
                    self.toolkit.yield_events();
                    thread::sleep(self.config.splash.pump_interval);
                }
            }
        }

        self.splash = Some(splash);
        Ok(())
    }

    fn background_initialization(&mut self) -> Result<(), LaunchError> {
        self.init_i18n();
        self.check_updates()?;
        self.load_extensions()?;
        self.install_exception_handler()?;
        self.show_ui()
    }

    fn init_i18n(&mut self) {
        install_local_resources(&self.config.app_dir, &mut self.catalogs, &mut self.bitmaps);
        info!(
            target: "beremiz::startup",
            catalogs = self.catalogs.dirs().len(),
            bitmap_folders = self.bitmaps.folders().len(),
            "Registered local resources"
        );
    }

    fn check_updates(&mut self) -> Result<(), LaunchError> {
        let Some(url) = self.request.update_url.clone() else {
            debug!(target: "beremiz::startup", "No update URL given; skipping update check");
            return Ok(());
        };

        let checker = UpdateChecker::new(
            self.config.update.wait,
            self.config.update.fallback_message.clone(),
        )?;
        info!(
            target: "beremiz::startup",
            url = %url,
            wait_ms = self.config.update.wait.as_millis() as u64,
            "Checking for updates"
        );
        self.set_splash_text(&fetching_message(&url));
        let text = checker.check(&url);
        info!(
            target: "beremiz::startup",
            url = %url,
            fallback = text == self.config.update.fallback_message,
            "Update check finished"
        );
        self.set_splash_text(&text);
        self.updates = Some(checker);
        Ok(())
    }

    fn load_extensions(&mut self) -> Result<(), LaunchError> {
        info!(
            target: "beremiz::startup",
            requested = self.request.extensions.len(),
            entry_points = ?self.extensions.entry_points().collect::<Vec<_>>(),
            "Loading extensions"
        );
        for path in &self.request.extensions {
            let loaded = self.extensions.load(
                path,
                &mut self.search_path,
                &mut self.catalogs,
                &mut self.bitmaps,
            )?;
            self.loaded.push(loaded);
        }
        Ok(())
    }

    fn install_exception_handler(&mut self) -> Result<(), LaunchError> {
        (self.except_hook)(&self.config.crash.log_dir, APP_VERSION)?;
        info!(
            target: "beremiz::startup",
            log_dir = %self.config.crash.log_dir.display(),
            "Exception hook installed"
        );
        Ok(())
    }

    fn show_ui(&mut self) -> Result<(), LaunchError> {
        let frame = self.frames.create(
            None,
            self.request.project_path.as_deref(),
            self.request.build_path.as_deref(),
        )?;
        if let Some(mut splash) = self.splash.take() {
            splash.close();
        }
        info!(
            target: "beremiz::startup",
            title = %frame.title(),
            "Showing main window"
        );
        self.toolkit.show_frame(frame)?;
        Ok(())
    }

    fn set_splash_text(&mut self, text: &str) {
        if let Some(splash) = self.splash.as_mut() {
            splash.set_text(text);
        }
    }
}
