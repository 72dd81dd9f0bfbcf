//! eframe binding.
//!
//! winit wants the event loop on the main thread, so the bootstrap sequence runs
//! on a `bootstrap` worker and drives the window through a command channel.
//! The UI thread drains the channel at the start of every frame.
use std::{
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc, OnceLock,
    },
    thread,
    time::Duration,
};

use tracing::debug;

use super::{IdeFrame, Platform, SplashImage, SplashScreen, Toolkit};
use crate::lib::errors::{GuiError, LaunchError};

const STARTUP_SIZE: [f32; 2] = [480.0, 300.0];
const FRAME_SIZE: [f32; 2] = [1280.0, 800.0];
const COMMAND_POLL: Duration = Duration::from_millis(50);
const SPLASH_TEXT_MARGIN: f32 = 12.0;

enum UiCommand {
    SetAppName(String),
    ShowSplash(SplashImage),
    RaiseSplash,
    SplashText(String),
    CloseSplash,
    ShowFrame(Box<dyn IdeFrame>),
    Quit,
}

#[derive(Clone)]
struct UiHandle {
    commands: Sender<UiCommand>,
    ctx: Arc<OnceLock<egui::Context>>,
}

impl UiHandle {
    fn send(&self, command: UiCommand) -> Result<(), GuiError> {
        self.commands
            .send(command)
            .map_err(|_| GuiError::Disconnected)?;
        self.wake();
        Ok(())
    }

    fn send_best_effort(&self, command: UiCommand) {
        if self.send(command).is_err() {
            debug!(target: "beremiz::gui", "Window already gone; dropping splash update");
        }
    }

    fn wake(&self) {
        if let Some(ctx) = self.ctx.get() {
            ctx.request_repaint();
        }
    }
}

/// Toolkit handle used from the bootstrap thread.
pub struct EguiToolkit {
    ui: UiHandle,
    window_alive: Receiver<()>,
    platform: Platform,
}

/// Splash handle used from the bootstrap thread.
pub struct EguiSplash {
    ui: UiHandle,
    closed: bool,
}

impl SplashScreen for EguiSplash {
    fn show(&mut self) {
        self.ui.send_best_effort(UiCommand::RaiseSplash);
    }

    fn force_paint(&mut self) {
        self.ui.wake();
    }

    fn set_text(&mut self, text: &str) {
        self.ui
            .send_best_effort(UiCommand::SplashText(text.to_string()));
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.ui.send_best_effort(UiCommand::CloseSplash);
        }
    }
}

impl Toolkit for EguiToolkit {
    type Splash = EguiSplash;

    fn platform(&self) -> Platform {
        self.platform
    }

    fn set_app_name(&mut self, name: &str) {
        self.ui
            .send_best_effort(UiCommand::SetAppName(name.to_string()));
    }

    fn show_splash(&mut self, image: SplashImage) -> Result<EguiSplash, GuiError> {
        self.ui.send(UiCommand::ShowSplash(image))?;
        Ok(EguiSplash {
            ui: self.ui.clone(),
            closed: false,
        })
    }

    fn yield_events(&mut self) {
        self.ui.wake();
    }

    fn show_frame(&mut self, mut frame: Box<dyn IdeFrame>) -> Result<(), GuiError> {
        frame.show();
        self.ui.send(UiCommand::ShowFrame(frame))
    }

    fn main_loop(&mut self) -> Result<(), GuiError> {
        // Nothing is ever sent; the receive ends when the window is torn down.
        let _ = self.window_alive.recv();
        Ok(())
    }
}

enum Stage {
    Starting,
    Splash {
        texture: egui::TextureHandle,
        text: String,
    },
    Workspace(Box<dyn IdeFrame>),
}

struct BootstrapApp {
    commands: Receiver<UiCommand>,
    _alive: Sender<()>,
    stage: Stage,
}

impl BootstrapApp {
    fn apply(&mut self, ctx: &egui::Context, command: UiCommand) {
        match command {
            UiCommand::SetAppName(name) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(name));
            }
            UiCommand::ShowSplash(image) => {
                let color = egui::ColorImage::from_rgba_unmultiplied(image.size, &image.rgba);
                let texture = ctx.load_texture("splash", color, egui::TextureOptions::LINEAR);
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    image.size[0] as f32,
                    image.size[1] as f32,
                )));
                self.stage = Stage::Splash {
                    texture,
                    text: String::new(),
                };
            }
            UiCommand::RaiseSplash => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            UiCommand::SplashText(new_text) => {
                if let Stage::Splash { text, .. } = &mut self.stage {
                    *text = new_text;
                }
            }
            UiCommand::CloseSplash => {
                if matches!(self.stage, Stage::Splash { .. }) {
                    self.stage = Stage::Starting;
                }
            }
            UiCommand::ShowFrame(frame) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(frame.title()));
                ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    FRAME_SIZE[0],
                    FRAME_SIZE[1],
                )));
                self.stage = Stage::Workspace(frame);
            }
            UiCommand::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

impl eframe::App for BootstrapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(command) = self.commands.try_recv() {
            self.apply(ctx, command);
        }

        match &mut self.stage {
            Stage::Starting => {
                egui::CentralPanel::default().show(ctx, |_ui| {});
            }
            Stage::Splash { texture, text } => draw_splash(ctx, texture, text),
            Stage::Workspace(frame) => frame.ui(ctx),
        }

        ctx.request_repaint_after(COMMAND_POLL);
    }
}

fn draw_splash(ctx: &egui::Context, texture: &egui::TextureHandle, text: &str) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let response = ui.image((texture.id(), texture.size_vec2()));
            if !text.is_empty() {
                ui.painter().text(
                    response.rect.center_bottom() - egui::vec2(0.0, SPLASH_TEXT_MARGIN),
                    egui::Align2::CENTER_BOTTOM,
                    text,
                    egui::FontId::proportional(13.0),
                    egui::Color32::BLACK,
                );
            }
        });
}

/// Run `bootstrap` on a worker thread while the native event loop owns the main thread.
///
/// Returns once the window has closed and the worker has finished.
pub fn run_shell<F>(app_name: &str, bootstrap: F) -> Result<(), LaunchError>
where
    F: FnOnce(EguiToolkit) -> Result<(), LaunchError> + Send + 'static,
{
    let (commands_tx, commands_rx) = mpsc::channel();
    let (alive_tx, alive_rx) = mpsc::channel::<()>();
    let ctx_slot: Arc<OnceLock<egui::Context>> = Arc::new(OnceLock::new());

    let ui = UiHandle {
        commands: commands_tx,
        ctx: Arc::clone(&ctx_slot),
    };
    let toolkit = EguiToolkit {
        ui: ui.clone(),
        window_alive: alive_rx,
        platform: Platform::current(),
    };

    let worker = thread::Builder::new()
        .name("bootstrap".into())
        .spawn(move || {
            let result = bootstrap(toolkit);
            // Close the window if startup stopped early; harmless after a normal exit.
            let _ = ui.send(UiCommand::Quit);
            result
        })
        .map_err(|source| LaunchError::Spawn { source })?;

    let app = BootstrapApp {
        commands: commands_rx,
        _alive: alive_tx,
        stage: Stage::Starting,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(app_name)
            .with_inner_size(STARTUP_SIZE)
            .with_decorations(false),
        ..Default::default()
    };
    let native = eframe::run_native(
        app_name,
        options,
        Box::new(move |cc| {
            let _ = ctx_slot.set(cc.egui_ctx.clone());
            Ok(Box::new(app))
        }),
    );

    let bootstrap_result = worker
        .join()
        .map_err(|_| LaunchError::BootstrapPanicked)?;
    native.map_err(|err| GuiError::EventLoop {
        message: err.to_string(),
    })?;

    match bootstrap_result {
        // The user closed the window while startup was still talking to it.
        Err(LaunchError::Gui(GuiError::Disconnected)) => Ok(()),
        other => other,
    }
}
