//! Default main window: shows which project and build directory were opened.
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{IdeFrame, IdeFrameFactory, ViewportId};
use crate::lib::{errors::GuiError, version::APP_TITLE};

#[derive(Debug, Clone)]
pub struct WorkspaceFrame {
    title: String,
    project_path: Option<PathBuf>,
    build_path: Option<PathBuf>,
    shown: bool,
}

impl WorkspaceFrame {
    pub fn new(project_path: Option<&Path>, build_path: Option<&Path>) -> Self {
        let title = match project_path
            .and_then(|p| p.file_stem())
            .map(|stem| stem.to_string_lossy())
        {
            Some(stem) => format!("{APP_TITLE} - {stem}"),
            None => APP_TITLE.to_string(),
        };
        Self {
            title,
            project_path: project_path.map(Path::to_path_buf),
            build_path: build_path.map(Path::to_path_buf),
            shown: false,
        }
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    pub fn build_path(&self) -> Option<&Path> {
        self.build_path.as_deref()
    }
}

impl IdeFrame for WorkspaceFrame {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn show(&mut self) {
        self.shown = true;
    }

    fn is_shown(&self) -> bool {
        self.shown
    }

    fn ui(&mut self, ctx: &egui::Context) {
        if !self.shown {
            return;
        }
        egui::TopBottomPanel::top("workspace_header").show(ctx, |ui| {
            ui.heading(&self.title);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.project_path {
                Some(project) => ui.label(format!("Project: {}", project.display())),
                None => ui.label("No project opened"),
            };
            if let Some(build) = &self.build_path {
                ui.label(format!("Build directory: {}", build.display()));
            }
        });
    }
}

/// Builds [`WorkspaceFrame`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceFrameFactory;

impl IdeFrameFactory for WorkspaceFrameFactory {
    fn create(
        &self,
        parent: Option<ViewportId>,
        project_path: Option<&Path>,
        build_path: Option<&Path>,
    ) -> Result<Box<dyn IdeFrame>, GuiError> {
        debug!(
            target: "beremiz::gui",
            has_parent = parent.is_some(),
            project = ?project_path,
            build = ?build_path,
            "Creating main window"
        );
        Ok(Box::new(WorkspaceFrame::new(project_path, build_path)))
    }
}
