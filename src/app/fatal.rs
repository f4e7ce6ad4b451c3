//! Stand-in window shown when the model artifact cannot be loaded at startup

use crate::model::ModelError;
use crate::theme;
use crate::ui::components::{banner, caption};
use eframe::egui;
use egui_phosphor::regular as icons;
use std::path::{Path, PathBuf};

pub const LOAD_FAILURE_HEADING: &str = "The house value model could not be loaded";

pub const LOAD_FAILURE_HINT: &str =
    "Place housing_price_model.json in the working directory or next to the executable, \
     or set model_path in settings.json.";

pub const WINDOW_SIZE: (f32, f32) = (520.0, 260.0);

pub struct LoadFailure {
    pub(crate) path: PathBuf,
    pub(crate) message: String,
}

impl LoadFailure {
    pub fn new(path: &Path, error: &ModelError) -> Self {
        Self {
            path: path.to_path_buf(),
            message: error.to_string(),
        }
    }

    /// Fonts and visuals for a context that has never seen `App::new`
    pub fn setup(ctx: &egui::Context) {
        ctx.set_theme(egui::Theme::Dark);
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        ctx.set_fonts(fonts);
        theme::apply_visuals(ctx);
    }

    /// Returns true when the user asked to close the window
    pub(crate) fn render(&self, ui: &mut egui::Ui) -> bool {
        ui.label(
            egui::RichText::new(LOAD_FAILURE_HEADING)
                .size(theme::FONT_HEADING)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(theme::SPACING_MD);
        banner(ui, icons::X_CIRCLE, &self.message, theme::STATUS_ERROR);
        ui.add_space(theme::SPACING_SM);
        caption(ui, &format!("Model path: {}", self.path.display()));
        caption(ui, LOAD_FAILURE_HINT);
        ui.add_space(theme::SPACING_MD);
        ui.add(theme::button_accent("Close")).clicked()
    }
}

impl eframe::App for LoadFailure {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(theme::SPACING_XL))
            .show(ctx, |ui| {
                if self.render(ui) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
    }
}
