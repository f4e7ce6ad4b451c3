#![windows_subsystem = "windows"]
//! California Housing Price Predictor - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod features;
mod model;
mod prediction;
mod settings;
mod theme;
mod ui;
mod utils;

use app::{App, LoadFailure};
use constants::*;
use eframe::egui;
use model::{ModelCache, Predictor};
use std::sync::Arc;
use tracing::{error, info};
use utils::{get_data_dir, resolve_model_path};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,california_housing_predictor=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "California Housing Price Predictor starting");

    let settings = settings::Settings::load(&data_dir);

    // Load the model once, before any window exists; a missing or corrupt
    // artifact means there is nothing to serve.
    let model_path = resolve_model_path(settings.model_path_override().as_deref());
    let cache = ModelCache::new();
    let predictor: Arc<dyn Predictor> = match cache.get_or_load(&model_path) {
        Ok(model) => model as Arc<dyn Predictor>,
        Err(e) => {
            error!(error = %e, path = %model_path.display(), "Failed to load model");
            show_load_failure(LoadFailure::new(&model_path, &e));
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(theme::WINDOW_SIZE.0, theme::WINDOW_SIZE.1)))
        .with_min_inner_size([theme::WINDOW_MIN_SIZE.0, theme::WINDOW_MIN_SIZE.1])
        .with_title(APP_NAME);

    if let Some((rgba, width, height)) = theme::rasterize_icon(256) {
        viewport = viewport.with_icon(Arc::new(egui::IconData { rgba, width, height }));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, predictor, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

/// Without a console the log file is the only other trace, so put the load
/// error in front of the user before exiting.
fn show_load_failure(failure: LoadFailure) {
    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([app::fatal::WINDOW_SIZE.0, app::fatal::WINDOW_SIZE.1])
        .with_resizable(false)
        .with_title(APP_NAME);
    if let Some((rgba, width, height)) = theme::rasterize_icon(256) {
        viewport = viewport.with_icon(Arc::new(egui::IconData { rgba, width, height }));
    }
    let options = eframe::NativeOptions {
        viewport,
        centered: true,
        ..Default::default()
    };
    let result = eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            LoadFailure::setup(&cc.egui_ctx);
            Ok(Box::new(failure))
        }),
    );
    if let Err(e) = result {
        error!(error = %e, "Could not open the load failure window");
    }
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(theme::SPACING_XL))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                            self.render_page(ui);
                        });
                    });
                });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down, saving settings");
        self.save_settings();
    }
}
