//! App module - contains the main application state and logic

pub mod fatal;
mod views;

pub use fatal::LoadFailure;

use crate::features::{FeatureRecord, FormState};
use crate::model::Predictor;
use crate::prediction::{self, Estimate, Outcome};
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

// ============================================================================
// APP STATE
// ============================================================================

/// What the result area shows, tied to the record it was produced for
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shown {
    Estimate { record: FeatureRecord, estimate: Estimate },
    Failure { record: FeatureRecord, message: String },
}

impl Shown {
    fn record(&self) -> &FeatureRecord {
        match self {
            Shown::Estimate { record, .. } | Shown::Failure { record, .. } => record,
        }
    }
}

pub struct App {
    pub(crate) form: FormState,
    pub(crate) predictor: Arc<dyn Predictor>,
    pub(crate) shown: Option<Shown>,
    // Window tracking
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        predictor: Arc<dyn Predictor>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for headings, banners and stepper buttons
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_predictor(predictor, settings, data_dir)
    }

    /// State without any egui context attached
    pub fn with_predictor(predictor: Arc<dyn Predictor>, settings: Settings, data_dir: PathBuf) -> Self {
        Self {
            form: FormState::default(),
            predictor,
            shown: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            settings,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    /// Drop a shown result once the inputs no longer match it, mirroring a
    /// fresh run of the form after any widget change.
    pub(crate) fn discard_stale(&mut self, current: Option<&FeatureRecord>) {
        let stale = match (&self.shown, current) {
            (Some(shown), Some(record)) => shown.record() != record,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if stale {
            self.shown = None;
        }
    }

    /// Predict button handler
    pub(crate) fn press_predict(&mut self) {
        let record = self.form.record();
        self.shown = match prediction::submit(&self.form, self.predictor.as_ref()) {
            Ok(Outcome::Estimated { record, estimate }) => Some(Shown::Estimate { record, estimate }),
            Ok(Outcome::Blocked { reason }) => {
                // The button is hidden while blocked, so this only happens on a racing edit
                warn!(reason, "Predict pressed on an invalid form");
                None
            }
            Err(e) => {
                error!(error = %e, ?record, "Prediction failed");
                Some(Shown::Failure {
                    record,
                    message: e.to_string(),
                })
            }
        };
    }
}

/// Every string painted in one frame, in paint order
#[cfg(test)]
pub(crate) fn painted_text(output: &egui::FullOutput) -> Vec<String> {
    fn collect(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect(s, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    for clipped in &output.shapes {
        collect(&clipped.shape, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HousingModel, ModelError};

    struct Fixed(f64);

    impl Predictor for Fixed {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl Predictor for Broken {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, ModelError> {
            Err(ModelError::NonFinite)
        }
    }

    fn app(predictor: Arc<dyn Predictor>) -> App {
        App::with_predictor(predictor, Settings::default(), PathBuf::from("."))
    }

    #[test]
    fn starts_with_default_form_and_no_result() {
        let app = app(Arc::new(Fixed(1.0)));
        assert_eq!(app.form, FormState::default());
        assert!(app.shown.is_none());
    }

    #[test]
    fn pressing_predict_shows_an_estimate() {
        let model = HousingModel::from_json(crate::model::tests::SAMPLE_ARTIFACT).unwrap();
        let mut app = app(Arc::new(model));
        app.press_predict();
        match &app.shown {
            Some(Shown::Estimate { estimate, .. }) => assert_eq!(estimate.formatted(), "$201,667"),
            other => panic!("expected estimate, got {other:?}"),
        }
    }

    #[test]
    fn result_survives_frames_with_unchanged_inputs() {
        let mut app = app(Arc::new(Fixed(250_000.0)));
        app.press_predict();
        let current = app.form.record();
        app.discard_stale(Some(&current));
        assert!(app.shown.is_some());
    }

    #[test]
    fn any_input_change_clears_the_result() {
        let mut app = app(Arc::new(Fixed(250_000.0)));
        app.press_predict();
        app.form.households += 5;
        let current = app.form.record();
        app.discard_stale(Some(&current));
        assert!(app.shown.is_none());
    }

    #[test]
    fn blocked_form_clears_the_result() {
        let mut app = app(Arc::new(Fixed(250_000.0)));
        app.press_predict();
        app.discard_stale(None);
        assert!(app.shown.is_none());
    }

    #[test]
    fn predictor_failure_is_shown_not_fatal() {
        let mut app = app(Arc::new(Broken));
        app.press_predict();
        match &app.shown {
            Some(Shown::Failure { message, .. }) => assert!(message.contains("non-finite")),
            other => panic!("expected failure, got {other:?}"),
        }
        // The form stays usable
        app.form.total_rooms = 3000;
        let current = app.form.record();
        app.discard_stale(Some(&current));
        assert!(app.shown.is_none());
    }

    #[test]
    fn saved_settings_keep_the_model_override() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            model_path: Some("/srv/model.json".into()),
            ..Settings::default()
        };
        let mut app = App::with_predictor(Arc::new(Fixed(1.0)), settings, dir.path().to_path_buf());
        app.window_size = Some(egui::vec2(600.0, 800.0));
        app.save_settings();

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.model_path.as_deref(), Some("/srv/model.json"));
        assert_eq!(loaded.window_w, Some(600.0));
        assert_eq!(loaded.window_x, None);
    }
}
