//! Page layout: header, feature form, validation gate, predict action, result

use super::{App, Shown};
use crate::constants::{FEATURES_HEADING, PAGE_INTRO, PAGE_TITLE, PREDICT_BUTTON};
use crate::features::{
    HOUSEHOLDS, HOUSING_MEDIAN_AGE, LATITUDE, LONGITUDE, MEDIAN_INCOME, POPULATION,
    TOTAL_BEDROOMS, TOTAL_ROOMS,
};
use crate::prediction::{self, PROVENANCE_CAPTION};
use crate::theme;
use crate::ui::components::{
    banner, caption, number_input, ocean_proximity_select, slider_f64, slider_u32,
};
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    /// Whole page, top to bottom. Runs every frame.
    pub(crate) fn render_page(&mut self, ui: &mut egui::Ui) {
        self.render_header(ui);
        ui.separator();
        self.render_form(ui);

        // Validation gate: nothing below renders while the form is invalid
        let record = match prediction::check(&self.form) {
            Ok(record) => record,
            Err(reason) => {
                self.discard_stale(None);
                ui.add_space(theme::SPACING_MD);
                banner(ui, icons::WARNING, reason, theme::STATUS_WARNING);
                return;
            }
        };
        self.discard_stale(Some(&record));

        ui.add_space(theme::SPACING_MD);
        ui.separator();
        ui.add_space(theme::SPACING_MD);

        let label = format!("{}  {}", icons::CURRENCY_DOLLAR, PREDICT_BUTTON);
        let button = theme::button_accent(label).min_size(egui::vec2(0.0, theme::BUTTON_HEIGHT_LARGE));
        if ui.add(button).clicked() {
            self.press_predict();
        }

        ui.add_space(theme::SPACING_MD);
        self.render_result(ui);
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.add_space(theme::SPACING_XL);
        ui.label(
            egui::RichText::new(PAGE_TITLE)
                .size(theme::FONT_TITLE)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            egui::RichText::new(PAGE_INTRO)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_SECONDARY),
        );
        ui.add_space(theme::SPACING_SM);
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(format!("{}  {}", icons::CHART_BAR, FEATURES_HEADING))
                .size(theme::FONT_HEADING)
                .color(theme::ACCENT),
        );
        ui.add_space(theme::SPACING_SM);

        let form = &mut self.form;
        theme::card_frame().show(ui, |ui| {
            egui::Grid::new("house_features")
                .num_columns(2)
                .spacing([theme::SPACING_LG, theme::SPACING_MD])
                .show(ui, |ui| {
                    slider_f64(ui, &LONGITUDE, &mut form.longitude, 2);
                    slider_f64(ui, &LATITUDE, &mut form.latitude, 2);
                    slider_u32(ui, &HOUSING_MEDIAN_AGE, &mut form.housing_median_age);
                    number_input(ui, &TOTAL_ROOMS, &mut form.total_rooms);
                    number_input(ui, &TOTAL_BEDROOMS, &mut form.total_bedrooms);
                    number_input(ui, &POPULATION, &mut form.population);
                    number_input(ui, &HOUSEHOLDS, &mut form.households);
                    slider_f64(ui, &MEDIAN_INCOME, &mut form.median_income, 2);
                    ocean_proximity_select(ui, &mut form.ocean_proximity);
                });
        });
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        match &self.shown {
            Some(Shown::Estimate { estimate, .. }) => {
                banner(ui, icons::HOUSE, &estimate.message(), theme::STATUS_SUCCESS);
                caption(ui, PROVENANCE_CAPTION);
            }
            Some(Shown::Failure { message, .. }) => {
                banner(ui, icons::X_CIRCLE, message, theme::STATUS_ERROR);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::painted_text;
    use crate::features::{FeatureRecord, FormState, BEDROOMS_EXCEED_ROOMS};
    use crate::model::{HousingModel, ModelError, Predictor};
    use crate::settings::Settings;
    use std::path::PathBuf;
    use std::sync::Arc;

    struct Fixed(f64);

    impl Predictor for Fixed {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    fn app(predictor: Arc<dyn Predictor>) -> App {
        App::with_predictor(predictor, Settings::default(), PathBuf::from("."))
    }

    /// Run one headless frame of the page and return what was painted
    fn frame(app: &mut App) -> Vec<String> {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| app.render_page(ui));
        });
        painted_text(&output)
    }

    fn painted(text: &[String], needle: &str) -> bool {
        text.iter().any(|t| t.contains(needle))
    }

    #[test]
    fn valid_form_shows_the_predict_button() {
        let text = frame(&mut app(Arc::new(Fixed(1.0))));
        assert!(painted(&text, PREDICT_BUTTON));
        assert!(!painted(&text, BEDROOMS_EXCEED_ROOMS));
        assert!(!painted(&text, "Estimated Median House Value"));
    }

    #[test]
    fn blocked_form_shows_only_the_warning() {
        let mut app = app(Arc::new(Fixed(250_000.0)));
        app.press_predict();
        assert!(app.shown.is_some());

        app.form = FormState {
            total_rooms: 100,
            total_bedrooms: 200,
            ..FormState::default()
        };
        let text = frame(&mut app);

        assert!(app.shown.is_none());
        assert!(painted(&text, BEDROOMS_EXCEED_ROOMS));
        assert!(!painted(&text, PREDICT_BUTTON));
        assert!(!painted(&text, "Estimated Median House Value"));
        assert!(!painted(&text, PROVENANCE_CAPTION));
    }

    #[test]
    fn equal_rooms_and_bedrooms_pass_the_gate() {
        let mut app = app(Arc::new(Fixed(1.0)));
        app.form.total_rooms = 800;
        app.form.total_bedrooms = 800;
        let text = frame(&mut app);
        assert!(painted(&text, PREDICT_BUTTON));
        assert!(!painted(&text, BEDROOMS_EXCEED_ROOMS));
    }

    #[test]
    fn estimate_renders_with_its_caption() {
        let model = HousingModel::from_json(crate::model::tests::SAMPLE_ARTIFACT).unwrap();
        let mut app = app(Arc::new(model));
        app.press_predict();
        let text = frame(&mut app);
        assert!(painted(&text, "Estimated Median House Value: $201,667"));
        assert!(painted(&text, PROVENANCE_CAPTION));
    }

    #[test]
    fn edited_input_clears_the_rendered_estimate() {
        let mut app = app(Arc::new(Fixed(250_000.0)));
        app.press_predict();
        app.form.population += 1;
        let text = frame(&mut app);
        assert!(app.shown.is_none());
        assert!(painted(&text, PREDICT_BUTTON));
        assert!(!painted(&text, "Estimated Median House Value"));
    }
}
