//! Reusable UI components
//!
//! Labeled form controls bound to `FieldBounds`, plus status banners.
//! Every control is meant to sit inside a two-column `egui::Grid`.

use crate::features::{FieldBounds, OceanProximity, OCEAN_PROXIMITY_LABEL};
use crate::theme;
use eframe::egui;

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add_sized(
        [theme::LABEL_WIDTH, 18.0],
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        ),
    );
}

/// Continuous slider, e.g. longitude
pub fn slider_f64(ui: &mut egui::Ui, bounds: &FieldBounds<f64>, value: &mut f64, decimals: usize) {
    field_label(ui, bounds.label);
    ui.add(
        egui::Slider::new(value, bounds.min..=bounds.max)
            .step_by(bounds.step)
            .fixed_decimals(decimals),
    );
    ui.end_row();
}

/// Whole-number slider, e.g. housing median age
pub fn slider_u32(ui: &mut egui::Ui, bounds: &FieldBounds<u32>, value: &mut u32) {
    field_label(ui, bounds.label);
    ui.add(egui::Slider::new(value, bounds.min..=bounds.max).step_by(bounds.step as f64));
    ui.end_row();
}

/// Typed number field with -/+ stepping buttons
pub fn number_input(ui: &mut egui::Ui, bounds: &FieldBounds<u32>, value: &mut u32) {
    field_label(ui, bounds.label);
    ui.horizontal(|ui| {
        ui.add_sized(
            [120.0, 22.0],
            egui::DragValue::new(value)
                .range(bounds.min..=bounds.max)
                .speed(bounds.step as f64),
        );
        if ui.small_button(egui_phosphor::regular::MINUS).clicked() {
            *value = bounds.step_down(*value);
        }
        if ui.small_button(egui_phosphor::regular::PLUS).clicked() {
            *value = bounds.step_up(*value);
        }
    });
    ui.end_row();
}

/// Dropdown over the five ocean proximity labels
pub fn ocean_proximity_select(ui: &mut egui::Ui, value: &mut OceanProximity) {
    field_label(ui, OCEAN_PROXIMITY_LABEL);
    egui::ComboBox::from_id_salt("ocean_proximity")
        .selected_text(value.label())
        .width(160.0)
        .show_ui(ui, |ui| {
            for option in OceanProximity::ALL {
                ui.selectable_value(value, option, option.label());
            }
        });
    ui.end_row();
}

/// Full-width tinted message with a leading icon
pub fn banner(ui: &mut egui::Ui, icon: &str, text: &str, color: egui::Color32) {
    theme::banner_frame(color).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(icon).size(theme::FONT_HEADING).color(color));
            ui.label(
                egui::RichText::new(text)
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_PRIMARY),
            );
        });
    });
}

pub fn caption(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_CAPTION)
            .color(theme::TEXT_DIM),
    );
}
