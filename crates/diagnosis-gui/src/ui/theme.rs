//! Dark clinical theme; pink accent for the form, red/green/yellow for verdicts.

use eframe::egui::{self, Color32, Stroke, Visuals};

pub const COLOR_MALIGNANT: Color32 = Color32::from_rgb(230, 70, 70);
pub const COLOR_BENIGN: Color32 = Color32::from_rgb(70, 200, 100);
pub const COLOR_ERROR: Color32 = Color32::from_rgb(230, 180, 50);
pub const COLOR_PRIMARY: Color32 = Color32::from_rgb(200, 60, 110);

const TEXT: Color32 = Color32::from_rgb(225, 222, 226);

fn clinical_visuals() -> Visuals {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT);
    // Slider rails and handles pick up the accent.
    visuals.selection.bg_fill = COLOR_PRIMARY;
    visuals.selection.stroke = Stroke::new(1.0, TEXT);
    visuals
}

pub fn apply_theme(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        style.visuals = clinical_visuals();
        style.spacing.slider_width = 180.0;
        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    });
}
