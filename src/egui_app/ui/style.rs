use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_ice: Color32,
    pub accent_mint: Color32,
    pub warning: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(12, 16, 24),
        bg_secondary: Color32::from_rgb(22, 28, 40),
        bg_tertiary: Color32::from_rgb(36, 44, 60),
        panel_outline: Color32::from_rgb(44, 54, 72),
        grid_soft: Color32::from_rgb(30, 38, 52),
        text_primary: Color32::from_rgb(206, 214, 226),
        text_muted: Color32::from_rgb(140, 150, 168),
        accent_ice: Color32::from_rgb(96, 165, 250),
        accent_mint: Color32::from_rgb(110, 231, 183),
        warning: Color32::from_rgb(220, 120, 96),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_secondary;
    visuals.panel_fill = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.grid_soft;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_widget(&mut visuals.widgets.inactive, palette);
    set_widget(&mut visuals.widgets.hovered, palette);
    set_widget(&mut visuals.widgets.active, palette);
    set_widget(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(6);
    visuals.menu_corner_radius = CornerRadius::same(4);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_widget(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(4);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn section_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub fn inner_border() -> Stroke {
    Stroke::new(1.0, palette().grid_soft)
}

pub fn card_fill() -> Color32 {
    palette().bg_secondary
}

/// Translucent fill painted behind modal popups.
pub fn modal_backdrop() -> Color32 {
    Color32::from_rgba_premultiplied(0, 0, 0, 160)
}

pub fn error_text() -> Color32 {
    palette().warning
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Busy",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
