use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Status shown before anything has been submitted.
    pub fn idle() -> Self {
        Self {
            text: "Ready".into(),
            badge_label: style::status_badge_label(StatusTone::Idle).into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
        }
    }
}
