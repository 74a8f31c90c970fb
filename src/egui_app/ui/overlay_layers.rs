use eframe::egui::{self, Color32, Id, LayerId, Order};

/// Stacking tiers for popups drawn above the landing view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OverlayLayer {
    /// Dimmed fill that blocks input to the landing view.
    Backdrop,
    /// Popup windows; combo box lists still open above them.
    Modal,
}

impl OverlayLayer {
    pub(super) fn order(self) -> Order {
        match self {
            Self::Backdrop => Order::Middle,
            Self::Modal => Order::Foreground,
        }
    }

    pub(super) fn layer_id(self, id: impl Into<Id>) -> LayerId {
        LayerId::new(self.order(), id.into())
    }
}

/// Dim the viewport and swallow pointer input behind a modal popup.
pub(super) fn modal_backdrop(ctx: &egui::Context, id: impl Into<Id>, color: Color32) {
    let id = id.into();
    let rect = ctx.viewport_rect();
    let painter = ctx.layer_painter(OverlayLayer::Backdrop.layer_id(id.with("backdrop_paint")));
    painter.rect_filled(rect, 0.0, color);
    egui::Area::new(id.with("backdrop_blocker"))
        .order(OverlayLayer::Backdrop.order())
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            ui.allocate_rect(rect, egui::Sense::click_and_drag());
        });
}
