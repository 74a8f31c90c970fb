//! Entry point for the egui-based TelePredict UI.
use eframe::egui;
use telepredict::config::{self, AppConfig};
use telepredict::egui_app::controller::EguiController;
use telepredict::egui_app::ui::EguiApp;
use telepredict::logging::{self, LogTarget};

const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 520.0);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logging = match logging::init(LogTarget::Desktop) {
        Ok(handle) => {
            if let Some(path) = handle.log_path() {
                tracing::info!("Logging to {}", path.display());
            }
            Some(handle)
        }
        Err(err) => {
            eprintln!("Logging disabled: {err}");
            None
        }
    };

    let config = load_config();
    let viewport = egui::ViewportBuilder::default()
        .with_title("TelePredict")
        .with_inner_size(egui::vec2(1024.0, 720.0))
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "TelePredict",
        native_options,
        Box::new(move |_cc| match EguiController::from_config(&config) {
            Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
            Err(err) => Ok(Box::new(LaunchError {
                message: format!("Invalid API configuration: {err}"),
            })),
        }),
    )?;
    Ok(())
}

/// Load settings, writing defaults on first launch; any failure falls back to defaults.
fn load_config() -> AppConfig {
    match config::config_path() {
        Ok(path) if !path.exists() => {
            if let Err(err) = config::save_to_path(&AppConfig::default(), &path) {
                tracing::warn!("Failed to write default config: {err}");
            } else {
                tracing::info!("Wrote default config to {}", path.display());
            }
        }
        Ok(_) => {}
        Err(err) => tracing::warn!("Config directory unavailable: {err}"),
    }
    match config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to load config, using defaults: {err}");
            let mut config = AppConfig::default();
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
    }
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
