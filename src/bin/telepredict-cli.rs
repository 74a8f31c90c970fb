//! CLI client that issues predict and retrain requests against the churn API.

use std::path::PathBuf;

use telepredict::churn_api::{
    ChurnBackend, CsvUpload, HttpChurnApi, PREDICT_FAILED_MESSAGE, PlanChoice, PlotImage,
    PredictionInput, RETRAIN_FAILED_MESSAGE,
};
use telepredict::config::{self, AppConfig};
use telepredict::egui_app::view_model;
use telepredict::logging::{self, LogTarget};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init(LogTarget::Cli) {
        eprintln!("Logging disabled: {err}");
    }
    let config = load_config(options.api.as_deref());
    let api = HttpChurnApi::new(&config.api).map_err(|err| err.to_string())?;
    match options.command {
        Command::Predict(input) => {
            let prediction = api.predict(&input).map_err(|err| {
                tracing::warn!("Prediction failed: {err}");
                err.user_message(PREDICT_FAILED_MESSAGE)
            })?;
            for line in view_model::prediction_lines(&prediction) {
                println!("{line}");
            }
        }
        Command::Retrain(path) => {
            let upload = CsvUpload::read(&path).map_err(|err| {
                tracing::warn!("Failed to read {}: {err}", path.display());
                RETRAIN_FAILED_MESSAGE.to_string()
            })?;
            let report = api.retrain(&upload).map_err(|err| {
                tracing::warn!("Retrain failed: {err}");
                err.user_message(RETRAIN_FAILED_MESSAGE)
            })?;
            for line in view_model::metrics_lines(&report.metrics) {
                println!("{line}");
            }
            if let Some(plot) = &report.plot {
                println!("Plot: {}", plot_summary(plot));
            }
        }
    }
    Ok(())
}

fn load_config(api_override: Option<&str>) -> AppConfig {
    let mut config = config::load_or_default().unwrap_or_else(|err| {
        tracing::warn!("Failed to load config, using defaults: {err}");
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    });
    if let Some(url) = api_override {
        config.api.set_base_url(url);
    }
    config
}

fn plot_summary(plot: &PlotImage) -> String {
    match plot {
        PlotImage::Inline { mime, bytes } => format!("inline {mime} ({} bytes)", bytes.len()),
        PlotImage::Remote(url) => url.to_string(),
    }
}

#[derive(Debug, PartialEq)]
enum Command {
    Predict(PredictionInput),
    Retrain(PathBuf),
}

#[derive(Debug, PartialEq)]
struct Options {
    command: Command,
    api: Option<String>,
}

#[derive(Default)]
struct PredictFlags {
    account_length: Option<u32>,
    international_plan: Option<PlanChoice>,
    voice_mail_plan: Option<PlanChoice>,
    day_minutes: Option<f64>,
    eve_minutes: Option<f64>,
    night_minutes: Option<f64>,
    intl_minutes: Option<f64>,
}

impl PredictFlags {
    fn into_input(self) -> Result<PredictionInput, String> {
        Ok(PredictionInput {
            account_length: required(self.account_length, "--account-length")?,
            international_plan: required(self.international_plan, "--international-plan")?,
            voice_mail_plan: required(self.voice_mail_plan, "--voice-mail-plan")?,
            total_day_minutes: required(self.day_minutes, "--day-minutes")?,
            total_eve_minutes: required(self.eve_minutes, "--eve-minutes")?,
            total_night_minutes: required(self.night_minutes, "--night-minutes")?,
            total_intl_minutes: required(self.intl_minutes, "--intl-minutes")?,
        })
    }
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("{flag} is required\n\n{}", help_text()))
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut args = args.into_iter();
    let command = match args.next().as_deref() {
        None | Some("-h" | "--help") => {
            println!("{}", help_text());
            return Ok(None);
        }
        Some("predict") => "predict",
        Some("retrain") => "retrain",
        Some(unknown) => {
            return Err(format!("Unknown command: {unknown}\n\n{}", help_text()));
        }
    };
    let mut api = None;
    let mut file = None;
    let mut flags = PredictFlags::default();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| format!("{flag} requires a value"));
        match (command, arg.as_str()) {
            (_, "-h" | "--help") => {
                println!("{}", help_text());
                return Ok(None);
            }
            (_, "--api") => api = Some(value("--api")?),
            ("retrain", "--file") => file = Some(PathBuf::from(value("--file")?)),
            ("predict", "--account-length") => {
                let raw = value("--account-length")?;
                let parsed = raw.trim().parse::<u32>().map_err(|_| {
                    format!("--account-length expects a non-negative integer, got {raw:?}")
                })?;
                flags.account_length = Some(parsed);
            }
            ("predict", "--international-plan") => {
                flags.international_plan = Some(value("--international-plan")?.parse()?);
            }
            ("predict", "--voice-mail-plan") => {
                flags.voice_mail_plan = Some(value("--voice-mail-plan")?.parse()?);
            }
            ("predict", "--day-minutes") => {
                flags.day_minutes = Some(parse_minutes("--day-minutes", &value("--day-minutes")?)?);
            }
            ("predict", "--eve-minutes") => {
                flags.eve_minutes = Some(parse_minutes("--eve-minutes", &value("--eve-minutes")?)?);
            }
            ("predict", "--night-minutes") => {
                flags.night_minutes =
                    Some(parse_minutes("--night-minutes", &value("--night-minutes")?)?);
            }
            ("predict", "--intl-minutes") => {
                flags.intl_minutes =
                    Some(parse_minutes("--intl-minutes", &value("--intl-minutes")?)?);
            }
            (_, unknown) => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
    }

    let command = if command == "predict" {
        Command::Predict(flags.into_input()?)
    } else {
        Command::Retrain(required(file, "--file")?)
    };
    Ok(Some(Options { command, api }))
}

fn parse_minutes(flag: &str, raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(format!("{flag} expects a non-negative number, got {raw:?}")),
    }
}

fn help_text() -> String {
    [
        "telepredict-cli",
        "",
        "Requests churn predictions and model retraining from the churn API.",
        "",
        "Usage:",
        "  telepredict-cli predict --account-length <n> --international-plan <Yes|No>",
        "                          --voice-mail-plan <Yes|No> --day-minutes <x>",
        "                          --eve-minutes <x> --night-minutes <x> --intl-minutes <x>",
        "  telepredict-cli retrain --file <data.csv>",
        "",
        "Options:",
        "  --api <url>   Base URL of the churn API (overrides config and TELEPREDICT_API_URL).",
        "  -h, --help    Show this help.",
    ]
    .join("\n")
}
