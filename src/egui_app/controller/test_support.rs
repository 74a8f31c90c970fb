use super::*;
use crate::churn_api::{
    ApiError, CsvUpload, ModelMetrics, PlotImage, Prediction, PredictionInput, RetrainReport,
};
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

type PredictReply = Box<dyn Fn() -> Result<Prediction, ApiError> + Send + Sync>;
type RetrainReply = Box<dyn Fn() -> Result<RetrainReport, ApiError> + Send + Sync>;

/// Backend double that records every call and answers with canned replies.
pub(super) struct FakeBackend {
    pub(super) predict_calls: Mutex<Vec<PredictionInput>>,
    pub(super) retrain_calls: Mutex<Vec<CsvUpload>>,
    predict_reply: PredictReply,
    retrain_reply: RetrainReply,
    retrain_gate: Mutex<Option<Receiver<()>>>,
}

impl FakeBackend {
    pub(super) fn new() -> Self {
        Self {
            predict_calls: Mutex::new(Vec::new()),
            retrain_calls: Mutex::new(Vec::new()),
            predict_reply: Box::new(|| Ok(prediction(0.823, true))),
            retrain_reply: Box::new(|| Ok(report(0.91, None))),
            retrain_gate: Mutex::new(None),
        }
    }

    pub(super) fn with_predict_reply(
        mut self,
        reply: impl Fn() -> Result<Prediction, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.predict_reply = Box::new(reply);
        self
    }

    pub(super) fn with_retrain_reply(
        mut self,
        reply: impl Fn() -> Result<RetrainReport, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.retrain_reply = Box::new(reply);
        self
    }

    /// Make retrain block until the returned sender fires.
    pub(super) fn gate_retrain(self) -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        *self.retrain_gate.lock().unwrap() = Some(rx);
        (self, tx)
    }

    pub(super) fn predict_count(&self) -> usize {
        self.predict_calls.lock().unwrap().len()
    }

    pub(super) fn retrain_count(&self) -> usize {
        self.retrain_calls.lock().unwrap().len()
    }
}

impl ChurnBackend for FakeBackend {
    fn predict(&self, input: &PredictionInput) -> Result<Prediction, ApiError> {
        self.predict_calls.lock().unwrap().push(input.clone());
        (self.predict_reply)()
    }

    fn retrain(&self, upload: &CsvUpload) -> Result<RetrainReport, ApiError> {
        self.retrain_calls.lock().unwrap().push(upload.clone());
        let gate = self.retrain_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.recv();
        }
        (self.retrain_reply)()
    }
}

pub(super) fn prediction(churn_probability: f64, churn_prediction: bool) -> Prediction {
    Prediction {
        churn_probability,
        churn_prediction,
    }
}

pub(super) fn report(accuracy: f64, plot: Option<PlotImage>) -> RetrainReport {
    RetrainReport {
        metrics: ModelMetrics {
            accuracy,
            precision: 0.8,
            recall: 0.7,
            f1_score: 0.75,
        },
        plot,
    }
}

pub(super) fn controller_with(backend: FakeBackend) -> (EguiController, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    let controller = EguiController::new(backend.clone());
    (controller, backend)
}

/// Poll until `done` holds, failing the test after a few seconds.
pub(super) fn poll_until(controller: &mut EguiController, done: impl Fn(&EguiController) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        controller.tick();
        if done(controller) {
            return;
        }
        assert!(Instant::now() < deadline, "timed out waiting for background job");
        std::thread::sleep(Duration::from_millis(5));
    }
}

pub(super) fn wait_for_idle(controller: &mut EguiController) {
    poll_until(controller, |controller| !controller.any_request_pending());
}

pub(super) fn write_csv(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, "account_length,churn\n128,False\n").unwrap();
    path
}
