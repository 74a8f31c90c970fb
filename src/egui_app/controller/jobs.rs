use crate::churn_api::{ApiError, ChurnBackend, CsvUpload, Prediction, PredictionInput};
use crate::egui_app::state::RetrainView;
use std::{
    path::PathBuf,
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictFinished(PredictJobResult),
    RetrainFinished(RetrainJobResult),
}

#[derive(Debug)]
pub(crate) struct PredictJob {
    pub(crate) input: PredictionInput,
}

#[derive(Debug)]
pub(crate) struct PredictJobResult {
    pub(crate) result: Result<Prediction, ApiError>,
}

#[derive(Debug)]
pub(crate) struct RetrainJob {
    pub(crate) path: PathBuf,
}

#[derive(Debug)]
pub(crate) struct RetrainJobResult {
    pub(crate) result: Result<RetrainView, ApiError>,
}

/// Spawns request workers and funnels their completions into one channel.
pub(crate) struct ControllerJobs {
    backend: Arc<dyn ChurnBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    predict_in_progress: bool,
    retrain_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn ChurnBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
            predict_in_progress: false,
            retrain_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn predict_in_progress(&self) -> bool {
        self.predict_in_progress
    }

    pub(super) fn retrain_in_progress(&self) -> bool {
        self.retrain_in_progress
    }

    pub(super) fn begin_predict(&mut self, job: PredictJob) {
        if self.predict_in_progress {
            return;
        }
        self.predict_in_progress = true;
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = backend.predict(&job.input);
            let _ = tx.send(JobMessage::PredictFinished(PredictJobResult { result }));
        });
    }

    pub(super) fn clear_predict(&mut self) {
        self.predict_in_progress = false;
    }

    pub(super) fn begin_retrain(&mut self, job: RetrainJob) {
        if self.retrain_in_progress {
            return;
        }
        self.retrain_in_progress = true;
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = run_retrain(backend.as_ref(), &job.path);
            let _ = tx.send(JobMessage::RetrainFinished(RetrainJobResult { result }));
        });
    }

    pub(super) fn clear_retrain(&mut self) {
        self.retrain_in_progress = false;
    }
}

/// Read the CSV, call the backend and decode any inline plot off the UI thread.
fn run_retrain(backend: &dyn ChurnBackend, path: &std::path::Path) -> Result<RetrainView, ApiError> {
    let upload = CsvUpload::read(path).map_err(|source| ApiError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let report = backend.retrain(&upload)?;
    let plot_pixels = match report.plot.as_ref().and_then(|plot| plot.decode()) {
        Some(Ok(pixels)) => Some(pixels),
        Some(Err(err)) => {
            tracing::warn!("Failed to decode training plot: {err}");
            None
        }
        None => None,
    };
    Ok(RetrainView {
        report,
        plot_pixels,
    })
}
