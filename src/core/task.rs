//! Background manifest extraction.
//!
//! The UI side owns an [`ExtractionHandle`] while a "loading" prompt is up.
//! The worker sends its result exactly once; if the prompt is dismissed first
//! the worker is aborted and nothing is delivered.

use crate::core::ExtractorEngine;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Found(String),
    NotFound,
    /// The prompt went away before a result arrived.
    Dismissed,
}

pub struct ExtractionHandle {
    rx: oneshot::Receiver<Option<String>>,
    task: JoinHandle<()>,
}

/// Starts extracting the manifest of `landing_url` on a tokio worker.
pub fn spawn_extraction(engine: Arc<ExtractorEngine>, landing_url: String) -> ExtractionHandle {
    let (tx, rx) = oneshot::channel();
    let task = tokio::spawn(async move {
        let result = engine.extract_stream_url(&landing_url).await;
        if tx.send(result).is_err() {
            debug!("Extraction of {} finished after dismissal", landing_url);
        }
    });
    ExtractionHandle { rx, task }
}

impl ExtractionHandle {
    /// Waits for the worker's single result.
    pub async fn outcome(self) -> ExtractionOutcome {
        Self::outcome_of(self.rx.await)
    }

    /// Waits for the result unless `dismiss` completes first, in which case
    /// the worker is aborted.
    pub async fn outcome_or_dismiss<F>(mut self, dismiss: F) -> ExtractionOutcome
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            res = &mut self.rx => Self::outcome_of(res),
            _ = dismiss => {
                self.dismiss();
                ExtractionOutcome::Dismissed
            }
        }
    }

    /// Aborts the worker. Its result, if any, is never delivered.
    pub fn dismiss(self) {
        debug!("Extraction dismissed");
        self.task.abort();
    }

    fn outcome_of(
        res: std::result::Result<Option<String>, oneshot::error::RecvError>,
    ) -> ExtractionOutcome {
        match res {
            Ok(Some(url)) => ExtractionOutcome::Found(url),
            Ok(None) => ExtractionOutcome::NotFound,
            Err(_) => ExtractionOutcome::Dismissed,
        }
    }
}
