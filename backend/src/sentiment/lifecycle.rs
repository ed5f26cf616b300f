use chrono::{DateTime, Utc};
use shared::ModelInfo;
use std::path::Path;
use std::sync::RwLock;

use super::model::{Prediction, SentimentModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

enum ModelState {
    Unloaded,
    Loading,
    Ready {
        model: SentimentModel,
        loaded_at: DateTime<Utc>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Text must not be empty")]
    EmptyText,
    #[error("Model not loaded")]
    ModelUnavailable,
}

/// Owns the single model handle for the process. Constructed once at
/// bootstrap, loaded before the server accepts connections, unloaded after
/// it stops. State is written twice per process lifetime and read on every
/// prediction request.
pub struct ModelLifecycle {
    state: RwLock<ModelState>,
}

impl ModelLifecycle {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ModelState::Unloaded),
        }
    }

    /// Startup hook. A failed load leaves the lifecycle in `Failed` and the
    /// process keeps serving its non-prediction endpoints; recovery is an
    /// operator fixing the artifact and restarting.
    pub fn load(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        *self.state.write().unwrap() = ModelState::Loading;
        match SentimentModel::load(path) {
            Ok(model) => {
                log::info!("Loaded sentiment model from {}", path.display());
                *self.state.write().unwrap() = ModelState::Ready {
                    model,
                    loaded_at: Utc::now(),
                };
            }
            Err(e) => {
                log::error!(
                    "Failed to load sentiment model from {}: {}",
                    path.display(),
                    e
                );
                *self.state.write().unwrap() = ModelState::Failed {
                    error: e.to_string(),
                };
            }
        }
    }

    /// Shutdown hook. Drops the model reference.
    pub fn unload(&self) {
        *self.state.write().unwrap() = ModelState::Unloaded;
        log::info!("Sentiment model unloaded");
    }

    /// Non-blocking state read; never triggers a load.
    pub fn status(&self) -> ModelStatus {
        match &*self.state.read().unwrap() {
            ModelState::Unloaded => ModelStatus::Unloaded,
            ModelState::Loading => ModelStatus::Loading,
            ModelState::Ready { .. } => ModelStatus::Ready,
            ModelState::Failed { .. } => ModelStatus::Failed,
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        match &*self.state.read().unwrap() {
            ModelState::Ready { loaded_at, .. } => Some(*loaded_at),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<String> {
        match &*self.state.read().unwrap() {
            ModelState::Failed { error } => Some(error.clone()),
            _ => None,
        }
    }

    pub fn info(&self) -> Option<ModelInfo> {
        match &*self.state.read().unwrap() {
            ModelState::Ready { model, .. } => Some(model.info()),
            _ => None,
        }
    }

    /// Input validation runs before the availability check: empty text is
    /// rejected the same way in every lifecycle state.
    pub fn predict(&self, text: &str) -> Result<Prediction, PredictError> {
        if text.trim().is_empty() {
            return Err(PredictError::EmptyText);
        }
        match &*self.state.read().unwrap() {
            ModelState::Ready { model, .. } => Ok(model.predict(text)),
            _ => Err(PredictError::ModelUnavailable),
        }
    }
}

impl Default for ModelLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::train::{TrainOptions, fit, training_corpus};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static ARTIFACT_SEQ: AtomicUsize = AtomicUsize::new(0);

    fn write_artifact() -> std::path::PathBuf {
        let (texts, labels) = training_corpus();
        let artifact = fit(&texts, &labels, &TrainOptions::default());
        let path = std::env::temp_dir().join(format!(
            "sentiment_model_{}_{}.json",
            std::process::id(),
            ARTIFACT_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();
        path
    }

    #[test]
    fn starts_unloaded() {
        let lifecycle = ModelLifecycle::new();
        assert_eq!(lifecycle.status(), ModelStatus::Unloaded);
        assert!(lifecycle.loaded_at().is_none());
        assert!(lifecycle.info().is_none());
    }

    #[test]
    fn missing_artifact_degrades_instead_of_crashing() {
        let lifecycle = ModelLifecycle::new();
        lifecycle.load("/nonexistent/sentiment_model.json");
        assert_eq!(lifecycle.status(), ModelStatus::Failed);
        assert!(lifecycle.last_error().is_some());
        assert!(matches!(
            lifecycle.predict("some text"),
            Err(PredictError::ModelUnavailable)
        ));
    }

    #[test]
    fn corrupt_artifact_records_failure() {
        let path = std::env::temp_dir().join(format!(
            "sentiment_model_corrupt_{}_{}.json",
            std::process::id(),
            ARTIFACT_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        fs::write(&path, "not json at all").unwrap();
        let lifecycle = ModelLifecycle::new();
        lifecycle.load(&path);
        assert_eq!(lifecycle.status(), ModelStatus::Failed);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn successful_load_reaches_ready() {
        let path = write_artifact();
        let lifecycle = ModelLifecycle::new();
        lifecycle.load(&path);
        assert_eq!(lifecycle.status(), ModelStatus::Ready);
        assert!(lifecycle.loaded_at().is_some());
        assert!(lifecycle.info().unwrap().loaded);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn handle_is_stable_across_requests() {
        let path = write_artifact();
        let lifecycle = ModelLifecycle::new();
        lifecycle.load(&path);
        // Deleting the artifact after load proves no per-request reload.
        fs::remove_file(&path).unwrap();
        let loaded_at = lifecycle.loaded_at().unwrap();
        for _ in 0..10 {
            lifecycle.predict("This product is amazing").unwrap();
            assert_eq!(lifecycle.loaded_at().unwrap(), loaded_at);
        }
    }

    #[test]
    fn unload_returns_to_unloaded() {
        let path = write_artifact();
        let lifecycle = ModelLifecycle::new();
        lifecycle.load(&path);
        lifecycle.unload();
        assert_eq!(lifecycle.status(), ModelStatus::Unloaded);
        assert!(matches!(
            lifecycle.predict("text"),
            Err(PredictError::ModelUnavailable)
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_text_is_rejected_in_every_state() {
        let unloaded = ModelLifecycle::new();
        assert!(matches!(
            unloaded.predict("   "),
            Err(PredictError::EmptyText)
        ));

        let failed = ModelLifecycle::new();
        failed.load("/nonexistent/sentiment_model.json");
        assert!(matches!(failed.predict(""), Err(PredictError::EmptyText)));

        let path = write_artifact();
        let ready = ModelLifecycle::new();
        ready.load(&path);
        assert!(matches!(ready.predict("  "), Err(PredictError::EmptyText)));
        fs::remove_file(&path).ok();
    }
}
