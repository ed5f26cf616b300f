use ndarray::Array1;
use serde::{Deserialize, Serialize};
use shared::ModelInfo;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("malformed model artifact: {0}")]
    Malformed(String),
}

/// Serialized pipeline: TF-IDF vectorizer plus binary logistic regression.
/// Produced offline by the `train` binary, read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentArtifact {
    pub model_type: String,
    pub algorithm: String,
    pub classes: Vec<String>,
    pub vocabulary: Vec<String>,
    pub idf: Vec<f32>,
    pub coefficients: Vec<f32>,
    pub intercept: f32,
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// Lowercased word unigrams plus adjacent-word bigrams.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect();
    let mut terms = words.clone();
    for pair in words.windows(2) {
        terms.push(format!("{} {}", pair[0], pair[1]));
    }
    terms
}

pub(crate) fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: Vec<String>,
    vocab_index: HashMap<String, usize>,
    idf: Array1<f32>,
}

impl TfidfVectorizer {
    pub(crate) fn new(vocabulary: Vec<String>, idf: Vec<f32>) -> Self {
        let vocab_index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self {
            vocabulary,
            vocab_index,
            idf: Array1::from(idf),
        }
    }

    /// Term counts weighted by idf, l2-normalized. Out-of-vocabulary terms
    /// contribute nothing.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut features = Array1::<f32>::zeros(self.vocabulary.len());
        for term in tokenize(text) {
            if let Some(&i) = self.vocab_index.get(&term) {
                features[i] += 1.0;
            }
        }
        features *= &self.idf;
        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }
        features
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}

pub struct SentimentModel {
    model_type: String,
    algorithm: String,
    classes: Vec<String>,
    vectorizer: TfidfVectorizer,
    coefficients: Array1<f32>,
    intercept: f32,
}

impl SentimentModel {
    pub fn from_artifact(artifact: SentimentArtifact) -> Result<Self, ArtifactError> {
        if artifact.classes.len() != 2 {
            return Err(ArtifactError::Malformed(format!(
                "expected exactly two classes, got {}",
                artifact.classes.len()
            )));
        }
        if artifact.idf.len() != artifact.vocabulary.len() {
            return Err(ArtifactError::Malformed(format!(
                "idf length {} does not match vocabulary length {}",
                artifact.idf.len(),
                artifact.vocabulary.len()
            )));
        }
        if artifact.coefficients.len() != artifact.vocabulary.len() {
            return Err(ArtifactError::Malformed(format!(
                "coefficient length {} does not match vocabulary length {}",
                artifact.coefficients.len(),
                artifact.vocabulary.len()
            )));
        }

        Ok(Self {
            model_type: artifact.model_type,
            algorithm: artifact.algorithm,
            classes: artifact.classes,
            vectorizer: TfidfVectorizer::new(artifact.vocabulary, artifact.idf),
            coefficients: Array1::from(artifact.coefficients),
            intercept: artifact.intercept,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let raw = fs::read_to_string(path)?;
        let artifact: SentimentArtifact = serde_json::from_str(&raw)?;
        Self::from_artifact(artifact)
    }

    /// Probability per class, ordered as `classes`. Class index 1 is the
    /// positive outcome of the sigmoid.
    pub fn predict_proba(&self, text: &str) -> [f32; 2] {
        let features = self.vectorizer.transform(text);
        let p = sigmoid(self.coefficients.dot(&features) + self.intercept);
        [1.0 - p, p]
    }

    /// Argmax over class probabilities; equal probabilities resolve to the
    /// lowest class index.
    pub fn predict(&self, text: &str) -> Prediction {
        let probs = self.predict_proba(text);
        let mut best = 0;
        for (i, p) in probs.iter().enumerate() {
            if *p > probs[best] {
                best = i;
            }
        }
        Prediction {
            label: self.classes[best].clone(),
            confidence: probs[best],
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            loaded: true,
            model_type: self.model_type.clone(),
            algorithm: self.algorithm.clone(),
            classes: self.classes.clone(),
        }
    }
}
