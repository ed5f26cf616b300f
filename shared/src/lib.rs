use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct PredictResponse {
    pub text: String,
    pub sentiment: String,
    pub confidence: f32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ModelInfo {
    pub loaded: bool,
    pub model_type: String,
    pub algorithm: String,
    pub classes: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ItemCreate {
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ModelRegistration {
    pub model_id: i64,
    pub name: String,
    pub version: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct RegisteredModel {
    pub model_id: i64,
    pub name: String,
    pub version: String,
    pub description: String,
    pub registered_at: DateTime<Utc>,
}
