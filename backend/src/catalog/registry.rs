use chrono::Utc;
use shared::{ModelRegistration, RegisteredModel};
use std::sync::Mutex;

use super::CatalogError;

/// In-memory model registry. Unlike `ItemStore`, the caller supplies the id
/// and a second registration under the same id is rejected.
pub struct ModelRegistry {
    models: Mutex<Vec<RegisteredModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn register(&self, reg: ModelRegistration) -> Result<RegisteredModel, CatalogError> {
        if reg.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        let mut models = self.models.lock().unwrap();
        if models.iter().any(|m| m.model_id == reg.model_id) {
            return Err(CatalogError::Duplicate(reg.model_id));
        }
        let model = RegisteredModel {
            model_id: reg.model_id,
            name: reg.name,
            version: reg.version,
            description: reg.description,
            registered_at: Utc::now(),
        };
        models.push(model.clone());
        Ok(model)
    }

    pub fn list(&self) -> Vec<RegisteredModel> {
        self.models.lock().unwrap().clone()
    }

    pub fn get(&self, model_id: i64) -> Result<RegisteredModel, CatalogError> {
        self.models
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.model_id == model_id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
