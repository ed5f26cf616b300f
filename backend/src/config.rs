use std::env;

/// Settings are read from the environment exactly once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub model_path: String,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/sentiment_model.json".to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8081),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
