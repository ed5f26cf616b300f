use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, error, web};
use log::error;
use serde::Serialize;
use serde_json::json;
use shared::{ItemCreate, ModelRegistration, PredictRequest, PredictResponse};

use crate::catalog::items::ItemStore;
use crate::catalog::registry::ModelRegistry;
use crate::catalog::CatalogError;
use crate::sentiment::lifecycle::{ModelLifecycle, ModelStatus, PredictError};

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

impl ErrorDetail {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/ready").route(web::get().to(ready)))
        .service(web::resource("/model/info").route(web::get().to(model_info)))
        .service(web::resource("/predict").route(web::post().to(predict)))
        .service(
            web::resource("/items")
                .route(web::get().to(list_items))
                .route(web::post().to(create_item)),
        )
        .service(web::resource("/items/{item_id}").route(web::get().to(get_item)))
        .service(
            web::resource("/models")
                .route(web::get().to(list_models))
                .route(web::post().to(register_model)),
        )
        .service(web::resource("/models/{model_id}").route(web::get().to(get_model)));
}

// Malformed or missing JSON bodies answer 422, matching the wire contract
// the clients already expect.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let detail = err.to_string();
    error::InternalError::from_response(
        err,
        HttpResponse::UnprocessableEntity().json(ErrorDetail::new(detail)),
    )
    .into()
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "online",
        "service": "sentiment-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness. Never reflects model problems; answering at all is the signal.
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "healthy"}))
}

/// Readiness. Only a `Ready` lifecycle admits traffic.
async fn ready(lifecycle: web::Data<ModelLifecycle>) -> HttpResponse {
    if lifecycle.status() == ModelStatus::Ready {
        HttpResponse::Ok().json(json!({"status": "ready", "model_loaded": true}))
    } else {
        HttpResponse::ServiceUnavailable().json(ErrorDetail::new("Model not loaded"))
    }
}

async fn model_info(lifecycle: web::Data<ModelLifecycle>) -> HttpResponse {
    match lifecycle.info() {
        Some(info) => HttpResponse::Ok().json(info),
        None => HttpResponse::ServiceUnavailable().json(ErrorDetail::new("Model not loaded")),
    }
}

async fn predict(
    lifecycle: web::Data<ModelLifecycle>,
    body: web::Json<PredictRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    match lifecycle.predict(&request.text) {
        Ok(prediction) => HttpResponse::Ok().json(PredictResponse {
            text: request.text,
            sentiment: prediction.label,
            confidence: prediction.confidence,
        }),
        Err(e @ PredictError::EmptyText) => {
            HttpResponse::UnprocessableEntity().json(ErrorDetail::new(e.to_string()))
        }
        Err(e @ PredictError::ModelUnavailable) => {
            error!("Prediction rejected: {}", e);
            HttpResponse::ServiceUnavailable().json(ErrorDetail::new("Model not loaded"))
        }
    }
}

async fn create_item(store: web::Data<ItemStore>, body: web::Json<ItemCreate>) -> HttpResponse {
    let item = body.into_inner();
    match store.create(&item.name, &item.description) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => HttpResponse::UnprocessableEntity().json(ErrorDetail::new(e.to_string())),
    }
}

async fn list_items(store: web::Data<ItemStore>) -> HttpResponse {
    HttpResponse::Ok().json(store.list())
}

async fn get_item(store: web::Data<ItemStore>, path: web::Path<i64>) -> HttpResponse {
    match store.get(path.into_inner()) {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(_) => HttpResponse::NotFound().json(ErrorDetail::new("Item not found")),
    }
}

async fn register_model(
    registry: web::Data<ModelRegistry>,
    body: web::Json<ModelRegistration>,
) -> HttpResponse {
    match registry.register(body.into_inner()) {
        Ok(registered) => HttpResponse::Created().json(registered),
        Err(e @ CatalogError::Duplicate(_)) => {
            HttpResponse::BadRequest().json(ErrorDetail::new(e.to_string()))
        }
        Err(e) => HttpResponse::UnprocessableEntity().json(ErrorDetail::new(e.to_string())),
    }
}

async fn list_models(registry: web::Data<ModelRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.list())
}

async fn get_model(registry: web::Data<ModelRegistry>, path: web::Path<i64>) -> HttpResponse {
    match registry.get(path.into_inner()) {
        Ok(model) => HttpResponse::Ok().json(model),
        Err(_) => HttpResponse::NotFound().json(ErrorDetail::new("Model not found")),
    }
}
