use actix_cors::Cors;
use actix_web::{App, HttpServer, web};

use backend::catalog::items::ItemStore;
use backend::catalog::registry::ModelRegistry;
use backend::config::Settings;
use backend::routes::configure_routes;
use backend::sentiment::lifecycle::ModelLifecycle;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let settings = Settings::from_env();
    if settings.database_url.is_some() {
        log::info!("DATABASE_URL configured; catalog persistence handled externally");
    } else {
        log::info!("No DATABASE_URL configured; using in-memory catalog stores");
    }

    // A failed load leaves the process alive: liveness and catalog endpoints
    // keep serving while /ready and /predict answer 503.
    let lifecycle = web::Data::new(ModelLifecycle::new());
    lifecycle.load(&settings.model_path);

    let items = web::Data::new(ItemStore::new());
    let registry = web::Data::new(ModelRegistry::new());

    let bind_address = settings.bind_address();
    log::info!("Starting server on {}", bind_address);

    let lifecycle_for_app = lifecycle.clone();
    let result = HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(lifecycle_for_app.clone())
            .app_data(items.clone())
            .app_data(registry.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await;

    lifecycle.unload();
    result
}
