use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::warn;

use tablemate::config::{EnvConfig, CONFIG};
use tablemate::db::memory::MemoryStore;
use tablemate::db::postgres_service::PostgresService;
use tablemate::db::Store;
use tablemate::routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let store: Arc<dyn Store> = match &config.db_url {
        Some(uri) => Arc::new(
            PostgresService::new(uri)
                .await
                .expect("Failed to initialize PostgresService"),
        ),
        None => {
            warn!("POSTGRES_URI not set, running on the in-memory store");
            Arc::new(MemoryStore::default())
        }
    };

    CONFIG.set(config).ok();

    println!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&store)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
