use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;

use minimd_backend::{AppState, Config, Database, controllers, json_config, path_config};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Minimd note store v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let bind_address = config.bind_address.clone();
    let port = config.port;
    let max_body_bytes = config.max_body_bytes;

    log::info!("Initializing database at {}", config.database_url);
    let db = match Database::new(&config.database_url) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("Failed to initialize database: {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let state = web::Data::new(AppState::new(Arc::clone(&db), config));

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(json_config(max_body_bytes))
            .app_data(path_config())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::config)
    })
    .bind((bind_address.as_str(), port))?
    .run();

    log::info!("Listening on http://{}:{}", bind_address, port);

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
