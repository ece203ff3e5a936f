use actix_files as fs;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use crate::config::AppConfig;

mod config;
mod errors;
mod form;
mod models;
mod routes;
mod utils;

#[cfg(test)]
mod test_util;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let host = config.host.clone();
    let port = config.port;
    info!(
        "Submissions wait {:?} before acknowledgement, uploads capped at {} bytes",
        config.submit_delay, config.max_payload_bytes
    );
    info!("Starting server on http://{}:{}...", host, port);

    let config = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            // --- Logging Middleware ---
            .wrap(actix_web::middleware::Logger::default())
            // Serve static files
            .service(fs::Files::new("/static", "./src/static"))
            .service(routes::landing::landing_handler)
            .service(routes::landing::submit_form_handler)
            .service(routes::upload::upload_handler)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
