mod config;
mod errors;
mod models;
mod slice;
mod openapi;
mod routes;

use config::AppConfig;
use dotenvy::dotenv;
use errors::CustomError;
use ntex::web::{middleware, App, HttpServer};

#[ntex::main]
async fn main() -> Result<(), CustomError> {
    dotenv().ok();

    // log，未设置 RUST_LOG 时默认 info
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;
    log::info!(
        "slicer backend listening on {} with {} workers",
        config.bind_addr,
        config.workers
    );

    HttpServer::new(|| {
        App::new()
            .wrap(routes::cors())
            .wrap(middleware::Logger::default())
            .configure(routes::route)
    })
    .workers(config.workers)
    .bind(&config.bind_addr)?
    .run()
    .await?;

    Ok(())
}
