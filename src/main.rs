use std::io;
use std::sync::Arc;

use dotenvy::dotenv;
use simple_order::config::AppConfig;
use simple_order::{build_server, create_pool, run_migrations, DieselOrderRepository, OrderService};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(
        &config.database.connection_string(),
        config.database.pool_size,
    )
    .map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let service = OrderService::new(Arc::new(DieselOrderRepository::new(pool)));

    log::info!(
        "Starting server at http://{}:{}",
        config.app.host,
        config.app.port
    );

    build_server(service, &config.app.host, config.app.port)?.await
}
