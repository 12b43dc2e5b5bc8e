use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use taskboard::auth::TokenService;
use taskboard::config::Config;
use taskboard::error::AppError;
use taskboard::routes;
use taskboard::store::postgres::{PgTaskStore, PgUserStore};
use taskboard::store::{TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Fails fast when DATABASE_URL or JWT_SECRET is missing.
    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    log::info!("Connected to database");

    let tokens = web::Data::new(TokenService::new(&config.jwt_secret));
    let user_store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let task_store: Arc<dyn TaskStore> = Arc::new(PgTaskStore::new(pool));

    log::info!("Server running at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(
                // Body deserialization failures answer with the same JSON
                // error shape as every other failure.
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .app_data(tokens.clone())
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .service(routes::health::health)
            .configure(|cfg| routes::config(cfg, tokens.clone().into_inner()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
