use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use migration::{Migrator, MigratorTrait};
use totrip_backend::auth::TokenVerifier;
use totrip_backend::cache::{GuideCache, RedisCache};
use totrip_backend::config::AppConfig;
use totrip_backend::create_pool;
use totrip_backend::handlers;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    if config.run_migrations {
        Migrator::up(&db, None).await.expect("Failed to run migrations");
        tracing::info!("Migrations applied");
    }
    let db_data = web::Data::new(db);

    // Redis is optional; without it every guide detail is read from Postgres.
    let guide_cache = match &config.redis_url {
        Some(url) => match RedisCache::new(url).await {
            Ok(redis) => {
                tracing::info!("Connected to Redis");
                GuideCache::new(Some(redis), config.guide_cache_ttl)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, guide cache disabled");
                GuideCache::disabled()
            }
        },
        None => GuideCache::disabled(),
    };
    let cache_data = web::Data::new(guide_cache);

    let verifier = web::Data::new(TokenVerifier::from_settings(&config.auth));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .expose_headers(vec![actix_web::http::header::LOCATION])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(cache_data.clone())
            .app_data(verifier.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
