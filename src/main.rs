use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use donor_match::config::Settings;
use donor_match::routes::{self, donors::AppState};
use donor_match::services::DonorRegistry;
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: Option<&Settings>) {
    let log_level = std::env::var("LOG_LEVEL")
        .ok()
        .or_else(|| settings.map(|s| s.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT")
        .ok()
        .or_else(|| settings.map(|s| s.logging.format.clone()))
        .unwrap_or_else(|| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_logging(settings.as_ref().ok());

    info!("Starting donor matching service...");

    let settings = settings.unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let registry = match &settings.registry.seed_file {
        Some(path) => DonorRegistry::load_seed(path).unwrap_or_else(|e| {
            error!("Failed to load donor seed file {}: {}", path, e);
            panic!("Seed file error: {}", e);
        }),
        None => {
            info!("No seed file configured, starting with an empty registry");
            DonorRegistry::new()
        }
    };

    let app_state = AppState::new(Arc::new(registry), &settings);

    info!(
        "Matcher initialized with rules: {:?}, missing distance: {:?}",
        app_state.matcher.rules(),
        app_state.matcher.missing_distance()
    );

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
