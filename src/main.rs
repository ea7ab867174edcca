use actix_web::{App, HttpServer, middleware::Compress};
use actix_cors::Cors;
use utoipa_swagger_ui::SwaggerUi;

use postboard::config::AppConfig;
use postboard::openapi::ApiDoc;
use postboard::repo::sqlite::SqliteRepo;
use postboard::routes::{config, AppState};
use postboard::seed::seed_if_empty;
use utoipa::OpenApi; // bring trait into scope for ApiDoc::openapi()
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env automatically only in debug builds.
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    info!("Bootstrapping post board server");

    let repo = match SqliteRepo::connect(&cfg.database_url, cfg.db_max_connections).await {
        Ok(r) => r,
        Err(e) => {
            error!("cannot open storage at {}: {e}", cfg.database_url);
            std::process::exit(1);
        }
    };
    info!(url = %cfg.database_url, "storage ready, posts table present");

    if cfg.seed_sample_data {
        match seed_if_empty(&repo).await {
            Ok(0) => info!("posts table not empty, skipping sample data"),
            Ok(_) => {}
            Err(e) => error!("failed to insert sample data: {e}"),
        }
    }

    let openapi = ApiDoc::openapi();
    let state = AppState { repo: Arc::new(repo.clone()) };

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .app_data(actix_web::web::Data::new(state.clone()))
            .configure(config)
            .service(SwaggerUi::new("/docs/{_:.*}").url("/docs/openapi.json", openapi.clone()))
    })
    .bind((cfg.host.as_str(), cfg.port))?;

    info!("Listening on http://{}:{}", cfg.host, cfg.port);

    // returns once a shutdown signal has drained the workers
    let result = server.run().await;

    repo.close().await;
    info!("Database connection closed.");
    result
}
