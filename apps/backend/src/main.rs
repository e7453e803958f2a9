use std::time::Duration;

use actix_web::{web, App, HttpServer};
use backend::config::db::store_backend_from_env;
use backend::infra::state::build_state;
use backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use backend::routes;
use backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

fn exit_with(message: &str) -> ! {
    error!("{message}");
    eprintln!("❌ {message}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| exit_with("BACKEND_PORT must be a valid port number"));

    let jwt = std::env::var("BACKEND_JWT_SECRET")
        .unwrap_or_else(|_| exit_with("BACKEND_JWT_SECRET must be set"));
    let mut security_config = SecurityConfig::new(jwt.as_bytes());
    if let Ok(raw) = std::env::var("BACKEND_TOKEN_TTL_MINUTES") {
        let minutes = raw
            .parse::<u64>()
            .ok()
            .filter(|m| *m > 0)
            .unwrap_or_else(|| exit_with("BACKEND_TOKEN_TTL_MINUTES must be a positive integer"));
        security_config = security_config.with_token_ttl(Duration::from_secs(minutes * 60));
    }

    let backend = store_backend_from_env()
        .unwrap_or_else(|e| exit_with(&format!("Invalid BACKEND_DB: {e}")));

    let app_state = match build_state()
        .with_backend(backend)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => exit_with(&format!("Failed to build application state: {e}")),
    };
    info!(?backend, "stores ready");

    if let (Ok(username), Ok(password)) = (
        std::env::var("BACKEND_ADMIN_USERNAME"),
        std::env::var("BACKEND_ADMIN_PASSWORD"),
    ) {
        match app_state.accounts.ensure_admin(&username, &password).await {
            Ok(created) => info!(created, "bootstrap admin checked"),
            Err(e) => exit_with(&format!("Failed to create bootstrap admin: {e}")),
        }
    }

    let data = web::Data::new(app_state);

    info!(%host, port, "starting Cows and Bulls backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
