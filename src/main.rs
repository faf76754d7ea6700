//! # XNET PAY Checkout
//!
//! Main entry point of the card checkout web application.
//! Loads configuration, sets up logging, SSL and route handling.

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod metric;
pub mod models;
pub mod services;

use logfire::config::MetricsOptions;
use ntex::web;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    let app_config = config::init_config()?;

    // Initialize logging and metrics, logfire only when a token is configured
    let shutdown_handler = match &app_config.logfire_token {
        Some(token) => Some(
            logfire::configure()
                .install_panic_handler()
                .with_metrics(Some(MetricsOptions::default()))
                .send_to_logfire(logfire::config::SendToLogfire::Yes)
                .with_token(token)
                .finish()?,
        ),
        None => {
            logger::setup_simple_logger(app_config.log_level)?;
            None
        }
    };

    log::info!(
        "checkout starting with {} validation, test harness: {}",
        app_config.validation_policy,
        app_config.test_harness
    );

    configure_and_run_server(app_config).await?;

    if let Some(shutdown_handler) = shutdown_handler {
        shutdown_handler.shutdown()?;
    }

    Ok(())
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor(
    app_config: &config::AppConfig,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .map_err(|e| anyhow::anyhow!("Failed to create SSL acceptor: {}", e))?;

    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load private key from {}: {}",
                app_config.private_key_path,
                e
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .map_err(|e| {
            anyhow::anyhow!(
                "Failed to load certificate from {}: {}",
                app_config.certificate_path,
                e
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state, the in-flight set is shared by every worker
fn create_app_state(
    app_config: &config::AppConfig,
    in_flight: api::checkout::InFlightSubmissions,
) -> front::AppState {
    front::AppState {
        settings: app_config.checkout_settings(),
        gateway: app_config.build_gateway(),
        in_flight,
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(app_config: config::AppConfig) -> anyhow::Result<()> {
    let server_addr = (app_config.web_server_host.clone(), app_config.web_server_port);
    let in_flight = api::checkout::InFlightSubmissions::default();
    let is_prod = app_config.is_prod();
    let ssl_acceptor = if is_prod {
        Some(setup_ssl_acceptor(&app_config)?)
    } else {
        None
    };

    let server = web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(&app_config, in_flight.clone()))
            .service(ntex_files::Files::new("/static", "web/static/"))
            .configure(front::routes::checkout)
            .default_service(web::route().to(front::server::serve_not_found))
    });

    let bound_server = match ssl_acceptor {
        Some(ssl_acceptor) => server.bind_openssl(server_addr, ssl_acceptor)?,
        None => server.bind(server_addr)?,
    };

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
