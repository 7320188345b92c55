#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api_client::FlightsApiClient;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::InMemoryRepository;

#[cfg(feature = "server")]
pub mod api_client;
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Registers every page and API handler.
#[cfg(feature = "server")]
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use crate::routes::api::{api_v1_airports, api_v1_offers};
    use crate::routes::auth::{login, logout, show_login};
    use crate::routes::booking::{show_booking, show_confirmation, submit_booking};
    use crate::routes::main::show_index;
    use crate::routes::search::{
        clear_filters, show_results, start_search, toggle_airline, toggle_refundability,
    };

    cfg.service(
        web::scope("/api")
            .service(api_v1_airports)
            .service(api_v1_offers),
    )
    .service(show_index)
    .service(start_search)
    .service(show_results)
    .service(toggle_airline)
    .service(toggle_refundability)
    .service(clear_filters)
    .service(show_booking)
    .service(submit_booking)
    .service(show_confirmation)
    .service(show_login)
    .service(login)
    .service(logout);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let client = FlightsApiClient::from_config(&server_config)
        .map_err(|e| std::io::Error::other(format!("Failed to build flights API client: {e}")))?;

    let repo = InMemoryRepository::with_limits(
        Duration::from_secs(server_config.visitor_idle_minutes.saturating_mul(60)),
        server_config.max_visitors,
    );

    // Keys and stores for identity, sessions, and flash messages.
    if server_config.secret.len() < 64 {
        return Err(std::io::Error::other(
            "The session secret must be at least 64 bytes long",
        ));
    }
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
