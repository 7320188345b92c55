//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::types::VisitorId;

pub mod api;
pub mod auth;
pub mod booking;
pub mod main;
pub mod search;

const VISITOR_SESSION_KEY: &str = "visitor_id";

/// Maps a flash message level onto a Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context shared by every page: flash alerts, the signed-in email and the
/// active navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&Identity>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user.and_then(|identity| identity.id().ok()));
    context.insert("current_page", current_page);
    context
}

/// Returns the visitor id stored in the session, assigning a new one on the
/// first request.
pub fn visitor_id(session: &Session) -> VisitorId {
    let stored = session
        .get::<String>(VISITOR_SESSION_KEY)
        .ok()
        .flatten()
        .and_then(|value| value.parse::<VisitorId>().ok());

    if let Some(visitor) = stored {
        return visitor;
    }

    let visitor = VisitorId::new();
    if let Err(err) = session.insert(VISITOR_SESSION_KEY, visitor.to_string()) {
        log::error!("Failed to store visitor id in session: {err}");
    }
    visitor
}
