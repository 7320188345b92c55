use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::auth::LoginForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

const RETURN_PATH_SESSION_KEY: &str = "return_to";

/// Remembers where to send the visitor once they have logged in.
pub fn remember_return_path(session: &Session, path: &str) {
    if let Err(err) = session.insert(RETURN_PATH_SESSION_KEY, path) {
        log::error!("Failed to store return path in session: {err}");
    }
}

/// Local paths only; anything else falls back to the results page.
fn take_return_path(session: &Session) -> String {
    session
        .remove_as::<String>(RETURN_PATH_SESSION_KEY)
        .and_then(Result::ok)
        .filter(|path| path.starts_with('/') && !path.starts_with("//"))
        .unwrap_or_else(|| "/search".to_string())
}

#[get("/login")]
pub async fn show_login(
    user: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(&flash_messages, user.as_ref(), "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    request: HttpRequest,
    session: Session,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth_service::login(&form) {
        Ok(email) => {
            if let Err(err) = Identity::login(&request.extensions(), email.into_inner()) {
                log::error!("Failed to log the visitor in: {err}");
                return HttpResponse::InternalServerError().finish();
            }
            redirect(&take_return_path(&session))
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/login")
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Option<Identity>) -> impl Responder {
    if let Some(user) = user {
        user.logout();
    }
    redirect("/")
}
