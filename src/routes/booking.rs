use actix_identity::Identity;
use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::booking::BookingForm;
use crate::repository::InMemoryRepository;
use crate::routes::auth::remember_return_path;
use crate::routes::{base_context, redirect, render_template, visitor_id};
use crate::services::{ServiceError, booking as booking_service};

fn not_found(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: Option<&Identity>,
) -> HttpResponse {
    let context = base_context(flash_messages, user, "booking");
    let mut response = render_template(tera, "booking/not_found.html", &context);
    if response.status().is_success() {
        *response.status_mut() = StatusCode::NOT_FOUND;
    }
    response
}

fn login_redirect(session: &Session, offer_id: &str) -> HttpResponse {
    remember_return_path(session, &format!("/booking/{offer_id}"));
    FlashMessage::info("Please log in to continue booking.").send();
    redirect("/login")
}

#[get("/booking/{offer_id}")]
pub async fn show_booking(
    offer_id: web::Path<String>,
    user: Option<Identity>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let visitor = visitor_id(&session);
    let offer_id = offer_id.into_inner();

    match booking_service::load_booking_page(repo.get_ref(), &user, visitor, &offer_id) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "booking");
            context.insert("offer", &data.offer);
            context.insert("passengers", &data.passengers);

            let template = if data.ready {
                "booking/index.html"
            } else {
                "booking/not_ready.html"
            };
            render_template(&tera, template, &context)
        }
        Err(ServiceError::Unauthorized) => login_redirect(&session, &offer_id),
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, user.as_ref()),
        Err(err) => {
            log::error!("Failed to load booking page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/booking/{offer_id}")]
pub async fn submit_booking(
    offer_id: web::Path<String>,
    user: Option<Identity>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    body: web::Bytes,
) -> impl Responder {
    let visitor = visitor_id(&session);
    let offer_id = offer_id.into_inner();
    let back = format!("/booking/{offer_id}");

    let form = match BookingForm::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::debug!("Rejected booking payload: {err}");
            FlashMessage::error("Please fill out all required fields correctly.").send();
            return redirect(&back);
        }
    };

    match booking_service::submit_booking(repo.get_ref(), &user, visitor, &offer_id, form) {
        Ok(_) => redirect("/confirmation"),
        Err(ServiceError::Unauthorized) => login_redirect(&session, &offer_id),
        Err(ServiceError::NotFound) => not_found(&tera, &flash_messages, user.as_ref()),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&back)
        }
        Err(err) => {
            log::error!("Failed to submit booking: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/confirmation")]
pub async fn show_confirmation(
    user: Option<Identity>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let visitor = visitor_id(&session);

    match booking_service::load_confirmation(repo.get_ref(), visitor) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "confirmation");
            context.insert("booking", &data.booking);

            render_template(&tera, "confirmation/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load confirmation: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
