use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::api_client::FlightsApiClient;
use crate::forms::search::{AirlineFilterForm, RefundabilityFilterForm, SearchForm};
use crate::repository::InMemoryRepository;
use crate::routes::{base_context, redirect, render_template, visitor_id};
use crate::services::{ServiceError, ServiceResult, search as search_service};

#[post("/search")]
pub async fn start_search(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    client: web::Data<FlightsApiClient>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    let visitor = visitor_id(&session);
    let today = Local::now().date_naive();

    match search_service::start_search(repo.get_ref(), visitor, form, today) {
        Ok(started) => {
            let repo = repo.clone();
            let client = client.clone();
            actix_web::rt::spawn(async move {
                let result = client.search_offers(&started.params).await;
                if let Err(err) =
                    search_service::record_fetch(repo.get_ref(), visitor, started.generation, result)
                {
                    log::error!("Failed to store search results: {err}");
                }
            });
            redirect("/search")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to start search: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/search")]
pub async fn show_results(
    user: Option<Identity>,
    session: Session,
    repo: web::Data<InMemoryRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let visitor = visitor_id(&session);

    match search_service::load_search_page(repo.get_ref(), visitor) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, user.as_ref(), "search");
            context.insert("summary", &data.summary);
            context.insert("pending", &data.pending);
            context.insert("error", &data.error);
            context.insert("offers", &data.offers);
            context.insert("total_offers", &data.total_offers);
            context.insert("airlines", &data.airlines);
            context.insert("refundability", &data.refundability);
            context.insert("filters_active", &data.filters_active);

            render_template(&tera, "search/index.html", &context)
        }
        Err(ServiceError::NotFound) => redirect("/"),
        Err(err) => {
            log::error!("Failed to load search results: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Maps the outcome of a filter change onto a redirect.
fn filter_response<T>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(_) => redirect("/search"),
        Err(ServiceError::NotFound) => redirect("/"),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/search")
        }
        Err(err) => {
            log::error!("Failed to update filters: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/search/filters/airline")]
pub async fn toggle_airline(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    web::Form(form): web::Form<AirlineFilterForm>,
) -> impl Responder {
    let visitor = visitor_id(&session);
    filter_response(search_service::toggle_airline(repo.get_ref(), visitor, form))
}

#[post("/search/filters/refundability")]
pub async fn toggle_refundability(
    session: Session,
    repo: web::Data<InMemoryRepository>,
    web::Form(form): web::Form<RefundabilityFilterForm>,
) -> impl Responder {
    let visitor = visitor_id(&session);
    filter_response(search_service::toggle_refundability(repo.get_ref(), visitor, form))
}

#[post("/search/filters/clear")]
pub async fn clear_filters(
    session: Session,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    let visitor = visitor_id(&session);
    filter_response(search_service::clear_filters(repo.get_ref(), visitor))
}
