use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::api::AirportsQuery;
use crate::repository::InMemoryRepository;
use crate::routes::visitor_id;
use crate::services::api as api_service;

#[get("/v1/airports")]
pub async fn api_v1_airports(query: web::Query<AirportsQuery>) -> impl Responder {
    HttpResponse::Ok().json(api_service::search_airports(&query))
}

#[get("/v1/offers")]
pub async fn api_v1_offers(
    session: Session,
    repo: web::Data<InMemoryRepository>,
) -> impl Responder {
    let visitor = visitor_id(&session);

    match api_service::list_offers(repo.get_ref(), visitor) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            log::error!("Failed to list offers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
