use actix_identity::Identity;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Local;
use tera::Tera;

use crate::routes::{base_context, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    user: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = main_service::load_home_page(Local::now().date_naive());

    let mut context = base_context(&flash_messages, user.as_ref(), "index");
    context.insert("airports", &data.airports);
    context.insert("trip_types", &data.trip_types);
    context.insert("defaults", &data.defaults);
    context.insert("max_per_category", &data.max_per_category);

    render_template(&tera, "main/index.html", &context)
}
