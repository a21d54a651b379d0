//! HTTP handlers and route configuration.

mod health;
mod views;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/views")
                    .route("/shell", web::get().to(views::shell))
                    .route("/dashboard", web::get().to(views::dashboard))
                    .route("/posts", web::get().to(views::list_posts))
                    .route("/posts/form", web::get().to(views::create_form))
                    .route("/posts/form", web::post().to(views::submit_form))
                    .route("/posts/{id}/form", web::get().to(views::edit_form))
                    .route("/posts/{id}", web::delete().to(views::delete_post)),
            ),
    );
}
