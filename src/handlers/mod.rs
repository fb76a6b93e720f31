pub mod api_v1;
pub mod dashboard;
pub mod ws;

use actix_web::{web, HttpResponse};

/// Register every route. Shared by `main` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Root redirect
        .route("/", web::get().to(|| async {
            HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish()
        }))
        .route("/dashboard", web::get().to(dashboard::index))
        .route("/ws", web::get().to(ws::ws_connect))
        .service(web::scope("/api/v1").configure(api_v1::configure))
        // Default 404 handler (must be registered last)
        .default_service(web::to(|| async {
            let html = include_str!("../../templates/errors/404.html");
            HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(html)
        }));
}
