pub mod dashboard;
pub mod records;

use actix_web::web;

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard::view));
    cfg.route("/records", web::get().to(records::list));
}
