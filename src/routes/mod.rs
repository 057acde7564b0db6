// Route exports
pub mod universities;

use actix_web::web;

pub use universities::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(universities::configure),
    );
}
