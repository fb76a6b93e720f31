use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::state::AppState;
use crate::templates_structs::ApiRecordsResponse;

/// GET /api/v1/records - The unfiltered record list of the latest snapshot.
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let current = state.store.current();
    Ok(HttpResponse::Ok().json(ApiRecordsResponse::from(current.as_ref())))
}
