use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::dashboard::DashboardQuery;
use crate::models::dashboard::DashboardView;
use crate::models::filter::FilterState;
use crate::state::AppState;

/// GET /api/v1/dashboard - Summary and chart data for one filter.
/// Query params: date (yyyy-MM-dd, default today), course (default "All Courses").
pub async fn view(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = FilterState::from_params(
        query.date.as_deref(),
        query.course.as_deref(),
        &state.display_zone,
    )
    .map_err(|e| AppError::BadRequest(format!("date must be yyyy-MM-dd: {e}")))?;

    let current = state.store.current();
    Ok(HttpResponse::Ok().json(DashboardView::build(&current, &filter, &state.display_zone)))
}
