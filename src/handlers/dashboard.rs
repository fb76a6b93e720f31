use actix_web::{web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::models::dashboard::DashboardView;
use crate::models::filter::FilterState;
use crate::state::AppState;
use crate::templates_structs::{
    ChartCanvas, DashboardCard, DashboardTemplate, ErrorTemplate, FilterBar, PageContext,
    StatValue,
};

/// Filter bar query string. Shared with the JSON API.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
    pub course: Option<String>,
}

pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build();
    let current = state.store.current();

    if let Some(message) = current.status.error_message() {
        let tmpl = ErrorTemplate {
            ctx,
            title: "Error".to_string(),
            message: message.to_string(),
        };
        return render(tmpl);
    }

    let filter = FilterState::lenient(
        query.date.as_deref(),
        query.course.as_deref(),
        &state.display_zone,
    );
    let view = DashboardView::build(&current, &filter, &state.display_zone);

    let stat_cards = vec![
        DashboardCard::new(
            "Total Attendance",
            StatValue {
                key: "totalStudents",
                value: view.summary.total_students,
                caption: "students present",
                tone: "green",
            }
            .render()?,
        )
        .render()?,
        DashboardCard::new(
            "Active Courses",
            StatValue {
                key: "uniqueCourses",
                value: view.summary.unique_courses,
                caption: "courses with attendance",
                tone: "blue",
            }
            .render()?,
        )
        .render()?,
    ];

    let chart_cards = vec![
        DashboardCard::new(
            "Attendance by Course",
            ChartCanvas { canvas_id: "course-chart", kind: "pie" }.render()?,
        )
        .render()?,
        DashboardCard::new(
            "Attendance by Time",
            ChartCanvas { canvas_id: "time-chart", kind: "bar" }.render()?,
        )
        .render()?,
    ];

    let tmpl = DashboardTemplate {
        ctx,
        filter_bar: FilterBar::new("/dashboard", &filter).render()?,
        stat_cards,
        chart_cards,
        view_json: view.to_embedded_json(),
    };
    render(tmpl)
}
