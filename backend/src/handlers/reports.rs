//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::reporting::{DashboardMetrics, ReportingService, SellReport, SellReportFilter};
use crate::AppState;

/// Dashboard metrics: global for admins, store-scoped otherwise
pub async fn get_dashboard_metrics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<DashboardMetrics>> {
    let scope = if current_user.0.is_admin() {
        None
    } else {
        Some(current_user.0.store_id.ok_or_else(|| {
            AppError::Forbidden("No store assigned to this account".to_string())
        })?)
    };

    let service = ReportingService::new(state.db);
    let metrics = service.dashboard_metrics(scope).await?;
    Ok(Json(metrics))
}

/// Per-store, per-date sell report
pub async fn get_sell_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<SellReportFilter>,
) -> AppResult<Json<SellReport>> {
    if !current_user.0.can_access_store(filter.store_id) {
        return Err(AppError::Forbidden(
            "Sell reports are limited to your own store".to_string(),
        ));
    }

    let service = ReportingService::new(state.db);
    let report = service.sell_report(&filter).await?;
    Ok(Json(report))
}

/// Per-store, per-date sell report as a CSV download
pub async fn export_sell_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<SellReportFilter>,
) -> AppResult<impl IntoResponse> {
    if !current_user.0.can_access_store(filter.store_id) {
        return Err(AppError::Forbidden(
            "Sell reports are limited to your own store".to_string(),
        ));
    }

    let service = ReportingService::new(state.db);
    let csv = service.sell_report_csv(&filter).await?;

    let filename = format!(
        "attachment; filename=\"sell-report-{}.csv\"",
        filter.sell_date
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        csv,
    ))
}
