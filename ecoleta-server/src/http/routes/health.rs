//! Liveness and database readiness

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;

use crate::http::server::AppState;

/// How long the readiness ping may take before the database counts as down
const DB_PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Health report; 503 while the database is unreachable
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

impl HealthReport {
    fn new(database: bool) -> Self {
        Self {
            status: if database { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.database {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn database_reachable(pool: &PgPool) -> bool {
    let ping = sqlx::query("SELECT 1").execute(pool);
    match tokio::time::timeout(DB_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::warn!("health check: database error: {}", e);
            false
        }
        Err(_) => {
            tracing::warn!("health check: database ping timed out");
            false
        }
    }
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthReport::new(database_reachable(&state.pool).await);
    (report.status_code(), Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_database_is_ok() {
        let report = HealthReport::new(true);
        assert_eq!(report.status, "ok");
        assert_eq!(report.status_code(), StatusCode::OK);
    }

    #[test]
    fn unreachable_database_is_degraded() {
        let report = HealthReport::new(false);
        assert_eq!(report.status, "degraded");
        assert_eq!(report.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
