use actix_web::{web, HttpResponse};
use cb_infra::DatabasePool;
use cb_shared::{HealthResponse, HealthStatus};

/// Handler for GET /health
///
/// With the MySQL directory the pool is pinged; a failed ping answers
/// 503 with status `unhealthy`.
pub async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let response = HealthResponse::healthy("collabrium-api", env!("CARGO_PKG_VERSION"));

    let database_ok = match pool {
        Some(pool) => matches!(pool.health_check().await, Ok(true)),
        None => true,
    };

    if database_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response.with_status(HealthStatus::Unhealthy))
    }
}
