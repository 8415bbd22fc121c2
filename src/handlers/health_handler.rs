use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let deadline = state.deadline();
    let store_health = deadline.store("store ping", state.result_store.ping()).await;
    let cache_health = deadline.cache("cache ping", state.result_cache.ping()).await;

    if let Err(e) = &store_health {
        log::warn!("Readiness: store check failed: {}", e);
    }
    if let Err(e) = &cache_health {
        log::warn!("Readiness: cache check failed: {}", e);
    }

    let ready = store_health.is_ok() && cache_health.is_ok();
    let response = serde_json::json!({
        "status": if ready { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if store_health.is_ok() { "ok" } else { "error" },
            "redis": if cache_health.is_ok() { "ok" } else { "error" }
        }
    });

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
