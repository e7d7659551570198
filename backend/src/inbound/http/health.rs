//! Liveness and readiness probes for orchestrators and load balancers.
//!
//! Readiness flips to true once the database pool and migrations are in
//! place. Liveness flips to false when the server starts draining.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Process health flags shared with the probe handlers.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Report the process as draining; both probes answer 503 afterwards.
    pub fn mark_draining(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeStatus {
    /// `ok` or `unavailable`.
    pub status: &'static str,
}

fn probe_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeStatus {
            status: if ok { "ok" } else { "unavailable" },
        })
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Ready to serve traffic", body = ProbeStatus),
        (status = 503, description = "Not ready", body = ProbeStatus)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = ProbeStatus),
        (status = 503, description = "Process is draining", body = ProbeStatus)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    async fn probe(state: web::Data<HealthState>, path: &str) -> (StatusCode, Value, bool) {
        let app = actix_test::init_service(
            App::new().app_data(state).service(ready).service(live),
        )
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request())
                .await;
        let status = res.status();
        let no_store = res
            .headers()
            .get(header::CACHE_CONTROL)
            .is_some_and(|value| value == "no-store");
        let body: Value = actix_test::read_body_json(res).await;
        (status, body, no_store)
    }

    #[rstest]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE, "unavailable")]
    #[case("/health/live", StatusCode::OK, "ok")]
    #[actix_web::test]
    async fn fresh_state_is_live_but_not_ready(
        #[case] path: &str,
        #[case] expected: StatusCode,
        #[case] status: &str,
    ) {
        let (code, body, no_store) = probe(web::Data::new(HealthState::new()), path).await;
        assert_eq!(code, expected);
        assert_eq!(body["status"], status);
        assert!(no_store);
    }

    #[actix_web::test]
    async fn ready_after_mark_ready() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        let (code, _, _) = probe(state, "/health/ready").await;
        assert_eq!(code, StatusCode::OK);
    }

    #[rstest]
    #[case("/health/ready")]
    #[case("/health/live")]
    #[actix_web::test]
    async fn draining_fails_both_probes(#[case] path: &str) {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        state.mark_draining();
        let (code, _, _) = probe(state, path).await;
        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
    }
}
