use crate::dtos::EndpointInfo;
use axum::Json;

/// Routes served by the application, in registration order.
pub const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo {
        path: "/",
        methods: &["GET"],
    },
    EndpointInfo {
        path: "/laureates",
        methods: &["GET"],
    },
    EndpointInfo {
        path: "/laureates/id/:id",
        methods: &["GET"],
    },
    EndpointInfo {
        path: "/health",
        methods: &["GET"],
    },
    EndpointInfo {
        path: "/ready",
        methods: &["GET"],
    },
    EndpointInfo {
        path: "/metrics",
        methods: &["GET"],
    },
];

/// GET /
pub async fn list_endpoints() -> Json<&'static [EndpointInfo]> {
    Json(ENDPOINTS)
}
