use crate::models::LaureateRecord;
use serde::Serialize;

/// Body of a 404 from `GET /laureates/id/:id`, sent as a bare JSON string.
pub const LAUREATE_NOT_FOUND: &str = "Sorry, could not find a Nobel Prize laureate with this ID";

/// Envelope for `GET /laureates`.
#[derive(Debug, Serialize)]
pub struct LaureateListResponse {
    pub data: Vec<LaureateRecord>,
    pub success: bool,
}

impl LaureateListResponse {
    pub fn new(data: Vec<LaureateRecord>) -> Self {
        Self {
            data,
            success: true,
        }
    }
}

/// One entry of the route listing served at `/`.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointInfo {
    pub path: &'static str,
    pub methods: &'static [&'static str],
}
