pub mod health;
pub mod index;
pub mod laureates;

pub use health::{health_check, metrics_endpoint, not_found_fallback, readiness_check};
pub use index::{list_endpoints, ENDPOINTS};
pub use laureates::{get_laureate_by_id, list_laureates, parse_laureate_id};
