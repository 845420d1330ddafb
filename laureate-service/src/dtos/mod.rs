pub mod laureates;

pub use laureates::{EndpointInfo, LaureateListResponse, LAUREATE_NOT_FOUND};
