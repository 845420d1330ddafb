pub mod readiness;

pub use readiness::readiness_gate;
