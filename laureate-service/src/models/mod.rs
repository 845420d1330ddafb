pub mod laureate;

pub use laureate::LaureateRecord;
