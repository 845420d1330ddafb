pub mod connection;
pub mod database;
pub mod metrics;
pub mod seeder;
pub mod store;

pub use connection::{ConnectionMonitor, ConnectionState};
pub use database::LaureateDb;
pub use metrics::{get_metrics, init_metrics, record_seed};
pub use seeder::{bundled_dataset, load_dataset, parse_dataset, seed, SeedReport};
pub use store::{InMemoryLaureateStore, LaureateStore};
