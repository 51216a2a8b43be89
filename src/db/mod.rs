pub mod memory;
pub mod pg_store;
pub mod postgres;
pub mod store;

pub use memory::InMemoryStore;
pub use pg_store::PgStore;
pub use postgres::{create_pool, run_migrations};
pub use store::{PlanStore, ProfileStore};
