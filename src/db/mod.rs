pub mod memory;
pub mod postgres;
pub mod seed;
pub mod store;

pub use memory::InMemoryStore;
pub use postgres::{create_pool, PgInteractionStore};
pub use seed::seed_sample_data;
pub use store::InteractionStore;

#[cfg(test)]
pub use store::MockInteractionStore;
