// Persistence layer: store traits, record models and the two backends.

pub mod memory;
pub mod models;
pub mod operations;
pub mod store;

pub use memory::MemoryStore;
pub use operations::PgStore;
pub use store::{GroupPatch, GroupStore, PostStore, Store, UserStore};
